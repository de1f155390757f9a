// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use crate::types::{NavigatorId, ScreenKey};

/// Result alias for tree operations.
pub type Result<T, E = TransitionError> = core::result::Result<T, E>;

/// A handle passed to the tree does not refer to a live screen or navigator.
///
/// These are programmer errors: the caller held on to a handle past its
/// lifetime. Reads of per-screen data that may race with unmounting (bounds,
/// gesture values) do not use this error and return defaults instead.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// The screen was never mounted or has been unmounted.
    #[error("screen {0:?} is not mounted")]
    UnknownScreen(ScreenKey),
    /// The navigator was never created or has been removed.
    #[error("navigator {0:?} does not exist")]
    UnknownNavigator(NavigatorId),
    /// A nested navigator was requested inside a screen that is not mounted.
    #[error("host screen {0:?} is not mounted")]
    UnknownHost(ScreenKey),
}
