// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle notifications queued by the tree.

use crate::types::{NavigatorId, ScreenKey};

/// Something the host may want to react to; drained with
/// [`TransitionTree::drain_events`](crate::TransitionTree::drain_events).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TreeEvent {
    /// A screen was pushed.
    Mounted {
        /// The new screen.
        screen: ScreenKey,
        /// Its navigator.
        navigator: NavigatorId,
    },
    /// A screen began opening (`closing == false`) or closing.
    TransitionStarted {
        /// The screen.
        screen: ScreenKey,
        /// Direction of the transition.
        closing: bool,
    },
    /// A released gesture decided to dismiss the screen. The host should
    /// update its own navigation state; the tree unmounts the screen once the
    /// closing animation ends.
    DismissRequested {
        /// The screen.
        screen: ScreenKey,
        /// Its navigator.
        navigator: NavigatorId,
    },
    /// A touch caught a gesture dismissal mid-flight; the screen stays.
    DismissCancelled {
        /// The screen.
        screen: ScreenKey,
    },
    /// A progress animation reached its target.
    TransitionFinished {
        /// The screen.
        screen: ScreenKey,
        /// Direction of the finished transition.
        closing: bool,
    },
    /// A screen and its per-screen state were removed.
    Unmounted {
        /// The removed screen; its key is no longer valid.
        screen: ScreenKey,
        /// The navigator it belonged to.
        navigator: NavigatorId,
    },
}
