// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handles and route descriptions.

use std::collections::BTreeMap;

use segue_bounds::BoundTag;

use crate::arena::SlotKey;
use crate::options::ScreenOptions;

/// Handle to a mounted screen.
///
/// Handles are generational: once a screen is unmounted its key never refers to
/// another screen, even if the slot is reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenKey(u32, u32);

/// Handle to a navigator (a stack of screens).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NavigatorId(u32, u32);

impl SlotKey for ScreenKey {
    fn from_parts(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }
    fn idx(self) -> usize {
        self.0 as usize
    }
    fn generation(self) -> u32 {
        self.1
    }
}

impl SlotKey for NavigatorId {
    fn from_parts(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }
    fn idx(self) -> usize {
        self.0 as usize
    }
    fn generation(self) -> u32 {
        self.1
    }
}

/// Whether a screen's interpolator has produced output yet.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum InterpolatorState {
    /// The pipeline has not run for this screen yet. Hosts should keep the
    /// screen hidden.
    #[default]
    Undetermined,
    /// The screen has no interpolator; it is rendered unstyled.
    Undefined,
    /// The interpolator has run at least once.
    Defined,
}

/// String parameters a route was pushed with.
///
/// Interpolators read these to derive per-item bound tags, e.g. a photo id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteParams(BTreeMap<String, String>);

impl RouteParams {
    /// No parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up a parameter.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// All parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RouteParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Everything needed to push a screen.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Transition and gesture options.
    pub options: ScreenOptions,
    /// Route parameters.
    pub params: RouteParams,
    /// Shared element this screen transitions from, if any.
    pub active_bound: Option<BoundTag>,
}

impl Route {
    /// A route with `options` and no parameters.
    pub fn new(options: ScreenOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Set the route parameters.
    #[must_use]
    pub fn with_params(mut self, params: RouteParams) -> Self {
        self.params = params;
        self
    }

    /// Set the shared element this screen transitions from.
    #[must_use]
    pub fn with_active_bound(mut self, tag: impl Into<BoundTag>) -> Self {
        self.active_bound = Some(tag.into());
        self
    }
}

impl From<ScreenOptions> for Route {
    fn from(options: ScreenOptions) -> Self {
        Self::new(options)
    }
}
