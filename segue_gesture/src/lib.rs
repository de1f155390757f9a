// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segue Gesture: who owns a swipe, and what a released swipe does.
//!
//! This crate provides:
//! - [`AxisRegistry`]: per-navigator, per-axis claim stacks with fallback to the
//!   nearest surviving claim and inheritance up the navigator ancestry.
//! - [`GestureStore`]: per-screen [`GestureValues`] whose fields carry their own
//!   change versions.
//! - [`Recognizer`]: the per-screen pan state machine (`Idle → Tracking →
//!   Settling | Dismissing → Idle`) with activation, scroll-boundary handoff and
//!   interruption.
//! - [`determine_dismissal`], [`normalize_velocity`] and [`determine_snap_target`]:
//!   the release decisions, all in units normalized by the screen extent.
//!
//! Navigator and screen keys are generic. The registry only needs them to be
//! `Copy + Eq + Hash + Debug`; the navigator ancestry is supplied through
//! [`NavigatorParent`].
//!
//! ## Example: claim fallback
//!
//! ```
//! use segue_gesture::{AxisRegistry, GestureAxis};
//!
//! let mut reg = AxisRegistry::new();
//! reg.claim("root", GestureAxis::Vertical, "L1");
//! reg.claim("root", GestureAxis::Vertical, "L2");
//! reg.claim("root", GestureAxis::Vertical, "L3");
//! assert_eq!(reg.owner("root", GestureAxis::Vertical), Some("L3"));
//!
//! reg.release("root", GestureAxis::Vertical, "L3");
//! assert_eq!(reg.owner("root", GestureAxis::Vertical), Some("L2"));
//! ```
//!
//! ## Example: shadowing a parent navigator
//!
//! ```
//! use segue_gesture::{AxisRegistry, DirectionSet, GestureAxis};
//!
//! // "sheet" is a navigator hosted inside a screen of "root".
//! let parent = |n: &&str| (*n == "sheet").then_some("root");
//!
//! let mut reg = AxisRegistry::new();
//! reg.claim_directions("root", DirectionSet::BIDIRECTIONAL, "home");
//! reg.claim("sheet", GestureAxis::Vertical, "picker");
//!
//! let v = reg.resolve("sheet", GestureAxis::Vertical, &parent).unwrap();
//! assert_eq!(v.screen, "picker");
//! let h = reg.resolve("sheet", GestureAxis::Horizontal, &parent).unwrap();
//! assert_eq!(h.screen, "home");
//! ```

mod config;
mod dismissal;
mod recognizer;
mod registry;
mod scroll;
mod snap;
mod types;
mod values;

pub use config::{ACTIVATION_DISTANCE, DEFAULT_VELOCITY_IMPACT, GestureConfig};
pub use dismissal::{
    DISMISS_THRESHOLD, DismissDecision, MAX_NORMALIZED_VELOCITY, determine_dismissal,
    normalize_velocity,
};
pub use recognizer::{GestureAction, GesturePhase, PanContext, Recognizer};
pub use registry::{AxisRegistry, Claim};
pub use scroll::{BOUNDARY_TOLERANCE, ScrollState};
pub use snap::{SnapTarget, determine_snap_target};
pub use types::{DirectionSet, GestureAxis, NavigatorParent, NoParent, PanEvent, PanState};
pub use values::{GestureSnapshot, GestureStore, GestureValues, Tracked};
