// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segue Transition: gesture-interruptible transitions between stacked screens.
//!
//! A [`TransitionTree`] owns navigators (stacks of screens, possibly nested
//! inside other screens) and everything keyed by screen: transition progress,
//! gesture values, measured shared bounds and gesture-axis claims. The host:
//!
//! - pushes routes with [`TransitionTree::push`] and closes them with
//!   [`TransitionTree::dismiss`] or by gesture;
//! - forwards pan events with [`TransitionTree::handle_pan`];
//! - steps animations with [`TransitionTree::advance`];
//! - asks for each visible screen's styles with [`TransitionTree::frame`],
//!   which runs the [`ScreenInterpolator`] of the screen covering it, or the
//!   screen's own when nothing covers it;
//! - reacts to the [`TreeEvent`]s it drains.
//!
//! Screen handles are generational: after unmounting, a stale [`ScreenKey`] is
//! rejected with [`TransitionError::UnknownScreen`] instead of reaching another
//! screen.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Size, Vec2};
//! use segue_gesture::PanEvent;
//! use segue_transition::{TransitionTree, TreeEvent, presets};
//!
//! let mut tree = TransitionTree::new(Size::new(400.0, 800.0));
//! let sheet = tree.push(tree.root(), presets::slide_from_bottom()).unwrap();
//! while tree.is_animating() {
//!     tree.advance(1.0 / 60.0);
//! }
//!
//! // Drag the sheet most of the way down and let go.
//! tree.handle_pan(sheet, PanEvent::began()).unwrap();
//! tree.handle_pan(sheet, PanEvent::changed(Vec2::new(0.0, 10.0), Vec2::ZERO)).unwrap();
//! tree.handle_pan(sheet, PanEvent::ended(Vec2::new(0.0, 600.0), Vec2::ZERO)).unwrap();
//! while tree.is_animating() {
//!     tree.advance(1.0 / 60.0);
//! }
//!
//! assert!(!tree.is_mounted(sheet));
//! assert!(tree
//!     .drain_events()
//!     .any(|e| matches!(e, TreeEvent::DismissRequested { .. })));
//! ```

mod animation;
mod arena;
mod error;
mod events;
mod interpolator;
mod options;
pub mod presets;
mod session;
mod style;
mod tree;
mod types;

pub use segue_bounds as bounds;
pub use segue_gesture as gesture;

pub use animation::{AnimatedValue, MAX_STEP_SECS, REST_THRESHOLD, VELOCITY_THRESHOLD};
pub use error::{Result, TransitionError};
pub use events::TreeEvent;
pub use interpolator::{InterpolationProps, Layouts, ScreenInterpolator, ScreenState};
pub use options::{Easing, ScreenOptions, TransitionSpec, TransitionSpecs};
pub use session::{ScreenAnimation, TransitionSession};
pub use style::{StyleError, StyleKey, StylePatch, StylePatchMap};
pub use tree::TransitionTree;
pub use types::{InterpolatorState, NavigatorId, Route, RouteParams, ScreenKey};
