// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Segue Bounds: measured-bounds storage and shared-element transforms.
//!
//! A screen tags a view as shared by measuring it into a [`BoundStore`] under a
//! [`BoundTag`]. When another screen with the same tag transitions in, its
//! interpolator asks a [`BoundsContext`] for the style that carries the view
//! continuously from the source rectangle to the destination rectangle.
//!
//! - [`BoundStore`]: `(screen, tag) → MeasuredBounds`, purged per screen on unmount.
//! - [`BoundsQuery`]: what to resolve and how (space, target, method, scale mode, anchor, gestures).
//! - [`BoundsContext`]: resolves queries for one styled screen against its neighbours.
//! - [`BoundStyle`]: the resulting translate/scale/size, convertible to an [`kurbo::Affine`].
//! - [`Navigation::zoom`]: a zoom transition with mask and backdrop built on the same data.
//!
//! Missing measurements are not errors: they resolve to [`BoundStyle::IDENTITY`].
//!
//! ## Example
//!
//! ```
//! use kurbo::{Rect, Size};
//! use segue_bounds::{BoundStore, BoundsContext, BoundsQuery, MeasuredBounds};
//!
//! let mut store = BoundStore::new();
//! // Screen 1 shows a thumbnail; screen 2 shows the same image large.
//! store.set_bounds(1_u32, "photo", MeasuredBounds::from_page(16.0, 120.0, 80.0, 80.0));
//! store.set_bounds(2_u32, "photo", MeasuredBounds::from_page(0.0, 0.0, 390.0, 390.0));
//!
//! // Halfway through pushing screen 2.
//! let ctx = BoundsContext::new(&store, 2, Size::new(390.0, 844.0))
//!     .with_previous(Some(1))
//!     .with_progress(0.5);
//! let frame = ctx.raw(&BoundsQuery::new("photo")).unwrap();
//! assert_eq!(frame.current, Rect::new(8.0, 60.0, 243.0, 295.0));
//!
//! let style = ctx.bounds(&BoundsQuery::new("photo"));
//! assert!(!style.is_identity());
//! ```

mod context;
mod navigation;
mod query;
mod store;
mod transform;
mod types;

pub use context::BoundsContext;
pub use navigation::{Navigation, ZoomOptions, ZoomStyle};
pub use query::{Anchor, BoundsQuery, Method, ScaleMode, Target};
pub use store::BoundStore;
pub use transform::{BoundStyle, BoundsFrame, Role, compute, lerp_rect, scale_between};
pub use types::{BoundTag, Measure, MeasuredBounds, Space};
