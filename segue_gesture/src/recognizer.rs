// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan gesture recognizer.
//!
//! ## States
//!
//! `Idle → Tracking → (Settling | Dismissing) → Idle`.
//!
//! - A touch that begins while `Idle` is *armed*. It is captured once its
//!   dominant-axis travel exceeds the activation distance and the screen owns
//!   that axis. A touch on an axis the screen does not own is ignored for the
//!   rest of its lifetime.
//! - While armed over a nested scrollable, the boundary check runs on every
//!   movement. As long as the scrollable consumes the drag, the baseline moves
//!   with the finger, so capture starts from zero travel.
//! - A touch that begins while `Settling` or `Dismissing` is captured at once
//!   and continues from the live progress and offset; the caller cancels the
//!   running animation.
//! - On release the [dismissal decision](crate::determine_dismissal) (or the
//!   [snap target](crate::determine_snap_target) for sheets) picks the outcome.
//! - [`Recognizer::on_animation_finished`] returns to `Idle` and resets the
//!   gesture values.
//!
//! Ownership is resolved by the caller and passed in [`PanContext::owned`];
//! handoff to another owner is only possible between touches.

use kurbo::{Size, Vec2};

use crate::config::GestureConfig;
use crate::dismissal::{determine_dismissal, normalize_velocity};
use crate::scroll::ScrollState;
use crate::snap::determine_snap_target;
use crate::types::{DirectionSet, GestureAxis, PanEvent, PanState};
use crate::values::GestureValues;

/// Recognizer state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No captured touch and no gesture animation.
    #[default]
    Idle,
    /// A captured touch is down.
    Tracking,
    /// Returning to rest after a release.
    Settling,
    /// Leaving the screen after a release crossed the dismiss threshold.
    Dismissing,
}

/// Everything the recognizer reads besides the event itself.
#[derive(Copy, Clone, Debug)]
pub struct PanContext<'a> {
    /// Axes this screen owns after ancestry resolution.
    pub owned: DirectionSet,
    /// Screen size, for normalization.
    pub screen: Size,
    /// Live transition progress.
    pub progress: f64,
    /// Live gesture offset.
    pub gesture_offset: Vec2,
    /// Nested scrollable under the touch.
    pub scroll: Option<ScrollState>,
    /// Screen configuration.
    pub config: &'a GestureConfig,
}

impl<'a> PanContext<'a> {
    /// Context at rest (progress `1`, no offset) owning no axes.
    pub fn new(config: &'a GestureConfig, screen: Size) -> Self {
        Self {
            owned: DirectionSet::empty(),
            screen,
            progress: 1.0,
            gesture_offset: Vec2::ZERO,
            scroll: None,
            config,
        }
    }

    /// Set the owned axes.
    #[must_use]
    pub fn with_owned(mut self, owned: DirectionSet) -> Self {
        self.owned = owned;
        self
    }

    /// Set the live progress.
    #[must_use]
    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    /// Set the live gesture offset.
    #[must_use]
    pub fn with_gesture_offset(mut self, offset: Vec2) -> Self {
        self.gesture_offset = offset;
        self
    }

    /// Set the nested scrollable state.
    #[must_use]
    pub fn with_scroll(mut self, scroll: Option<ScrollState>) -> Self {
        self.scroll = scroll;
        self
    }
}

/// What the caller should do after an event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureAction {
    /// Nothing; the touch belongs to someone else or has not activated.
    Ignore,
    /// The touch was captured on `axis`.
    Capture {
        /// Captured axis.
        axis: GestureAxis,
        /// A running settle or dismiss animation must be cancelled.
        interrupted: bool,
    },
    /// The captured touch moved.
    Track {
        /// New progress, when the gesture drives progress.
        progress: Option<f64>,
        /// New gesture offset.
        offset: Vec2,
    },
    /// Animate back to rest.
    Settle {
        /// Progress to animate to.
        target: f64,
        /// Initial velocity in progress units per second.
        velocity: f64,
    },
    /// Dismiss the screen; the host should pop it.
    Dismiss {
        /// Initial velocity in progress units per second.
        velocity: f64,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TouchStatus {
    Armed,
    Captured,
    Rejected,
}

#[derive(Copy, Clone, Debug)]
struct Touch {
    status: TouchStatus,
    baseline: Vec2,
    axis: Option<GestureAxis>,
    start_progress: f64,
    start_offset: Vec2,
}

impl Touch {
    fn new(status: TouchStatus, baseline: Vec2) -> Self {
        Self {
            status,
            baseline,
            axis: None,
            start_progress: 0.0,
            start_offset: Vec2::ZERO,
        }
    }
}

/// Per-screen pan recognizer.
#[derive(Clone, Debug, Default)]
pub struct Recognizer {
    phase: GesturePhase,
    touch: Option<Touch>,
    snap_index: Option<usize>,
}

impl Recognizer {
    /// A recognizer at rest, opened to `config`'s initial snap point.
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            phase: GesturePhase::Idle,
            touch: None,
            snap_index: config.initial_snap(),
        }
    }

    /// Current state.
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Snap point the sheet currently rests at.
    pub fn snap_index(&self) -> Option<usize> {
        self.snap_index
    }

    /// Progress the screen rests at.
    pub fn rest(&self, config: &GestureConfig) -> f64 {
        config.snap_progress(self.snap_index)
    }

    /// Feed one pan event.
    pub fn on_pan(
        &mut self,
        event: &PanEvent,
        ctx: &PanContext<'_>,
        values: &mut GestureValues,
    ) -> GestureAction {
        if !ctx.config.enabled {
            self.touch = None;
            return GestureAction::Ignore;
        }
        match event.state {
            PanState::Began => self.begin(event, ctx, values),
            PanState::Changed => self.update(event, ctx, values),
            PanState::Ended => self.end(event, ctx, values, false),
            PanState::Cancelled => self.end(event, ctx, values, true),
        }
    }

    /// The settle or dismiss animation completed.
    pub fn on_animation_finished(&mut self, values: &mut GestureValues) {
        if self.phase == GesturePhase::Tracking {
            return;
        }
        self.phase = GesturePhase::Idle;
        values.reset();
    }

    /// Drop any touch and return to `Idle`, e.g. when the screen is popped programmatically.
    pub fn reset(&mut self, values: &mut GestureValues) {
        self.touch = None;
        self.phase = GesturePhase::Idle;
        values.reset();
    }

    fn begin(
        &mut self,
        event: &PanEvent,
        ctx: &PanContext<'_>,
        values: &mut GestureValues,
    ) -> GestureAction {
        if self.phase == GesturePhase::Tracking {
            return GestureAction::Ignore;
        }
        if ctx.owned.is_empty() {
            self.touch = Some(Touch::new(TouchStatus::Rejected, event.translation));
            return GestureAction::Ignore;
        }
        let animating = matches!(
            self.phase,
            GesturePhase::Settling | GesturePhase::Dismissing
        );
        if !animating {
            self.touch = Some(Touch::new(TouchStatus::Armed, event.translation));
            return GestureAction::Ignore;
        }

        // Grab the screen mid-animation.
        let axis = values
            .direction()
            .get()
            .filter(|axis| ctx.owned.has(*axis))
            .or_else(|| ctx.owned.axes().next());
        let Some(axis) = axis else {
            return GestureAction::Ignore;
        };
        if self.phase == GesturePhase::Dismissing {
            values.set_dismissing(false);
        }
        self.capture(axis, event.translation, ctx, values);
        tracing::debug!(
            target: "segue::gesture",
            axis = ?axis,
            progress = ctx.progress,
            "animation interrupted by touch"
        );
        GestureAction::Capture {
            axis,
            interrupted: true,
        }
    }

    fn update(
        &mut self,
        event: &PanEvent,
        ctx: &PanContext<'_>,
        values: &mut GestureValues,
    ) -> GestureAction {
        let Some(touch) = self.touch.as_mut() else {
            return GestureAction::Ignore;
        };
        let status = touch.status;
        match status {
            TouchStatus::Rejected => GestureAction::Ignore,
            TouchStatus::Captured => {
                let touch = *touch;
                self.track(&touch, event, ctx, values)
            }
            TouchStatus::Armed => {
                let delta = event.translation - touch.baseline;
                let Some(axis) = GestureAxis::from_delta(delta) else {
                    return GestureAction::Ignore;
                };
                if delta.x.abs().max(delta.y.abs()) <= ctx.config.activation_distance {
                    return GestureAction::Ignore;
                }
                if let Some(scroll) = ctx.scroll
                    && scroll.scrolls_along(axis)
                    && !scroll.yields_to(axis, delta)
                {
                    // The scrollable consumes this stretch of the drag.
                    touch.baseline = event.translation;
                    return GestureAction::Ignore;
                }
                if !ctx.owned.has(axis) {
                    touch.status = TouchStatus::Rejected;
                    tracing::trace!(target: "segue::gesture", axis = ?axis, "touch on unowned axis");
                    return GestureAction::Ignore;
                }
                self.capture(axis, event.translation, ctx, values);
                tracing::debug!(target: "segue::gesture", axis = ?axis, "touch captured");
                GestureAction::Capture {
                    axis,
                    interrupted: false,
                }
            }
        }
    }

    fn capture(
        &mut self,
        axis: GestureAxis,
        baseline: Vec2,
        ctx: &PanContext<'_>,
        values: &mut GestureValues,
    ) {
        self.touch = Some(Touch {
            status: TouchStatus::Captured,
            baseline,
            axis: Some(axis),
            start_progress: ctx.progress,
            start_offset: ctx.gesture_offset,
        });
        self.phase = GesturePhase::Tracking;
        values.set_dragging(true);
        values.set_direction(Some(axis));
        values.set_translation(ctx.gesture_offset, ctx.screen);
    }

    fn track(
        &mut self,
        touch: &Touch,
        event: &PanEvent,
        ctx: &PanContext<'_>,
        values: &mut GestureValues,
    ) -> GestureAction {
        if ctx.config.snap_locked {
            return GestureAction::Track {
                progress: None,
                offset: touch.start_offset,
            };
        }
        let travel = event.translation - touch.baseline;
        let offset = touch.start_offset + travel;
        values.set_translation(offset, ctx.screen);
        let progress = ctx
            .config
            .drives_progress
            .then(|| tracked_progress(touch, travel, ctx));
        GestureAction::Track { progress, offset }
    }

    fn end(
        &mut self,
        event: &PanEvent,
        ctx: &PanContext<'_>,
        values: &mut GestureValues,
        cancelled: bool,
    ) -> GestureAction {
        let Some(touch) = self.touch.take() else {
            return GestureAction::Ignore;
        };
        let (TouchStatus::Captured, Some(axis)) = (touch.status, touch.axis) else {
            return GestureAction::Ignore;
        };
        values.set_dragging(false);
        let config = ctx.config;

        if cancelled || config.snap_locked {
            self.phase = GesturePhase::Settling;
            return GestureAction::Settle {
                target: self.rest(config),
                velocity: 0.0,
            };
        }

        let travel = event.translation - touch.baseline;
        let offset = touch.start_offset + travel;
        values.set_translation(offset, ctx.screen);

        if !config.snap_points.is_empty() {
            let extent = axis.extent(ctx.screen);
            let velocity = -normalize_velocity(axis.component(event.velocity), extent);
            let target = determine_snap_target(
                tracked_progress(&touch, travel, ctx),
                velocity,
                &config.snap_points,
                config.velocity_impact,
                ctx.owned.has(axis),
            );
            if target.dismiss {
                return self.dismiss(velocity, values);
            }
            self.snap_index = target.index.or(self.snap_index);
            self.phase = GesturePhase::Settling;
            return GestureAction::Settle {
                target: target.progress,
                velocity,
            };
        }

        let decision = determine_dismissal(
            offset,
            event.velocity,
            ctx.screen,
            ctx.owned,
            config.velocity_impact,
        );
        if decision.should_dismiss {
            return self.dismiss(-decision.velocity, values);
        }
        self.phase = GesturePhase::Settling;
        // Progress never moved unless the drag drove it.
        let velocity = if config.drives_progress {
            -decision.velocity
        } else {
            0.0
        };
        GestureAction::Settle {
            target: self.rest(config),
            velocity,
        }
    }

    fn dismiss(&mut self, velocity: f64, values: &mut GestureValues) -> GestureAction {
        self.phase = GesturePhase::Dismissing;
        values.set_dismissing(true);
        GestureAction::Dismiss { velocity }
    }
}

/// Progress after `travel` since capture: travel toward dismissal lowers it.
fn tracked_progress(touch: &Touch, travel: Vec2, ctx: &PanContext<'_>) -> f64 {
    let Some(axis) = touch.axis else {
        return touch.start_progress;
    };
    let extent = axis.extent(ctx.screen);
    if extent <= 0.0 {
        return touch.start_progress;
    }
    (touch.start_progress - axis.component(travel) / extent).clamp(0.0, ctx.config.max_progress())
}
