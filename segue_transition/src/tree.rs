// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transition tree: navigators, screens, and everything keyed by them.

use std::collections::VecDeque;
use std::fmt;

use kurbo::{Size, Vec2};
use segue_bounds::{BoundStore, BoundTag, BoundsContext, Measure, MeasuredBounds};
use segue_gesture::{
    AxisRegistry, DirectionSet, GestureAction, GesturePhase, GestureStore, NavigatorParent,
    PanContext, PanEvent, Recognizer, ScrollState,
};
use smallvec::SmallVec;

use crate::animation::AnimatedValue;
use crate::arena::Arena;
use crate::error::{Result, TransitionError};
use crate::events::TreeEvent;
use crate::interpolator::{
    FrameInputs, InterpolationProps, Layouts, Pipeline, ScreenInterpolator, ScreenState,
};
use crate::session::{ScreenAnimation, TransitionSession};
use crate::style::StylePatchMap;
use crate::types::{InterpolatorState, NavigatorId, Route, ScreenKey};

/// Distance from full progress within which the top screen counts as focused.
const FOCUS_EPSILON: f64 = 1e-3;

struct NavigatorEntry {
    host: Option<ScreenKey>,
    parent: Option<NavigatorId>,
    stack: Vec<ScreenKey>,
}

struct ScreenEntry {
    navigator: NavigatorId,
    route: Route,
    progress: AnimatedValue,
    offset_x: AnimatedValue,
    offset_y: AnimatedValue,
    closing: bool,
    recognizer: Recognizer,
    scroll: Option<ScrollState>,
    pipeline: Pipeline,
    nested: SmallVec<[NavigatorId; 2]>,
}

impl ScreenEntry {
    fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x.value(), self.offset_y.value())
    }

    fn is_animating(&self) -> bool {
        self.progress.is_animating() || self.offset_x.is_animating() || self.offset_y.is_animating()
    }
}

/// Parent lookup over the navigator arena.
struct Ancestry<'a>(&'a Arena<NavigatorId, NavigatorEntry>);

impl NavigatorParent<NavigatorId> for Ancestry<'_> {
    fn parent_of(&self, navigator: &NavigatorId) -> Option<NavigatorId> {
        self.0.get(*navigator)?.parent
    }
}

/// Owner of every screen, navigator, bound measurement and gesture value.
///
/// ## Lifecycle
///
/// - [`push`](Self::push) mounts a screen on a navigator, claims its gesture
///   axes and starts the opening animation.
/// - [`dismiss`](Self::dismiss) (or a gesture dismissal) starts the closing
///   animation; the screen is unmounted when it ends.
/// - Unmounting releases the screen's claims, purges its bounds and gesture
///   values, and removes navigators nested inside it, depth first.
///
/// The host drives time with [`advance`](Self::advance) and asks for styles with
/// [`frame`](Self::frame). Lifecycle notifications queue up until
/// [`drain_events`](Self::drain_events).
pub struct TransitionTree {
    screens: Arena<ScreenKey, ScreenEntry>,
    navigators: Arena<NavigatorId, NavigatorEntry>,
    root: NavigatorId,
    bounds: BoundStore<ScreenKey>,
    gestures: GestureStore<ScreenKey>,
    registry: AxisRegistry<NavigatorId, ScreenKey>,
    layout: Size,
    events: VecDeque<TreeEvent>,
}

impl fmt::Debug for TransitionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionTree")
            .field("screens", &self.screens.len())
            .field("navigators", &self.navigators.len())
            .field("layout", &self.layout)
            .field("pending_events", &self.events.len())
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl TransitionTree {
    /// An empty tree with a root navigator, for a screen of size `layout`.
    pub fn new(layout: Size) -> Self {
        let mut navigators = Arena::default();
        let root = navigators.insert(NavigatorEntry {
            host: None,
            parent: None,
            stack: Vec::new(),
        });
        Self {
            screens: Arena::default(),
            navigators,
            root,
            bounds: BoundStore::new(),
            gestures: GestureStore::new(),
            registry: AxisRegistry::new(),
            layout,
            events: VecDeque::new(),
        }
    }

    /// The root navigator.
    pub fn root(&self) -> NavigatorId {
        self.root
    }

    /// Screen size.
    pub fn layout(&self) -> Size {
        self.layout
    }

    /// Change the screen size, e.g. on rotation.
    pub fn set_layout(&mut self, layout: Size) {
        self.layout = layout;
    }

    /// Create a navigator nested inside `host`.
    ///
    /// Its claims shadow the host navigator's claims on the same axes.
    pub fn add_navigator(&mut self, host: ScreenKey) -> Result<NavigatorId> {
        let parent = self
            .screens
            .get(host)
            .ok_or(TransitionError::UnknownHost(host))?
            .navigator;
        let id = self.navigators.insert(NavigatorEntry {
            host: Some(host),
            parent: Some(parent),
            stack: Vec::new(),
        });
        if let Some(entry) = self.screens.get_mut(host) {
            entry.nested.push(id);
        }
        tracing::debug!(target: "segue::tree", navigator = ?id, host = ?host, "navigator added");
        Ok(id)
    }

    /// Remove a navigator and unmount its screens.
    ///
    /// The root navigator is emptied but kept.
    pub fn remove_navigator(&mut self, id: NavigatorId) -> Result<()> {
        if !self.navigators.contains(id) {
            return Err(TransitionError::UnknownNavigator(id));
        }
        if id == self.root {
            self.clear_stack(id);
        } else {
            self.remove_navigator_inner(id);
        }
        Ok(())
    }

    /// Mount a screen on top of `navigator` and start opening it.
    pub fn push(&mut self, navigator: NavigatorId, route: impl Into<Route>) -> Result<ScreenKey> {
        if !self.navigators.contains(navigator) {
            return Err(TransitionError::UnknownNavigator(navigator));
        }
        let route = route.into();
        let options = &route.options;
        let recognizer = Recognizer::new(&options.gesture);
        let rest = recognizer.rest(&options.gesture);
        let claimed = options.gesture.claimed_directions();
        let animated = options.animation_enabled;
        let mut progress = AnimatedValue::new(0.0);
        if animated {
            progress.animate_to(rest, options.transition_spec.open, 0.0);
        } else {
            progress.set(rest);
        }

        let key = self.screens.insert(ScreenEntry {
            navigator,
            route,
            progress,
            offset_x: AnimatedValue::default(),
            offset_y: AnimatedValue::default(),
            closing: false,
            recognizer,
            scroll: None,
            pipeline: Pipeline::default(),
            nested: SmallVec::new(),
        });
        if let Some(nav) = self.navigators.get_mut(navigator) {
            nav.stack.push(key);
        }
        self.registry.claim_directions(navigator, claimed, key);
        self.gestures.ensure(key);

        self.events.push_back(TreeEvent::Mounted {
            screen: key,
            navigator,
        });
        self.events.push_back(TreeEvent::TransitionStarted {
            screen: key,
            closing: false,
        });
        if !animated {
            self.events.push_back(TreeEvent::TransitionFinished {
                screen: key,
                closing: false,
            });
        }
        tracing::debug!(
            target: "segue::tree",
            screen = ?key,
            navigator = ?navigator,
            claimed = ?claimed,
            "screen pushed"
        );
        Ok(key)
    }

    /// Start closing the top screen of `navigator` that is not already closing.
    ///
    /// Returns the closing screen, or `None` when there is nothing to pop.
    pub fn pop(&mut self, navigator: NavigatorId) -> Result<Option<ScreenKey>> {
        let nav = self
            .navigators
            .get(navigator)
            .ok_or(TransitionError::UnknownNavigator(navigator))?;
        let top = nav
            .stack
            .iter()
            .rev()
            .copied()
            .find(|key| self.screens.get(*key).is_some_and(|s| !s.closing));
        if let Some(key) = top {
            self.dismiss(key)?;
        }
        Ok(top)
    }

    /// Start closing `key`. Closing an already closing screen does nothing.
    ///
    /// A touch in progress on the screen is dropped.
    pub fn dismiss(&mut self, key: ScreenKey) -> Result<()> {
        let entry = self
            .screens
            .get_mut(key)
            .ok_or(TransitionError::UnknownScreen(key))?;
        if entry.closing {
            return Ok(());
        }
        if entry.recognizer.phase() == GesturePhase::Tracking {
            entry.recognizer.reset(self.gestures.ensure(key));
        }
        self.begin_close(key, 0.0, false);
        Ok(())
    }

    /// Unmount `key` immediately, without a closing animation.
    pub fn unmount(&mut self, key: ScreenKey) -> Result<()> {
        if !self.screens.contains(key) {
            return Err(TransitionError::UnknownScreen(key));
        }
        self.remove_screen(key);
        Ok(())
    }

    /// Feed a pan event for the screen under the touch.
    pub fn handle_pan(&mut self, key: ScreenKey, event: PanEvent) -> Result<GestureAction> {
        let owned = self.owned_axes(key)?;
        let layout = self.layout;
        let entry = self
            .screens
            .get_mut(key)
            .ok_or(TransitionError::UnknownScreen(key))?;
        // Programmatic closes cannot be grabbed.
        if entry.closing && entry.recognizer.phase() != GesturePhase::Dismissing {
            return Ok(GestureAction::Ignore);
        }
        let values = self.gestures.ensure(key);
        let ScreenEntry {
            route,
            recognizer,
            progress,
            offset_x,
            offset_y,
            closing,
            scroll,
            ..
        } = entry;
        let ctx = PanContext::new(&route.options.gesture, layout)
            .with_owned(owned)
            .with_progress(progress.value())
            .with_gesture_offset(Vec2::new(offset_x.value(), offset_y.value()))
            .with_scroll(*scroll);
        let action = recognizer.on_pan(&event, &ctx, values);

        let mut dismiss_velocity = None;
        match action {
            GestureAction::Ignore => {}
            GestureAction::Capture { .. } => {
                progress.cancel();
                offset_x.cancel();
                offset_y.cancel();
                if *closing {
                    *closing = false;
                    self.events
                        .push_back(TreeEvent::DismissCancelled { screen: key });
                    tracing::debug!(target: "segue::tree", screen = ?key, "dismissal cancelled by touch");
                }
            }
            GestureAction::Track {
                progress: tracked,
                offset,
            } => {
                if let Some(p) = tracked {
                    progress.set(p);
                }
                offset_x.set(offset.x);
                offset_y.set(offset.y);
            }
            GestureAction::Settle { target, velocity } => {
                let spec = route.options.transition_spec.open;
                progress.animate_to(target, spec, velocity);
                offset_x.animate_to(0.0, spec, 0.0);
                offset_y.animate_to(0.0, spec, 0.0);
            }
            GestureAction::Dismiss { velocity } => dismiss_velocity = Some(velocity),
        }
        if let Some(velocity) = dismiss_velocity {
            self.begin_close(key, velocity, true);
        }
        Ok(action)
    }

    /// Record the nested scrollable under the touch on `key`.
    pub fn set_scroll_state(&mut self, key: ScreenKey, scroll: Option<ScrollState>) -> Result<()> {
        let entry = self
            .screens
            .get_mut(key)
            .ok_or(TransitionError::UnknownScreen(key))?;
        entry.scroll = scroll;
        Ok(())
    }

    /// Axes `key` currently owns, after nested navigators and ancestry.
    ///
    /// Resolution starts at the deepest focused navigator nested inside `key`,
    /// so a nested screen's claim shadows `key`'s claim on the same axis.
    pub fn owned_axes(&self, key: ScreenKey) -> Result<DirectionSet> {
        if !self.screens.contains(key) {
            return Err(TransitionError::UnknownScreen(key));
        }
        let start = self.focused_navigator(key);
        Ok(self
            .registry
            .resolved_axes(start, key, &Ancestry(&self.navigators)))
    }

    /// Advance every animation by `dt` seconds.
    ///
    /// Screens whose closing animation finishes are unmounted.
    pub fn advance(&mut self, dt: f64) {
        let layout = self.layout;
        let keys: Vec<ScreenKey> = self.screens.keys().collect();
        let mut closed = Vec::new();
        for key in keys {
            let Some(entry) = self.screens.get_mut(key) else {
                continue;
            };
            if !entry.is_animating() {
                continue;
            }
            entry.progress.advance(dt);
            entry.offset_x.advance(dt);
            entry.offset_y.advance(dt);
            let releasing = matches!(
                entry.recognizer.phase(),
                GesturePhase::Settling | GesturePhase::Dismissing
            );
            if releasing {
                self.gestures
                    .ensure(key)
                    .set_translation(entry.offset(), layout);
            }
            // A release ends once progress and both offsets are at rest.
            if entry.is_animating() {
                continue;
            }
            if releasing {
                entry.recognizer.on_animation_finished(self.gestures.ensure(key));
            }
            self.events.push_back(TreeEvent::TransitionFinished {
                screen: key,
                closing: entry.closing,
            });
            if entry.closing {
                closed.push(key);
            }
        }
        for key in closed {
            self.remove_screen(key);
        }
    }

    /// True while any screen is animating.
    pub fn is_animating(&self) -> bool {
        self.screens
            .keys()
            .filter_map(|key| self.screens.get(key))
            .any(ScreenEntry::is_animating)
    }

    /// Styles for `key` in the current state.
    ///
    /// A covered screen is styled by the interpolator of the screen above it,
    /// falling back to its own; screens with neither get an empty map.
    pub fn frame(&mut self, key: ScreenKey) -> Result<StylePatchMap> {
        let entry = self
            .screens
            .get_mut(key)
            .ok_or(TransitionError::UnknownScreen(key))?;
        let mut pipeline = std::mem::take(&mut entry.pipeline);

        let output = match self.frame_props(key) {
            Some((props, bound_pending)) => {
                let inputs = FrameInputs::new(&props, &self.bounds);
                let interpolator = self.interpolator_for(&props);
                pipeline.run(interpolator, &props, inputs, bound_pending)
            }
            None => StylePatchMap::new(),
        };

        if let Some(entry) = self.screens.get_mut(key) {
            entry.pipeline = pipeline;
        }
        Ok(output)
    }

    fn interpolator_for(&self, props: &InterpolationProps<'_>) -> Option<&dyn ScreenInterpolator> {
        let of = |key: ScreenKey| self.screens.get(key)?.route.options.interpolator.as_deref();
        props
            .next
            .and_then(|next| of(next.key))
            .or_else(|| of(props.current.key))
    }

    fn frame_props(&self, key: ScreenKey) -> Option<(InterpolationProps<'_>, bool)> {
        let entry = self.screens.get(key)?;
        let stack = &self.navigators.get(entry.navigator)?.stack;
        let index = stack.iter().position(|k| *k == key)?;
        let previous = index.checked_sub(1).and_then(|i| stack.get(i)).copied();
        let next = stack.get(index + 1).copied();

        let current = self.screen_state(key)?;
        let previous = previous.and_then(|k| self.screen_state(k));
        let next = next.and_then(|k| self.screen_state(k));
        let active = next.unwrap_or(current);
        let progress = (current.progress + next.map_or(0.0, |n| n.progress)).clamp(0.0, 2.0);
        let active_bound_id = self
            .screens
            .get(active.key)
            .and_then(|e| e.route.active_bound.as_ref());
        let bound_pending = next.is_none()
            && active_bound_id.is_some_and(|tag| {
                !self.bounds.has_bounds(key, tag.as_str()) || self.bounds.is_pending(key, tag.as_str())
            });

        let bounds = BoundsContext::new(&self.bounds, key, self.layout)
            .with_previous(previous.map(|s| s.key))
            .with_next(next.map(|s| s.key))
            .with_progress(progress);
        let props = InterpolationProps {
            progress,
            current,
            previous,
            next,
            active,
            focused: next.is_none() && (progress - 1.0).abs() < FOCUS_EPSILON,
            layouts: Layouts {
                screen: self.layout,
            },
            bounds,
            active_bound_id,
            gestures: active.gesture,
        };
        Some((props, bound_pending))
    }

    fn screen_state(&self, key: ScreenKey) -> Option<ScreenState<'_>> {
        let entry = self.screens.get(key)?;
        Some(ScreenState {
            key,
            progress: entry.progress.value(),
            closing: entry.closing,
            animating: entry.is_animating(),
            gesture: self.gestures.snapshot(key),
            params: &entry.route.params,
        })
    }

    /// Whether `key`'s interpolator has produced output.
    pub fn interpolator_state(&self, key: ScreenKey) -> Result<InterpolatorState> {
        self.screens
            .get(key)
            .map(|e| e.pipeline.state())
            .ok_or(TransitionError::UnknownScreen(key))
    }

    /// Number of times `key`'s interpolator has actually been invoked.
    pub fn interpolator_runs(&self, key: ScreenKey) -> Result<u64> {
        self.screens
            .get(key)
            .map(|e| e.pipeline.runs())
            .ok_or(TransitionError::UnknownScreen(key))
    }

    /// Snapshot of `key`'s animation and gesture state.
    pub fn screen_animation(&self, key: ScreenKey) -> Result<ScreenAnimation> {
        let entry = self
            .screens
            .get(key)
            .ok_or(TransitionError::UnknownScreen(key))?;
        Ok(ScreenAnimation {
            progress: entry.progress.value(),
            gesture_offset: entry.offset(),
            closing: entry.closing,
            animating: entry.is_animating(),
            phase: entry.recognizer.phase(),
            snap_index: entry.recognizer.snap_index(),
            gesture: self.gestures.snapshot(key),
            interpolator: entry.pipeline.state(),
        })
    }

    /// A handle scoped to `key`.
    pub fn session(&mut self, key: ScreenKey) -> Result<TransitionSession<'_>> {
        if !self.screens.contains(key) {
            return Err(TransitionError::UnknownScreen(key));
        }
        Ok(TransitionSession::new(self, key))
    }

    /// Store a measurement for `key`.
    pub fn set_bounds(
        &mut self,
        key: ScreenKey,
        tag: impl Into<BoundTag>,
        measured: MeasuredBounds,
    ) -> Result<()> {
        self.check_screen(key)?;
        self.bounds.set_bounds(key, tag, measured);
        Ok(())
    }

    /// Measure `view` through the host and store the result for `key`.
    pub fn measure<V>(
        &mut self,
        key: ScreenKey,
        tag: impl Into<BoundTag>,
        host: &impl Measure<V>,
        view: &V,
    ) -> Result<Option<MeasuredBounds>> {
        self.check_screen(key)?;
        Ok(self.bounds.measure(key, tag, host, view))
    }

    /// Note that a measurement for `key` has been requested from the host.
    pub fn request_measurement(&mut self, key: ScreenKey, tag: impl Into<BoundTag>) -> Result<()> {
        self.check_screen(key)?;
        self.bounds.request_measurement(key, tag);
        Ok(())
    }

    /// Deliver a requested measurement. Returns `false` if it was not pending.
    pub fn complete_measurement(
        &mut self,
        key: ScreenKey,
        tag: &str,
        measured: MeasuredBounds,
    ) -> Result<bool> {
        self.check_screen(key)?;
        Ok(self.bounds.complete_measurement(key, tag, measured))
    }

    /// Measured bounds of every screen.
    pub fn bounds(&self) -> &BoundStore<ScreenKey> {
        &self.bounds
    }

    /// Gesture values of every screen.
    pub fn gestures(&self) -> &GestureStore<ScreenKey> {
        &self.gestures
    }

    /// Axis claims of every navigator.
    pub fn registry(&self) -> &AxisRegistry<NavigatorId, ScreenKey> {
        &self.registry
    }

    /// Screens of `navigator`, bottom first.
    pub fn stack(&self, navigator: NavigatorId) -> Result<&[ScreenKey]> {
        self.navigators
            .get(navigator)
            .map(|n| n.stack.as_slice())
            .ok_or(TransitionError::UnknownNavigator(navigator))
    }

    /// Navigator `key` belongs to.
    pub fn navigator_of(&self, key: ScreenKey) -> Result<NavigatorId> {
        self.screens
            .get(key)
            .map(|e| e.navigator)
            .ok_or(TransitionError::UnknownScreen(key))
    }

    /// Navigators nested inside `key`.
    pub fn nested_navigators(&self, key: ScreenKey) -> Result<&[NavigatorId]> {
        self.screens
            .get(key)
            .map(|e| e.nested.as_slice())
            .ok_or(TransitionError::UnknownScreen(key))
    }

    /// Screen hosting `navigator`, or `None` for the root.
    pub fn host_of(&self, navigator: NavigatorId) -> Result<Option<ScreenKey>> {
        self.navigators
            .get(navigator)
            .map(|n| n.host)
            .ok_or(TransitionError::UnknownNavigator(navigator))
    }

    /// True when `key` is mounted.
    pub fn is_mounted(&self, key: ScreenKey) -> bool {
        self.screens.contains(key)
    }

    /// True when `navigator` exists.
    pub fn has_navigator(&self, navigator: NavigatorId) -> bool {
        self.navigators.contains(navigator)
    }

    /// Number of mounted screens.
    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    /// Take the queued lifecycle events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = TreeEvent> + '_ {
        self.events.drain(..)
    }

    fn check_screen(&self, key: ScreenKey) -> Result<()> {
        if self.screens.contains(key) {
            Ok(())
        } else {
            Err(TransitionError::UnknownScreen(key))
        }
    }

    fn focused_navigator(&self, key: ScreenKey) -> NavigatorId {
        let Some(entry) = self.screens.get(key) else {
            return self.root;
        };
        let mut navigator = entry.navigator;
        let mut screen = key;
        while let Some(entry) = self.screens.get(screen)
            && let Some((nested, top)) = entry.nested.iter().rev().find_map(|n| {
                let top = *self.navigators.get(*n)?.stack.last()?;
                Some((*n, top))
            })
        {
            navigator = nested;
            screen = top;
        }
        navigator
    }

    fn begin_close(&mut self, key: ScreenKey, velocity: f64, from_gesture: bool) {
        let Some(entry) = self.screens.get_mut(key) else {
            return;
        };
        entry.closing = true;
        let navigator = entry.navigator;
        if from_gesture {
            self.events.push_back(TreeEvent::DismissRequested {
                screen: key,
                navigator,
            });
        }
        self.events.push_back(TreeEvent::TransitionStarted {
            screen: key,
            closing: true,
        });
        tracing::debug!(
            target: "segue::tree",
            screen = ?key,
            velocity,
            from_gesture,
            "screen closing"
        );
        if entry.route.options.animation_enabled {
            let spec = entry.route.options.transition_spec.close;
            entry.progress.animate_to(0.0, spec, velocity);
            entry.offset_x.animate_to(0.0, spec, 0.0);
            entry.offset_y.animate_to(0.0, spec, 0.0);
        } else {
            self.events.push_back(TreeEvent::TransitionFinished {
                screen: key,
                closing: true,
            });
            self.remove_screen(key);
        }
    }

    fn remove_screen(&mut self, key: ScreenKey) {
        let Some(entry) = self.screens.remove(key) else {
            return;
        };
        for nested in entry.nested.iter().rev() {
            self.remove_navigator_inner(*nested);
        }
        let released = self.registry.release_screen(entry.navigator, key);
        let purged = self.bounds.clear_screen(key);
        self.gestures.clear(key);
        if let Some(nav) = self.navigators.get_mut(entry.navigator) {
            nav.stack.retain(|k| *k != key);
        }
        self.events.push_back(TreeEvent::Unmounted {
            screen: key,
            navigator: entry.navigator,
        });
        tracing::debug!(
            target: "segue::tree",
            screen = ?key,
            released = ?released,
            purged_bounds = purged,
            "screen unmounted"
        );
    }

    fn clear_stack(&mut self, navigator: NavigatorId) {
        let stack = self
            .navigators
            .get(navigator)
            .map(|n| n.stack.clone())
            .unwrap_or_default();
        for key in stack.into_iter().rev() {
            self.remove_screen(key);
        }
        self.registry.release_navigator(navigator);
    }

    fn remove_navigator_inner(&mut self, id: NavigatorId) {
        self.clear_stack(id);
        let Some(nav) = self.navigators.remove(id) else {
            return;
        };
        if let Some(host) = nav.host
            && let Some(entry) = self.screens.get_mut(host)
        {
            entry.nested.retain(|n| *n != id);
        }
        tracing::debug!(target: "segue::tree", navigator = ?id, "navigator removed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{ScreenOptions, TransitionSpec, TransitionSpecs};
    use segue_gesture::{GestureAxis, GestureConfig};

    const SCREEN: Size = Size::new(400.0, 800.0);
    const FRAME: f64 = 1.0 / 60.0;

    fn quick(options: ScreenOptions) -> ScreenOptions {
        options.with_transition_spec(TransitionSpecs::both(TransitionSpec::timing(0.25)))
    }

    fn vertical() -> ScreenOptions {
        quick(ScreenOptions::default().with_gesture(GestureConfig::enabled(GestureAxis::Vertical)))
    }

    fn settle(tree: &mut TransitionTree) {
        for _ in 0..600 {
            if !tree.is_animating() {
                return;
            }
            tree.advance(FRAME);
        }
        panic!("animations did not settle");
    }

    fn down(y: f64) -> PanEvent {
        PanEvent::changed(Vec2::new(0.0, y), Vec2::ZERO)
    }

    /// Touch, activate, drag to `y` and release.
    fn swipe_down(tree: &mut TransitionTree, key: ScreenKey, y: f64) -> GestureAction {
        tree.handle_pan(key, PanEvent::began()).unwrap();
        tree.handle_pan(key, down(10.0)).unwrap();
        tree.handle_pan(key, down(y)).unwrap();
        tree.handle_pan(key, PanEvent::ended(Vec2::new(0.0, y), Vec2::ZERO))
            .unwrap()
    }

    #[test]
    fn push_opens_and_claims() {
        let mut tree = TransitionTree::new(SCREEN);
        let root = tree.root();
        let a = tree.push(root, vertical()).unwrap();
        let events: Vec<_> = tree.drain_events().collect();
        assert_eq!(
            events,
            [
                TreeEvent::Mounted {
                    screen: a,
                    navigator: root
                },
                TreeEvent::TransitionStarted {
                    screen: a,
                    closing: false
                },
            ]
        );
        assert_eq!(tree.screen_animation(a).unwrap().progress, 0.0);
        settle(&mut tree);
        assert_eq!(tree.screen_animation(a).unwrap().progress, 1.0);
        assert!(
            tree.drain_events()
                .eq([TreeEvent::TransitionFinished {
                    screen: a,
                    closing: false
                }])
        );
        assert_eq!(tree.registry().owner(root, GestureAxis::Vertical), Some(a));
        assert_eq!(tree.owned_axes(a).unwrap(), DirectionSet::VERTICAL);
    }

    #[test]
    fn ownership_falls_back_as_screens_leave() {
        let mut tree = TransitionTree::new(SCREEN);
        let root = tree.root();
        let a = tree.push(root, vertical()).unwrap();
        let b = tree.push(root, vertical()).unwrap();
        let c = tree.push(root, vertical()).unwrap();
        settle(&mut tree);
        assert_eq!(tree.owned_axes(c).unwrap(), DirectionSet::VERTICAL);
        assert!(tree.owned_axes(b).unwrap().is_empty());

        tree.dismiss(c).unwrap();
        settle(&mut tree);
        assert!(!tree.is_mounted(c));
        assert_eq!(tree.owned_axes(b).unwrap(), DirectionSet::VERTICAL);
        assert_eq!(tree.stack(root).unwrap(), [a, b]);

        // Removing the middle of the stack keeps the top as owner.
        tree.unmount(a).unwrap();
        assert_eq!(tree.registry().owner(root, GestureAxis::Vertical), Some(b));
    }

    #[test]
    fn stale_handles_are_rejected() {
        let mut tree = TransitionTree::new(SCREEN);
        let root = tree.root();
        let a = tree.push(root, vertical()).unwrap();
        tree.unmount(a).unwrap();
        let b = tree.push(root, vertical()).unwrap();
        assert_ne!(a, b);
        assert!(!tree.is_mounted(a));
        assert_eq!(tree.frame(a), Err(TransitionError::UnknownScreen(a)));
        assert_eq!(
            tree.handle_pan(a, PanEvent::began()),
            Err(TransitionError::UnknownScreen(a))
        );
        assert_eq!(tree.dismiss(a), Err(TransitionError::UnknownScreen(a)));
        assert_eq!(tree.add_navigator(a), Err(TransitionError::UnknownHost(a)));
        assert!(tree.session(a).is_err());
        assert!(tree.is_mounted(b));
    }

    #[test]
    fn gesture_dismissal_unmounts_after_animation() {
        let mut tree = TransitionTree::new(SCREEN);
        let root = tree.root();
        let a = tree.push(root, vertical()).unwrap();
        tree.set_bounds(a, "hero", MeasuredBounds::from_page(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        settle(&mut tree);
        tree.drain_events().for_each(drop);

        assert!(matches!(
            swipe_down(&mut tree, a, 600.0),
            GestureAction::Dismiss { .. }
        ));
        let events: Vec<_> = tree.drain_events().collect();
        assert_eq!(
            events,
            [
                TreeEvent::DismissRequested {
                    screen: a,
                    navigator: root
                },
                TreeEvent::TransitionStarted {
                    screen: a,
                    closing: true
                },
            ]
        );
        assert!(tree.is_mounted(a));
        assert!(tree.screen_animation(a).unwrap().gesture.dismissing);

        settle(&mut tree);
        assert!(!tree.is_mounted(a));
        let events: Vec<_> = tree.drain_events().collect();
        assert_eq!(
            events,
            [
                TreeEvent::TransitionFinished {
                    screen: a,
                    closing: true
                },
                TreeEvent::Unmounted {
                    screen: a,
                    navigator: root
                },
            ]
        );
        assert!(!tree.bounds().has_bounds(a, "hero"));
        assert!(tree.gestures().get(a).is_none());
        assert!(tree.registry().is_empty());
    }

    #[test]
    fn short_release_settles_back_to_rest() {
        let mut tree = TransitionTree::new(SCREEN);
        let a = tree.push(tree.root(), vertical()).unwrap();
        settle(&mut tree);
        assert!(matches!(
            swipe_down(&mut tree, a, 110.0),
            GestureAction::Settle { target, .. } if target == 1.0
        ));
        let mid = tree.screen_animation(a).unwrap();
        assert_eq!(mid.phase, GesturePhase::Settling);
        assert_eq!(mid.gesture_offset, Vec2::new(0.0, 100.0));

        settle(&mut tree);
        let rest = tree.screen_animation(a).unwrap();
        assert_eq!(rest.progress, 1.0);
        assert_eq!(rest.gesture_offset, Vec2::ZERO);
        assert_eq!(rest.phase, GesturePhase::Idle);
        assert_eq!(rest.gesture, Default::default());
        assert!(tree.is_mounted(a));
    }

    #[test]
    fn spring_settle_keeps_gesture_values_until_offsets_rest() {
        let mut tree = TransitionTree::new(SCREEN);
        let options = ScreenOptions::default().with_gesture(
            GestureConfig::enabled(GestureAxis::Vertical).with_drives_progress(false),
        );
        let a = tree.push(tree.root(), options).unwrap();
        settle(&mut tree);
        tree.drain_events().for_each(drop);

        assert!(matches!(
            swipe_down(&mut tree, a, 210.0),
            GestureAction::Settle { velocity, .. } if velocity == 0.0
        ));
        let mut frames = 0;
        while tree.is_animating() {
            let anim = tree.screen_animation(a).unwrap();
            assert_eq!(anim.phase, GesturePhase::Settling, "frame {frames}");
            assert_eq!(anim.gesture.y, anim.gesture_offset.y, "frame {frames}");
            assert_eq!(anim.progress, 1.0, "frame {frames}");
            assert!(
                !tree.drain_events().any(|e| matches!(e, TreeEvent::TransitionFinished { .. })),
                "finished early at frame {frames}"
            );
            tree.advance(FRAME);
            frames += 1;
            assert!(frames < 2000, "settle never ended");
        }
        assert!(frames > 1);

        let rest = tree.screen_animation(a).unwrap();
        assert_eq!(rest.phase, GesturePhase::Idle);
        assert_eq!(rest.gesture_offset, Vec2::ZERO);
        assert_eq!(rest.gesture, Default::default());
        assert_eq!(
            tree.drain_events().collect::<Vec<_>>(),
            [TreeEvent::TransitionFinished {
                screen: a,
                closing: false
            }]
        );
    }

    #[test]
    fn touch_during_dismissal_continues_from_live_progress() {
        let mut tree = TransitionTree::new(SCREEN);
        let options = vertical().with_close_spec(TransitionSpec::timing(1.0));
        let a = tree.push(tree.root(), options).unwrap();
        settle(&mut tree);
        assert!(matches!(
            swipe_down(&mut tree, a, 600.0),
            GestureAction::Dismiss { .. }
        ));
        for _ in 0..15 {
            tree.advance(FRAME);
        }
        tree.drain_events().for_each(drop);
        let live = tree.screen_animation(a).unwrap();
        assert!(live.progress > 0.0 && live.progress < 0.2625);

        assert_eq!(
            tree.handle_pan(a, PanEvent::began()).unwrap(),
            GestureAction::Capture {
                axis: GestureAxis::Vertical,
                interrupted: true
            }
        );
        let grabbed = tree.screen_animation(a).unwrap();
        assert_eq!(grabbed.progress, live.progress);
        assert_eq!(grabbed.gesture_offset, live.gesture_offset);
        assert!(!grabbed.closing);
        assert!(!grabbed.gesture.dismissing);
        assert!(!grabbed.animating);
        assert!(
            tree.drain_events()
                .eq([TreeEvent::DismissCancelled { screen: a }])
        );

        assert_eq!(
            tree.handle_pan(a, PanEvent::changed(Vec2::ZERO, Vec2::ZERO))
                .unwrap(),
            GestureAction::Track {
                progress: Some(live.progress),
                offset: live.gesture_offset
            }
        );
        assert!(matches!(
            tree.handle_pan(a, PanEvent::ended(Vec2::ZERO, Vec2::ZERO))
                .unwrap(),
            GestureAction::Settle { target, .. } if target == 1.0
        ));
        settle(&mut tree);
        assert!(tree.is_mounted(a));
        assert_eq!(tree.screen_animation(a).unwrap().progress, 1.0);
    }

    #[test]
    fn locked_nested_sheet_shadows_host_axis() {
        let mut tree = TransitionTree::new(SCREEN);
        let home_options = quick(
            ScreenOptions::default().with_gesture(GestureConfig::enabled(DirectionSet::BIDIRECTIONAL)),
        );
        let home = tree.push(tree.root(), home_options).unwrap();
        let nested = tree.add_navigator(home).unwrap();
        assert_eq!(tree.host_of(nested).unwrap(), Some(home));
        let locked = quick(
            ScreenOptions::default()
                .with_gesture(GestureConfig::enabled(GestureAxis::Vertical).with_snap_locked(true)),
        );
        let sheet = tree.push(nested, locked).unwrap();
        settle(&mut tree);

        assert_eq!(tree.owned_axes(sheet).unwrap(), DirectionSet::VERTICAL);
        let home_axes = tree.owned_axes(home).unwrap();
        assert!(!home_axes.has(GestureAxis::Vertical));
        assert!(home_axes.has(GestureAxis::Horizontal));

        // The locked sheet swallows the swipe without moving.
        tree.handle_pan(sheet, PanEvent::began()).unwrap();
        assert!(matches!(
            tree.handle_pan(sheet, down(10.0)).unwrap(),
            GestureAction::Capture { .. }
        ));
        assert_eq!(
            tree.handle_pan(sheet, down(700.0)).unwrap(),
            GestureAction::Track {
                progress: None,
                offset: Vec2::ZERO
            }
        );
        let end = tree
            .handle_pan(sheet, PanEvent::ended(Vec2::new(0.0, 700.0), Vec2::new(0.0, 5000.0)))
            .unwrap();
        assert!(matches!(end, GestureAction::Settle { .. }));
        settle(&mut tree);
        assert!(tree.is_mounted(sheet));
        assert!(tree.is_mounted(home));

        // The host cannot take the vertical axis while the sheet is up.
        tree.handle_pan(home, PanEvent::began()).unwrap();
        assert_eq!(tree.handle_pan(home, down(50.0)).unwrap(), GestureAction::Ignore);
        tree.handle_pan(home, PanEvent::cancelled()).unwrap();

        tree.dismiss(sheet).unwrap();
        settle(&mut tree);
        assert_eq!(tree.owned_axes(home).unwrap(), DirectionSet::BIDIRECTIONAL);
    }

    #[test]
    fn unmount_removes_nested_navigators() {
        let mut tree = TransitionTree::new(SCREEN);
        let root = tree.root();
        let home = tree.push(root, vertical()).unwrap();
        let nested = tree.add_navigator(home).unwrap();
        let s1 = tree.push(nested, vertical()).unwrap();
        let s2 = tree.push(nested, vertical()).unwrap();
        let inner = tree.add_navigator(s2).unwrap();
        let s3 = tree.push(inner, vertical()).unwrap();
        assert_eq!(tree.nested_navigators(home).unwrap(), [nested]);
        tree.drain_events().for_each(drop);

        tree.unmount(home).unwrap();
        for key in [home, s1, s2, s3] {
            assert!(!tree.is_mounted(key));
        }
        assert!(!tree.has_navigator(nested));
        assert!(!tree.has_navigator(inner));
        assert!(tree.has_navigator(root));
        assert!(tree.registry().is_empty());
        assert_eq!(tree.screen_count(), 0);

        let unmounted: Vec<_> = tree
            .drain_events()
            .filter_map(|e| match e {
                TreeEvent::Unmounted { screen, .. } => Some(screen),
                _ => None,
            })
            .collect();
        assert_eq!(unmounted, [s3, s2, s1, home]);
    }

    #[test]
    fn pop_takes_top_screen_not_already_closing() {
        let mut tree = TransitionTree::new(SCREEN);
        let root = tree.root();
        let a = tree.push(root, vertical()).unwrap();
        let b = tree.push(root, vertical()).unwrap();
        assert_eq!(tree.pop(root).unwrap(), Some(b));
        assert_eq!(tree.pop(root).unwrap(), Some(a));
        assert_eq!(tree.pop(root).unwrap(), None);
        settle(&mut tree);
        assert_eq!(tree.screen_count(), 0);
        assert_eq!(tree.pop(root).unwrap(), None);
    }

    #[test]
    fn programmatic_close_ignores_touches() {
        let mut tree = TransitionTree::new(SCREEN);
        let a = tree.push(tree.root(), vertical()).unwrap();
        settle(&mut tree);
        tree.dismiss(a).unwrap();
        assert_eq!(
            tree.handle_pan(a, PanEvent::began()).unwrap(),
            GestureAction::Ignore
        );
        assert_eq!(tree.handle_pan(a, down(100.0)).unwrap(), GestureAction::Ignore);
        assert!(tree.screen_animation(a).unwrap().closing);
    }

    #[test]
    fn disabled_animation_jumps_to_end_state() {
        let mut tree = TransitionTree::new(SCREEN);
        let a = tree
            .push(tree.root(), vertical().with_animation_enabled(false))
            .unwrap();
        assert_eq!(tree.screen_animation(a).unwrap().progress, 1.0);
        assert!(!tree.is_animating());
        tree.dismiss(a).unwrap();
        assert!(!tree.is_mounted(a));
        let events: Vec<_> = tree.drain_events().collect();
        assert_eq!(events.len(), 6);
        assert!(matches!(events[5], TreeEvent::Unmounted { .. }));
    }

    #[test]
    fn removing_root_empties_it() {
        let mut tree = TransitionTree::new(SCREEN);
        let root = tree.root();
        tree.push(root, vertical()).unwrap();
        tree.push(root, vertical()).unwrap();
        tree.remove_navigator(root).unwrap();
        assert_eq!(tree.screen_count(), 0);
        assert!(tree.has_navigator(root));
        assert!(tree.stack(root).unwrap().is_empty());
        assert!(tree.push(root, vertical()).is_ok());
    }

    #[test]
    fn removing_nested_navigator_detaches_it_from_host() {
        let mut tree = TransitionTree::new(SCREEN);
        let home = tree.push(tree.root(), vertical()).unwrap();
        let nested = tree.add_navigator(home).unwrap();
        let s = tree.push(nested, vertical()).unwrap();
        tree.remove_navigator(nested).unwrap();
        assert!(!tree.is_mounted(s));
        assert!(tree.nested_navigators(home).unwrap().is_empty());
        assert_eq!(
            tree.remove_navigator(nested),
            Err(TransitionError::UnknownNavigator(nested))
        );
        assert_eq!(
            tree.push(nested, vertical()),
            Err(TransitionError::UnknownNavigator(nested))
        );
    }

    #[test]
    fn scrolled_content_keeps_the_touch() {
        let mut tree = TransitionTree::new(SCREEN);
        let a = tree.push(tree.root(), vertical()).unwrap();
        settle(&mut tree);
        let list = ScrollState::new(Vec2::new(0.0, 300.0), Size::new(400.0, 3000.0), SCREEN);
        tree.set_scroll_state(a, Some(list)).unwrap();
        tree.handle_pan(a, PanEvent::began()).unwrap();
        assert_eq!(tree.handle_pan(a, down(200.0)).unwrap(), GestureAction::Ignore);
        assert_eq!(tree.screen_animation(a).unwrap().phase, GesturePhase::Idle);
    }

    #[test]
    fn frame_without_interpolator_is_empty() {
        let mut tree = TransitionTree::new(SCREEN);
        let a = tree.push(tree.root(), vertical()).unwrap();
        assert_eq!(
            tree.interpolator_state(a).unwrap(),
            InterpolatorState::Undetermined
        );
        assert!(tree.frame(a).unwrap().is_empty());
        assert_eq!(tree.interpolator_state(a).unwrap(), InterpolatorState::Undefined);
    }
}
