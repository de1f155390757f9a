// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated scalar driving transition progress and gesture offsets.
//!
//! Springs integrate with semi-implicit Euler in steps of at most
//! [`MAX_STEP_SECS`], so a long frame is subdivided rather than overshooting.
//! Springs never overshoot their target: crossing it ends the animation there.

use crate::options::{Easing, TransitionSpec};

/// Longest single integration step for springs, in seconds.
pub const MAX_STEP_SECS: f64 = 0.004;

/// Distance from the target below which a spring may come to rest.
pub const REST_THRESHOLD: f64 = 0.001;

/// Speed below which a spring may come to rest.
pub const VELOCITY_THRESHOLD: f64 = 0.01;

const MIN_STIFFNESS: f64 = 0.1;

#[derive(Copy, Clone, Debug, PartialEq)]
enum Running {
    Timing {
        from: f64,
        to: f64,
        duration: f64,
        easing: Easing,
        elapsed: f64,
    },
    Spring {
        to: f64,
        stiffness: f64,
        damping: f64,
        mass: f64,
    },
}

impl Running {
    fn target(&self) -> f64 {
        match *self {
            Self::Timing { to, .. } | Self::Spring { to, .. } => to,
        }
    }
}

/// A value that is either at rest or animating toward a target.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AnimatedValue {
    value: f64,
    velocity: f64,
    running: Option<Running>,
}

impl AnimatedValue {
    /// A value at rest.
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            running: None,
        }
    }

    /// Current value.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current velocity in units per second.
    #[inline]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Target of the running animation.
    pub fn target(&self) -> Option<f64> {
        self.running.as_ref().map(Running::target)
    }

    /// True while an animation is running.
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.running.is_some()
    }

    /// Jump to `value`, cancelling any animation.
    pub fn set(&mut self, value: f64) {
        self.value = value;
        self.velocity = 0.0;
        self.running = None;
    }

    /// Start animating toward `to`.
    ///
    /// `velocity` seeds springs; timing animations ignore it.
    pub fn animate_to(&mut self, to: f64, spec: TransitionSpec, velocity: f64) {
        self.running = Some(match spec {
            TransitionSpec::Timing { duration, easing } => {
                self.velocity = 0.0;
                Running::Timing {
                    from: self.value,
                    to,
                    duration: duration.max(0.0),
                    easing,
                    elapsed: 0.0,
                }
            }
            TransitionSpec::Spring {
                stiffness,
                damping,
                mass,
            } => {
                self.velocity = if velocity.is_finite() { velocity } else { 0.0 };
                Running::Spring {
                    to,
                    stiffness: stiffness.max(MIN_STIFFNESS),
                    damping: damping.max(0.0),
                    mass: if mass > 0.0 { mass } else { 1.0 },
                }
            }
        });
    }

    /// Stop the running animation, leaving the value where it is.
    pub fn cancel(&mut self) {
        self.running = None;
        self.velocity = 0.0;
    }

    /// Advance by `dt` seconds. Returns `true` if the animation finished during this call.
    pub fn advance(&mut self, dt: f64) -> bool {
        let Some(mut running) = self.running else {
            return false;
        };
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let done = match &mut running {
            Running::Timing {
                from,
                to,
                duration,
                easing,
                elapsed,
            } => {
                *elapsed += dt;
                let t = if *duration > 0.0 {
                    *elapsed / *duration
                } else {
                    1.0
                };
                let next = *from + (*to - *from) * easing.apply(t);
                self.velocity = if dt > 0.0 {
                    (next - self.value) / dt
                } else {
                    0.0
                };
                self.value = next;
                t >= 1.0
            }
            Running::Spring {
                to,
                stiffness,
                damping,
                mass,
            } => self.step_spring(dt, *to, *stiffness, *damping, *mass),
        };
        if done {
            self.value = running.target();
            self.velocity = 0.0;
            self.running = None;
        } else {
            self.running = Some(running);
        }
        done
    }

    fn step_spring(&mut self, dt: f64, to: f64, stiffness: f64, damping: f64, mass: f64) -> bool {
        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECS);
            let displacement = self.value - to;
            let acceleration = (-stiffness * displacement - damping * self.velocity) / mass;
            self.velocity += acceleration * h;
            self.value += self.velocity * h;
            if (self.value - to) * displacement < 0.0 {
                return true;
            }
            remaining -= h;
        }
        (self.value - to).abs() < REST_THRESHOLD && self.velocity.abs() < VELOCITY_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(value: &mut AnimatedValue, frames: usize) -> usize {
        for i in 0..frames {
            if value.advance(1.0 / 60.0) {
                return i + 1;
            }
        }
        frames
    }

    #[test]
    fn timing_reaches_target_on_schedule() {
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(1.0, TransitionSpec::timing(0.5), 0.0);
        assert!(!v.advance(0.25));
        assert!(v.value() > 0.5, "ease-out is ahead at the midpoint");
        assert!(v.advance(0.25));
        assert_eq!(v.value(), 1.0);
        assert!(!v.is_animating());
        assert!(!v.advance(0.25));
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let mut v = AnimatedValue::new(1.0);
        v.animate_to(0.0, TransitionSpec::timing(0.0), 0.0);
        assert!(v.advance(0.0));
        assert_eq!(v.value(), 0.0);
    }

    #[test]
    fn default_spring_settles_without_overshoot() {
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(1.0, TransitionSpec::DEFAULT_SPRING, 0.0);
        let mut last = 0.0;
        for _ in 0..1200 {
            let done = v.advance(1.0 / 60.0);
            assert!(v.value() <= 1.0);
            assert!(v.value() >= last);
            last = v.value();
            if done {
                break;
            }
        }
        assert_eq!(v.value(), 1.0);
        assert!(!v.is_animating());
    }

    #[test]
    fn fast_flick_clamps_at_target() {
        let mut v = AnimatedValue::new(0.5);
        v.animate_to(0.0, TransitionSpec::spring(300.0, 10.0, 1.0), -40.0);
        let frames = run(&mut v, 600);
        assert!(frames < 600);
        assert_eq!(v.value(), 0.0);
    }

    #[test]
    fn cancel_freezes_value() {
        let mut v = AnimatedValue::new(0.0);
        v.animate_to(1.0, TransitionSpec::timing(1.0), 0.0);
        v.advance(0.5);
        let live = v.value();
        v.cancel();
        assert!(!v.advance(0.5));
        assert_eq!(v.value(), live);
        assert_eq!(v.target(), None);
    }
}
