// Copyright 2025 the Segue Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the axis ownership registry.
//!
//! 1. After any claim/release sequence the stack matches a reference model:
//!    re-claims move to the top and releases remove from any position.
//! 2. Releasing a non-top entry never changes the owner.
//! 3. Releasing the top falls back to the next surviving claim.
//! 4. Claims on one axis never affect another.

use proptest::prelude::*;
use segue_gesture::{AxisRegistry, GestureAxis};

#[derive(Copy, Clone, Debug)]
enum Op {
    Claim(u8),
    Release(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![(0_u8..6).prop_map(Op::Claim), (0_u8..6).prop_map(Op::Release)]
}

fn axis() -> impl Strategy<Value = GestureAxis> {
    prop::sample::select(GestureAxis::ALL.to_vec())
}

proptest! {
    #[test]
    fn stack_matches_model(ops in prop::collection::vec(op(), 0..64)) {
        let mut reg = AxisRegistry::new();
        let mut model: Vec<u8> = Vec::new();
        for op in ops {
            match op {
                Op::Claim(s) => {
                    reg.claim(0_u8, GestureAxis::Vertical, s);
                    model.retain(|k| *k != s);
                    model.push(s);
                }
                Op::Release(s) => {
                    let before = model.last().copied();
                    let held = model.contains(&s);
                    prop_assert_eq!(reg.release(0, GestureAxis::Vertical, s), held);
                    model.retain(|k| *k != s);
                    if held && before != Some(s) {
                        prop_assert_eq!(reg.owner(0, GestureAxis::Vertical), before);
                    }
                }
            }
            prop_assert_eq!(reg.claims(0, GestureAxis::Vertical), model.as_slice());
            prop_assert_eq!(reg.owner(0, GestureAxis::Vertical), model.last().copied());
        }
    }

    #[test]
    fn releasing_everything_leaves_no_owner(
        screens in prop::collection::vec(0_u8..10, 1..12),
        order in any::<prop::sample::Index>(),
    ) {
        let mut reg = AxisRegistry::new();
        for s in &screens {
            reg.claim("nav", GestureAxis::Horizontal, *s);
        }
        let mut remaining = screens.clone();
        while !remaining.is_empty() {
            let s = remaining.remove(order.index(remaining.len()));
            reg.release("nav", GestureAxis::Horizontal, s);
        }
        prop_assert_eq!(reg.owner("nav", GestureAxis::Horizontal), None);
        prop_assert!(reg.is_empty());
    }

    #[test]
    fn top_release_falls_back_to_previous(n in 2_usize..10) {
        let mut reg = AxisRegistry::new();
        for s in 0..n {
            reg.claim(0_u8, GestureAxis::VerticalInverted, s);
        }
        for top in (1..n).rev() {
            reg.release(0, GestureAxis::VerticalInverted, top);
            prop_assert_eq!(reg.owner(0, GestureAxis::VerticalInverted), Some(top - 1));
        }
    }

    #[test]
    fn axes_are_independent(a in axis(), b in axis(), ops in prop::collection::vec(op(), 0..32)) {
        prop_assume!(a != b);
        let mut reg = AxisRegistry::new();
        reg.claim(0_u8, b, 99_u8);
        for op in ops {
            match op {
                Op::Claim(s) => reg.claim(0, a, s),
                Op::Release(s) => {
                    reg.release(0, a, s);
                }
            }
            prop_assert_eq!(reg.owner(0, b), Some(99));
            prop_assert_eq!(reg.claims(0, b), &[99_u8][..]);
        }
    }
}
