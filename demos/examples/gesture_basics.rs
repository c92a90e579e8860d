// Copyright 2026 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A grab lifecycle, step by step.
//!
//! This example walks one hand through hover → grab → release against a single
//! target and prints the events each operation returns.
//!
//! Run:
//! - `cargo run -p grasp_demos --example gesture_basics`

use grasp_gestures::machine::Hands;
use grasp_registry::{TargetFlags, TargetState};

fn main() {
    let mut hands = Hands::new();
    let hand = hands.register_hand();
    let cube = hands.insert_target(TargetFlags::HOVERABLE | TargetFlags::GRABBABLE);

    // Collision tick: the contact becomes a hover.
    let ev = hands.on_hit(hand, cube);
    println!("== Contact ==\n  {:?}", ev);
    assert!(hands.target_state(cube).contains(TargetState::HOVERED));

    // The same contact next tick is silent.
    let ev = hands.on_hit(hand, cube);
    println!("== Contact (repeat) ==\n  {:?}", ev);
    assert!(ev.is_empty());

    // Button press: the hover ends and the carry begins.
    let ev = hands.press_grab(hand);
    println!("== Grab button down ==\n  {:?}", ev);
    assert_eq!(hands.carried(hand), Some(cube));
    assert!(!hands.target_state(cube).contains(TargetState::HOVERED));
    assert!(hands.target_state(cube).contains(TargetState::GRABBED));

    // Release: the carry ends and, since the hand is still in contact, the
    // hover resumes immediately.
    let ev = hands.release_grab(hand);
    println!("== Grab button up ==\n  {:?}", ev);
    assert!(!hands.target_state(cube).contains(TargetState::GRABBED));
    assert!(hands.target_state(cube).contains(TargetState::HOVERED));

    let names: Vec<_> = ev.iter().map(|e| e.name()).collect();
    assert_eq!(names, ["grab-end", "hover-start"]);
}
