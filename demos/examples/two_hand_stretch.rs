// Copyright 2026 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cooperative stretching with two hands.
//!
//! Both hands hold the same target; it stays stretched until the last one lets
//! go, and only the 0→1 and 1→0 transitions emit events.
//!
//! Run:
//! - `cargo run -p grasp_demos --example two_hand_stretch`

use grasp_gestures::machine::Hands;
use grasp_registry::{TargetFlags, TargetState};

fn main() {
    let mut hands = Hands::new();
    let left = hands.register_hand();
    let right = hands.register_hand();
    let sheet = hands.insert_target(TargetFlags::HOVERABLE | TargetFlags::STRETCHABLE);

    // The left hand engages on contact with the button already held.
    let _ = hands.press_stretch(left);
    let ev = hands.on_hit(left, sheet);
    println!("== Left engages ==\n  {:?}", ev);
    assert!(hands.target_state(sheet).contains(TargetState::STRETCHED));

    // The right hand touches (hover is suppressed) and joins silently.
    let _ = hands.on_hit(right, sheet);
    let ev = hands.press_stretch(right);
    println!("== Right joins ==\n  {:?}", ev);
    assert!(ev.is_empty());
    assert_eq!(hands.registry().stretchers(sheet), &[left, right]);

    // One release leaves the target stretched.
    let ev = hands.release_stretch(left);
    println!("== Left releases ==\n  {:?}", ev);
    assert!(ev.is_empty());
    assert!(hands.target_state(sheet).contains(TargetState::STRETCHED));

    // The last release unstretches it and both hands resume hovering.
    let ev = hands.release_stretch(right);
    println!("== Right releases ==\n  {:?}", ev);
    assert!(!hands.target_state(sheet).contains(TargetState::STRETCHED));
    assert_eq!(hands.registry().hoverers(sheet), &[left, right]);
}
