// Copyright 2026 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-and-drop with candidate switching.
//!
//! One hand carries an item past two drop zones; the last-touched droppable
//! wins, and the drop fires once on each participant at release.
//!
//! Run:
//! - `cargo run -p grasp_demos --example drag_and_drop`

use grasp_gestures::machine::Hands;
use grasp_registry::{TargetFlags, TargetState};

fn main() {
    let mut hands = Hands::new();
    let hand = hands.register_hand();
    let item = hands.insert_target(TargetFlags::HOVERABLE | TargetFlags::DROPPABLE);
    let tray = hands.insert_target(TargetFlags::HOVERABLE | TargetFlags::DROPPABLE);
    let bin = hands.insert_target(TargetFlags::HOVERABLE | TargetFlags::DROPPABLE);

    // Pick the item up.
    let _ = hands.press_drag(hand);
    let ev = hands.on_hit(hand, item);
    println!("== Carry ==\n  {:?}", ev);
    assert!(hands.target_state(item).contains(TargetState::DRAGGED));

    // Sweep across both zones: the tray is demoted when the bin is touched.
    let ev = hands.on_hit(hand, tray);
    println!("== Over tray ==\n  {:?}", ev);
    let ev = hands.on_hit(hand, bin);
    println!("== Over bin ==\n  {:?}", ev);
    assert_eq!(hands.drop_target(hand), Some(bin));
    assert!(!hands.target_state(tray).contains(TargetState::DRAGOVER));

    // Release over the bin: one drop record addressed to each participant.
    let ev = hands.release_drag(hand);
    println!("== Drop ==\n  {:?}", ev);
    let drops: Vec<_> = ev.iter().filter(|e| e.name() == "drag-drop").collect();
    assert_eq!(drops.len(), 2);
    assert!(drops.iter().any(|e| e.target() == item));
    assert!(drops.iter().any(|e| e.target() == bin));
    assert!(!hands.target_state(item).contains(TargetState::DRAGGED));
}
