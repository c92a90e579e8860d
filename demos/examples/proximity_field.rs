// Copyright 2026 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Driving the machine from the proximity adapter.
//!
//! A circular probe sweeps toward a zone and away again; the field's per-tick
//! diffing produces exactly one hover-start and one hover-end.
//!
//! Run:
//! - `cargo run -p grasp_demos --example proximity_field`

use grasp_gestures::adapters::proximity::ProximityField;
use grasp_gestures::machine::Hands;
use grasp_registry::TargetFlags;
use kurbo::{Circle, Point};

fn main() {
    let mut hands = Hands::new();
    let mut field = ProximityField::new();
    let hand = hands.register_hand();
    let orb = hands.insert_target(TargetFlags::HOVERABLE | TargetFlags::GRABBABLE);
    field.set_zone(orb, Circle::new(Point::new(10.0, 0.0), 1.0));

    let mut log = Vec::new();
    for step in 0..20 {
        // Sweep the probe from x=0 to x=19 and let the field diff each tick.
        field.set_probe(hand, Circle::new(Point::new(step as f64, 0.0), 1.0));
        for ev in field.tick(&mut hands) {
            log.push((step, ev.name()));
        }
    }

    println!("== Sweep transitions ==");
    for (step, name) in &log {
        println!("  tick {:2}: {}", step, name);
    }

    // Contact spans x in [8, 12]; one start entering, one end leaving.
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].1, "hover-start");
    assert_eq!(log[1].1, "hover-end");
}
