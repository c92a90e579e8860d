// Copyright 2026 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A circular proximity feed for driving the state machine in examples and tests.
//!
//! ## Feature
//!
//! Enable with `proximity_adapter`.
//!
//! ## Notes
//!
//! This is reference wiring for hosts, not a physics engine: hands are circular
//! probes, targets are circular zones, and a contact is any probe/zone overlap.
//! Each [`ProximityField::tick`] diffs the overlap set against the previous tick,
//! reporting losses through [`Hands::on_contact_lost`] and every current contact
//! through [`Hands::on_hit`] (the machine's own dedup absorbs the repeats, the way
//! a real collider re-reports contacts every frame).

use alloc::vec::Vec;

use grasp_registry::TargetId;
use kurbo::Circle;

use crate::events::GestureEvent;
use crate::machine::Hands;
use crate::types::HandId;

/// A set of hand probes and target zones with per-tick contact diffing.
#[derive(Clone, Debug, Default)]
pub struct ProximityField {
    probes: Vec<(HandId, Circle)>,
    zones: Vec<(TargetId, Circle)>,
    contacts: Vec<(HandId, TargetId)>,
}

impl ProximityField {
    /// Create an empty field.
    pub const fn new() -> Self {
        Self {
            probes: Vec::new(),
            zones: Vec::new(),
            contacts: Vec::new(),
        }
    }

    /// Place or move a hand probe.
    pub fn set_probe(&mut self, hand: HandId, circle: Circle) {
        if let Some(entry) = self.probes.iter_mut().find(|(h, _)| *h == hand) {
            entry.1 = circle;
        } else {
            self.probes.push((hand, circle));
        }
    }

    /// Remove a hand probe.
    pub fn remove_probe(&mut self, hand: HandId) {
        self.probes.retain(|(h, _)| *h != hand);
    }

    /// Place or move a target zone.
    pub fn set_zone(&mut self, target: TargetId, circle: Circle) {
        if let Some(entry) = self.zones.iter_mut().find(|(t, _)| *t == target) {
            entry.1 = circle;
        } else {
            self.zones.push((target, circle));
        }
    }

    /// Remove a target zone.
    pub fn remove_zone(&mut self, target: TargetId) {
        self.zones.retain(|(t, _)| *t != target);
    }

    /// The contact pairs observed by the last tick.
    pub fn contacts(&self) -> &[(HandId, TargetId)] {
        &self.contacts
    }

    /// Run one collision tick against the state machine.
    ///
    /// Contact losses are reported before fresh hits; pairs are visited in probe
    /// order, then zone order, so a tick is deterministic for a given field.
    pub fn tick(&mut self, hands: &mut Hands) -> Vec<GestureEvent> {
        let mut current = Vec::new();
        for &(hand, probe) in &self.probes {
            for &(target, zone) in &self.zones {
                if probe.center.distance(zone.center) <= probe.radius + zone.radius {
                    current.push((hand, target));
                }
            }
        }

        let mut ev = Vec::new();
        for &(hand, target) in &self.contacts {
            if !current.contains(&(hand, target)) {
                ev.extend(hands.on_contact_lost(hand, target));
            }
        }
        for &(hand, target) in &current {
            ev.extend(hands.on_hit(hand, target));
        }
        self.contacts = current;
        ev
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grasp_registry::{TargetFlags, TargetState};
    use kurbo::Point;

    fn circle(x: f64, y: f64, r: f64) -> Circle {
        Circle::new(Point::new(x, y), r)
    }

    #[test]
    fn overlap_hovers_and_separation_unhovers() {
        let mut hands = Hands::new();
        let mut field = ProximityField::new();
        let h = hands.register_hand();
        let t = hands.insert_target(TargetFlags::HOVERABLE);
        field.set_probe(h, circle(0.0, 0.0, 1.0));
        field.set_zone(t, circle(10.0, 0.0, 1.0));

        assert!(field.tick(&mut hands).is_empty(), "out of range");

        field.set_probe(h, circle(9.0, 0.0, 1.0));
        let ev = field.tick(&mut hands);
        assert_eq!(ev, alloc::vec![GestureEvent::HoverStart { hand: h, target: t }]);
        assert!(field.tick(&mut hands).is_empty(), "steady contact is silent");

        field.set_probe(h, circle(0.0, 0.0, 1.0));
        let ev = field.tick(&mut hands);
        assert_eq!(ev, alloc::vec![GestureEvent::HoverEnd { hand: h, target: t }]);
        assert!(!hands.target_state(t).contains(TargetState::HOVERED));
    }

    #[test]
    fn ticks_drive_a_grab_through_the_machine() {
        let mut hands = Hands::new();
        let mut field = ProximityField::new();
        let h = hands.register_hand();
        let t = hands.insert_target(TargetFlags::HOVERABLE | TargetFlags::GRABBABLE);
        field.set_probe(h, circle(0.0, 0.0, 1.0));
        field.set_zone(t, circle(1.5, 0.0, 1.0));

        let ev = field.tick(&mut hands);
        assert_eq!(ev.len(), 1, "hover on first overlap");
        let ev = hands.press_grab(h);
        assert_eq!(ev.last().map(GestureEvent::name), Some("grab-start"));

        // Carrying: further ticks stay silent, separation does not break the hold.
        assert!(field.tick(&mut hands).is_empty());
        field.set_probe(h, circle(100.0, 0.0, 1.0));
        let ev = field.tick(&mut hands);
        assert!(ev.is_empty(), "carried target ignores contact loss");
        assert_eq!(hands.carried(h), Some(t));
    }
}
