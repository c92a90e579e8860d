// Copyright 2026 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State machine implementation.
//!
//! ## Overview
//!
//! Tracks button intents and gesture bindings per hand, applies contact reports
//! against the shared participant registry, and emits deduplicated lifecycle
//! events.
//!
//! ## Engagement
//!
//! A gesture engages in two ways: a contact report arrives while the button intent
//! is already held ([`Hands::on_hit`]), or the button is pressed while the hand is
//! already in contact (the press operations scan the hand's watch list in contact
//! order and take the first eligible target).
//!
//! ## Hover suppression
//!
//! A target under an exclusive gesture (grabbed, stretched, or dragged) holds no
//! hoverers: engagement ends every hover on it, and every gesture end re-admits the
//! hands still in contact. Drop candidacy (`dragover`) is not exclusive and does
//! not suppress.
//!
//! ## Failure semantics
//!
//! Contested and incapable gesture attempts are silent no-ops, as are operations on
//! stale ids. Continuous interactive input makes missed gestures ordinary; nothing
//! here escalates them.

use alloc::vec::Vec;

use grasp_registry::{Registry, TargetFlags, TargetId, TargetState};

use crate::events::GestureEvent;
use crate::types::{GestureMode, HandId, HoverTransition};

#[derive(Clone, Debug)]
struct HandSlot {
    generation: u32,
    grabbing: bool,
    stretching: bool,
    dragging: bool,
    carried: Option<TargetId>,
    stretched: Option<TargetId>,
    dragged: Option<TargetId>,
    drop_target: Option<TargetId>,
    watched: Vec<TargetId>,
    last_hover: Option<HoverTransition>,
}

impl HandSlot {
    fn new(generation: u32) -> Self {
        Self {
            generation,
            grabbing: false,
            stretching: false,
            dragging: false,
            carried: None,
            stretched: None,
            dragged: None,
            drop_target: None,
            watched: Vec::new(),
            last_hover: None,
        }
    }
}

/// The gesture state machine for every registered hand, plus the shared registry.
///
/// ## Usage
///
/// - Register hands and targets as the host creates the corresponding entities;
///   remove them when the host destroys them.
/// - Feed collision contacts through [`Hands::on_hit`] each tick and contact losses
///   through [`Hands::on_contact_lost`].
/// - Forward button intents through the press/release pairs.
/// - Every mutating call returns the lifecycle events it caused, in order, for the
///   host's dispatcher to fan out. Feeding the same contact set repeatedly emits
///   nothing new.
///
/// All operations are synchronous; the model is single-threaded and tick-driven,
/// with hands processed deterministically in host invocation order.
pub struct Hands {
    registry: Registry<HandId>,
    hands: Vec<Option<HandSlot>>,
    free_list: Vec<usize>,
}

impl core::fmt::Debug for Hands {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.hands.len();
        let alive = self.hands.iter().filter(|h| h.is_some()).count();
        f.debug_struct("Hands")
            .field("hands_total", &total)
            .field("hands_alive", &alive)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl Default for Hands {
    fn default() -> Self {
        Self::new()
    }
}

impl Hands {
    /// Create an empty state machine.
    pub const fn new() -> Self {
        Self {
            registry: Registry::new(),
            hands: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Read-only view of the shared participant registry.
    pub const fn registry(&self) -> &Registry<HandId> {
        &self.registry
    }

    // --- host lifecycle ---

    /// Register a hand controller.
    pub fn register_hand(&mut self) -> HandId {
        if let Some(idx) = self.free_list.pop() {
            let generation = self.hands[idx].as_ref().map(|h| h.generation).unwrap_or(0) + 1;
            self.hands[idx] = Some(HandSlot::new(generation));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "HandId uses 32-bit indices by design."
            )]
            HandId::new(idx as u32, generation)
        } else {
            self.hands.push(Some(HandSlot::new(1)));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "HandId uses 32-bit indices by design."
            )]
            HandId::new((self.hands.len() - 1) as u32, 1)
        }
    }

    /// Remove a hand, ending every gesture it holds.
    ///
    /// Holds are released without completing them: a drag in flight ends with no
    /// drop. Other hands still in contact with the released targets resume
    /// hovering them.
    pub fn remove_hand(&mut self, hand: HandId) -> Vec<GestureEvent> {
        let mut ev = Vec::new();
        let Some(slot) = self.slot_mut(hand) else {
            return ev;
        };
        let watched = core::mem::take(&mut slot.watched);
        let carried = slot.carried.take();
        let stretched = slot.stretched.take();
        let dragged = slot.dragged.take();
        let drop_target = slot.drop_target.take();

        for t in watched {
            if self.registry.remove_hoverer(t, hand) {
                ev.push(GestureEvent::HoverEnd { hand, target: t });
            }
        }
        if let Some(t) = drop_target {
            self.registry.remove_dragover(t, hand);
            ev.push(GestureEvent::DragoverEnd { hand, target: t });
        }
        if let Some(t) = carried {
            self.registry.clear_grabber(t, hand);
            ev.push(GestureEvent::GrabEnd { hand, target: t });
            self.resume_hover(t, &mut ev);
        }
        if let Some(t) = stretched {
            self.registry.remove_stretcher(t, hand);
            if !self.registry.state(t).contains(TargetState::STRETCHED) {
                ev.push(GestureEvent::StretchEnd { hand, target: t });
                self.resume_hover(t, &mut ev);
            }
        }
        if let Some(t) = dragged {
            self.registry.clear_dragger(t, hand);
            ev.push(GestureEvent::DragEnd { hand, target: t });
            self.resume_hover(t, &mut ev);
        }
        self.registry.remove_hand(hand);
        self.hands[hand.idx()] = None;
        self.free_list.push(hand.idx());
        ev
    }

    /// Register a target with the given capabilities.
    pub fn insert_target(&mut self, flags: TargetFlags) -> TargetId {
        self.registry.insert(flags)
    }

    /// Remove a target, ending every gesture bound to it.
    ///
    /// Each participant hand receives the matching end event; a carry in flight
    /// ends with no drop.
    pub fn remove_target(&mut self, target: TargetId) -> Vec<GestureEvent> {
        let mut ev = Vec::new();
        if !self.registry.is_alive(target) {
            return ev;
        }
        for hand in self.hand_ids() {
            let Some(slot) = self.slot_mut(hand) else {
                continue;
            };
            slot.watched.retain(|t| *t != target);
            let was_candidate = slot.drop_target == Some(target);
            if was_candidate {
                slot.drop_target = None;
            }
            let was_carried = slot.carried == Some(target);
            if was_carried {
                slot.carried = None;
            }
            let was_stretched = slot.stretched == Some(target);
            if was_stretched {
                slot.stretched = None;
            }
            let was_dragged = slot.dragged == Some(target);
            // The carry vanishes with the target; any candidate is demoted too.
            let orphaned_candidate = if was_dragged {
                slot.dragged = None;
                slot.drop_target.take()
            } else {
                None
            };

            if self.registry.remove_hoverer(target, hand) {
                ev.push(GestureEvent::HoverEnd { hand, target });
            }
            if was_candidate {
                ev.push(GestureEvent::DragoverEnd { hand, target });
            }
            if was_carried {
                ev.push(GestureEvent::GrabEnd { hand, target });
            }
            if was_stretched {
                ev.push(GestureEvent::StretchEnd { hand, target });
            }
            if was_dragged {
                if let Some(over) = orphaned_candidate {
                    self.registry.remove_dragover(over, hand);
                    ev.push(GestureEvent::DragoverEnd { hand, target: over });
                }
                ev.push(GestureEvent::DragEnd { hand, target });
            }
        }
        self.registry.remove(target);
        ev
    }

    /// Replace a target's capability flags.
    ///
    /// Applies to future transitions only.
    pub fn set_target_flags(&mut self, target: TargetId, flags: TargetFlags) {
        self.registry.set_flags(target, flags);
    }

    /// Whether `hand` refers to a live hand.
    pub fn is_hand_alive(&self, hand: HandId) -> bool {
        self.slot(hand).is_some()
    }

    /// Whether `target` refers to a live target.
    pub fn is_target_alive(&self, target: TargetId) -> bool {
        self.registry.is_alive(target)
    }

    // --- collision feed ---

    /// Report that `target` is within collision range of `hand` this tick.
    ///
    /// Records the contact, then attempts engagement for each held intent (grab,
    /// stretch, drag carry or drop candidacy, in that order) and falls back to
    /// hover. Repeat reports without an intervening state change emit nothing.
    pub fn on_hit(&mut self, hand: HandId, target: TargetId) -> Vec<GestureEvent> {
        let mut ev = Vec::new();
        if !self.registry.is_alive(target) {
            return ev;
        }
        let Some(slot) = self.slot_mut(hand) else {
            return ev;
        };
        if !slot.watched.contains(&target) {
            slot.watched.push(target);
        }

        let mut consumed = self.try_grab(hand, target, &mut ev);
        consumed |= self.try_stretch(hand, target, &mut ev);
        consumed |= self.try_drag(hand, target, &mut ev);

        if !consumed {
            self.try_hover(hand, target, &mut ev);
        }
        ev
    }

    /// Report that `hand` lost collision contact with `target`.
    ///
    /// Clears the contact, the hand's hover, and its drop candidacy on the target.
    /// Carried, stretched, and dragged bindings are unaffected; those end only on
    /// button release.
    pub fn on_contact_lost(&mut self, hand: HandId, target: TargetId) -> Vec<GestureEvent> {
        let mut ev = Vec::new();
        let Some(slot) = self.slot_mut(hand) else {
            return ev;
        };
        slot.watched.retain(|t| *t != target);
        let was_candidate = slot.drop_target == Some(target);
        if was_candidate {
            slot.drop_target = None;
        }
        if self.registry.remove_hoverer(target, hand) {
            self.set_last_hover(hand, HoverTransition::HoverEnd);
            ev.push(GestureEvent::HoverEnd { hand, target });
        }
        if was_candidate {
            self.registry.remove_dragover(target, hand);
            self.set_last_hover(hand, HoverTransition::DragoverEnd);
            ev.push(GestureEvent::DragoverEnd { hand, target });
        }
        ev
    }

    // --- button intents ---

    /// Hold the grab intent; engages immediately against the watch list.
    pub fn press_grab(&mut self, hand: HandId) -> Vec<GestureEvent> {
        let mut ev = Vec::new();
        let Some(slot) = self.slot_mut(hand) else {
            return ev;
        };
        slot.grabbing = true;
        for t in slot.watched.clone() {
            if self.try_grab(hand, t, &mut ev) {
                break;
            }
        }
        ev
    }

    /// Release the grab intent; drops the carried target, if any.
    pub fn release_grab(&mut self, hand: HandId) -> Vec<GestureEvent> {
        let mut ev = Vec::new();
        let Some(slot) = self.slot_mut(hand) else {
            return ev;
        };
        slot.grabbing = false;
        if let Some(t) = slot.carried.take() {
            self.registry.clear_grabber(t, hand);
            ev.push(GestureEvent::GrabEnd { hand, target: t });
            self.resume_hover(t, &mut ev);
        }
        ev
    }

    /// Hold the stretch intent; engages immediately against the watch list.
    pub fn press_stretch(&mut self, hand: HandId) -> Vec<GestureEvent> {
        let mut ev = Vec::new();
        let Some(slot) = self.slot_mut(hand) else {
            return ev;
        };
        slot.stretching = true;
        for t in slot.watched.clone() {
            if self.try_stretch(hand, t, &mut ev) {
                break;
            }
        }
        ev
    }

    /// Release the stretch intent; lets go of the stretched target, if any.
    ///
    /// The target stays stretched while other hands hold it; [`StretchEnd`]
    /// fires only when the stretcher set empties.
    ///
    /// [`StretchEnd`]: GestureEvent::StretchEnd
    pub fn release_stretch(&mut self, hand: HandId) -> Vec<GestureEvent> {
        let mut ev = Vec::new();
        let Some(slot) = self.slot_mut(hand) else {
            return ev;
        };
        slot.stretching = false;
        if let Some(t) = slot.stretched.take() {
            self.registry.remove_stretcher(t, hand);
            if !self.registry.state(t).contains(TargetState::STRETCHED) {
                ev.push(GestureEvent::StretchEnd { hand, target: t });
                self.resume_hover(t, &mut ev);
            }
        }
        ev
    }

    /// Hold the drag intent; engages a carry immediately against the watch list.
    pub fn press_drag(&mut self, hand: HandId) -> Vec<GestureEvent> {
        let mut ev = Vec::new();
        let Some(slot) = self.slot_mut(hand) else {
            return ev;
        };
        slot.dragging = true;
        for t in slot.watched.clone() {
            if self.try_drag(hand, t, &mut ev) {
                break;
            }
        }
        ev
    }

    /// Release the drag intent, completing the drop if a candidate is active.
    ///
    /// With a live candidate, [`DragDrop`] fires exactly once addressed to each
    /// participant before the carry ends; with none, the carry just ends.
    ///
    /// [`DragDrop`]: GestureEvent::DragDrop
    pub fn release_drag(&mut self, hand: HandId) -> Vec<GestureEvent> {
        let mut ev = Vec::new();
        let Some(slot) = self.slot_mut(hand) else {
            return ev;
        };
        slot.dragging = false;
        let carried = slot.dragged.take();
        let over = slot.drop_target.take();
        if let Some(t) = carried {
            if let Some(o) = over {
                ev.push(GestureEvent::DragDrop {
                    hand,
                    target: t,
                    counterpart: o,
                });
                ev.push(GestureEvent::DragDrop {
                    hand,
                    target: o,
                    counterpart: t,
                });
                self.registry.remove_dragover(o, hand);
                self.set_last_hover(hand, HoverTransition::DragoverEnd);
                ev.push(GestureEvent::DragoverEnd { hand, target: o });
            }
            self.registry.clear_dragger(t, hand);
            ev.push(GestureEvent::DragEnd { hand, target: t });
            self.resume_hover(t, &mut ev);
        }
        ev
    }

    // --- per-hand queries ---

    /// The target carried via grab, if any.
    pub fn carried(&self, hand: HandId) -> Option<TargetId> {
        self.slot(hand).and_then(|s| s.carried)
    }

    /// The target this hand stretches, if any.
    pub fn stretched(&self, hand: HandId) -> Option<TargetId> {
        self.slot(hand).and_then(|s| s.stretched)
    }

    /// The target carried via drag, if any.
    pub fn dragged(&self, hand: HandId) -> Option<TargetId> {
        self.slot(hand).and_then(|s| s.dragged)
    }

    /// The hand's current drop candidate, if any. At most one at a time.
    pub fn drop_target(&self, hand: HandId) -> Option<TargetId> {
        self.slot(hand).and_then(|s| s.drop_target)
    }

    /// Targets currently in collision contact with the hand, in contact order.
    ///
    /// This is the hover-candidate list; it keeps entries through exclusive
    /// gestures so hover can resume when they end.
    pub fn watched(&self, hand: HandId) -> &[TargetId] {
        self.slot(hand).map(|s| s.watched.as_slice()).unwrap_or(&[])
    }

    /// The hand's most recent hover-category transition.
    pub fn last_hover(&self, hand: HandId) -> Option<HoverTransition> {
        self.slot(hand).and_then(|s| s.last_hover)
    }

    /// Derived state of a target, forwarded from the registry.
    pub fn target_state(&self, target: TargetId) -> TargetState {
        self.registry.state(target)
    }

    /// Capability flags of a target, forwarded from the registry.
    pub fn target_flags(&self, target: TargetId) -> TargetFlags {
        self.registry.flags(target)
    }

    /// Derived gesture mode of the hand.
    pub fn mode(&self, hand: HandId) -> GestureMode {
        let Some(slot) = self.slot(hand) else {
            return GestureMode::Idle;
        };
        if slot.carried.is_some() {
            GestureMode::Grabbing
        } else if slot.dragged.is_some() {
            GestureMode::Dragging
        } else if slot.stretched.is_some() {
            GestureMode::Stretching
        } else if slot
            .watched
            .iter()
            .any(|t| self.registry.hoverers(*t).contains(&hand))
        {
            GestureMode::Hovering
        } else {
            GestureMode::Idle
        }
    }

    // --- internals ---

    fn slot(&self, hand: HandId) -> Option<&HandSlot> {
        let s = self.hands.get(hand.idx())?.as_ref()?;
        (s.generation == hand.1).then_some(s)
    }

    fn slot_mut(&mut self, hand: HandId) -> Option<&mut HandSlot> {
        let s = self.hands.get_mut(hand.idx())?.as_mut()?;
        (s.generation == hand.1).then_some(s)
    }

    fn hand_ids(&self) -> Vec<HandId> {
        self.hands
            .iter()
            .enumerate()
            .filter_map(|(i, h)| {
                h.as_ref().map(|h| {
                    #[allow(
                        clippy::cast_possible_truncation,
                        reason = "HandId uses 32-bit indices by design."
                    )]
                    HandId::new(i as u32, h.generation)
                })
            })
            .collect()
    }

    fn set_last_hover(&mut self, hand: HandId, transition: HoverTransition) {
        if let Some(slot) = self.slot_mut(hand) {
            slot.last_hover = Some(transition);
        }
    }

    /// Bind a grab if the hand's intent, the target's capability, and the
    /// grabber slot all allow it. Contested or incapable attempts return false.
    fn try_grab(&mut self, hand: HandId, target: TargetId, ev: &mut Vec<GestureEvent>) -> bool {
        let Some(slot) = self.slot(hand) else {
            return false;
        };
        // Grab and drag carries are mutually exclusive per hand.
        if !slot.grabbing || slot.carried.is_some() || slot.dragged.is_some() {
            return false;
        }
        if !self.registry.flags(target).contains(TargetFlags::GRABBABLE)
            || self.registry.grabber(target).is_some()
        {
            return false;
        }
        self.suppress_hover(target, ev);
        self.registry.set_grabber(target, hand);
        if let Some(slot) = self.slot_mut(hand) {
            slot.carried = Some(target);
        }
        ev.push(GestureEvent::GrabStart { hand, target });
        true
    }

    /// Join the stretcher set. Cooperative: company never rejects, but the
    /// target-level transition only fires when the set goes from empty.
    fn try_stretch(&mut self, hand: HandId, target: TargetId, ev: &mut Vec<GestureEvent>) -> bool {
        let Some(slot) = self.slot(hand) else {
            return false;
        };
        if !slot.stretching || slot.stretched.is_some() {
            return false;
        }
        if !self
            .registry
            .flags(target)
            .contains(TargetFlags::STRETCHABLE)
        {
            return false;
        }
        let was_stretched = self.registry.state(target).contains(TargetState::STRETCHED);
        self.registry.add_stretcher(target, hand);
        if let Some(slot) = self.slot_mut(hand) {
            slot.stretched = Some(target);
        }
        if !was_stretched {
            self.suppress_hover(target, ev);
            ev.push(GestureEvent::StretchStart { hand, target });
        }
        true
    }

    /// Drag handling: begin a carry when the hand holds nothing, otherwise
    /// promote the hit target to drop candidate.
    fn try_drag(&mut self, hand: HandId, target: TargetId, ev: &mut Vec<GestureEvent>) -> bool {
        let Some(slot) = self.slot(hand) else {
            return false;
        };
        if !slot.dragging {
            return false;
        }
        match slot.dragged {
            None => {
                if slot.carried.is_some() {
                    return false;
                }
                if !self.registry.flags(target).contains(TargetFlags::DROPPABLE)
                    || self.registry.dragger(target).is_some()
                {
                    return false;
                }
                self.suppress_hover(target, ev);
                self.registry.set_dragger(target, hand);
                if let Some(slot) = self.slot_mut(hand) {
                    slot.dragged = Some(target);
                }
                ev.push(GestureEvent::DragStart { hand, target });
                true
            }
            // A hit on the carried item itself is spent; it can never become
            // its own drop candidate.
            Some(carried) if carried == target => true,
            Some(_) => {
                if !self.registry.flags(target).contains(TargetFlags::DROPPABLE) {
                    // Rejected candidate; the hit may still hover below.
                    return false;
                }
                self.promote_drop_candidate(hand, target, ev);
                true
            }
        }
    }

    /// Make `target` the hand's sole drop candidate, demoting the previous one.
    /// Last-touched droppable wins.
    fn promote_drop_candidate(
        &mut self,
        hand: HandId,
        target: TargetId,
        ev: &mut Vec<GestureEvent>,
    ) {
        let prev = self.slot(hand).and_then(|s| s.drop_target);
        if prev == Some(target) {
            return;
        }
        if let Some(p) = prev {
            self.registry.remove_dragover(p, hand);
            self.set_last_hover(hand, HoverTransition::DragoverEnd);
            ev.push(GestureEvent::DragoverEnd { hand, target: p });
        }
        self.registry.add_dragover(target, hand);
        if let Some(slot) = self.slot_mut(hand) {
            slot.drop_target = Some(target);
        }
        self.set_last_hover(hand, HoverTransition::DragoverStart);
        ev.push(GestureEvent::DragoverStart { hand, target });
    }

    /// Hover fallback for a hit nothing else consumed.
    fn try_hover(&mut self, hand: HandId, target: TargetId, ev: &mut Vec<GestureEvent>) {
        if !self.registry.flags(target).contains(TargetFlags::HOVERABLE)
            || self.registry.is_exclusively_held(target)
        {
            return;
        }
        if self.registry.add_hoverer(target, hand) {
            self.set_last_hover(hand, HoverTransition::HoverStart);
            ev.push(GestureEvent::HoverStart { hand, target });
        }
    }

    /// End every hover on a target entering an exclusive gesture.
    fn suppress_hover(&mut self, target: TargetId, ev: &mut Vec<GestureEvent>) {
        for h in self.registry.hoverers(target).to_vec() {
            self.registry.remove_hoverer(target, h);
            self.set_last_hover(h, HoverTransition::HoverEnd);
            ev.push(GestureEvent::HoverEnd { hand: h, target });
        }
    }

    /// Re-admit hover on a target whose exclusive gesture ended, for every hand
    /// still in contact, in hand slot order.
    fn resume_hover(&mut self, target: TargetId, ev: &mut Vec<GestureEvent>) {
        if !self.registry.flags(target).contains(TargetFlags::HOVERABLE)
            || self.registry.is_exclusively_held(target)
        {
            return;
        }
        for hand in self.hand_ids() {
            let watching = self
                .slot(hand)
                .is_some_and(|s| s.watched.contains(&target));
            if watching && self.registry.add_hoverer(target, hand) {
                self.set_last_hover(hand, HoverTransition::HoverStart);
                ev.push(GestureEvent::HoverStart { hand, target });
            }
        }
    }
}
