// Copyright 2026 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Registry implementation: target slots, participant sets, derived state.
//!
//! ## Overview
//!
//! Stores targets in generational slots and maintains the per-gesture participant
//! structures for each one. Mutators apply whole logical transitions and report
//! whether state changed; the cached [`TargetState`] is refreshed on every change.
//!
//! ## Exclusive vs. cooperative slots
//!
//! - `grabber` and `dragger` hold at most one hand; binding fails while occupied.
//! - `hoverers`, `stretchers`, and `dragover` are ordered sets; adds and removes
//!   are idempotent.
//!
//! The changed-flag returned by each mutator is the deduplication primitive for
//! upstream event emission: no change, no event.

use alloc::vec::Vec;

use crate::types::{TargetFlags, TargetId, TargetState};

#[derive(Clone, Debug)]
struct Slot<H> {
    generation: u32,
    flags: TargetFlags,
    hoverers: Vec<H>,
    grabber: Option<H>,
    stretchers: Vec<H>,
    dragger: Option<H>,
    dragover: Vec<H>,
    state: TargetState,
}

impl<H> Slot<H> {
    fn new(generation: u32, flags: TargetFlags) -> Self {
        Self {
            generation,
            flags,
            hoverers: Vec::new(),
            grabber: None,
            stretchers: Vec::new(),
            dragger: None,
            dragover: Vec::new(),
            state: TargetState::empty(),
        }
    }

    fn refresh_state(&mut self) {
        let mut state = TargetState::empty();
        state.set(TargetState::HOVERED, !self.hoverers.is_empty());
        state.set(TargetState::GRABBED, self.grabber.is_some());
        state.set(TargetState::STRETCHED, !self.stretchers.is_empty());
        state.set(TargetState::DRAGGED, self.dragger.is_some());
        state.set(TargetState::DRAGOVER, !self.dragover.is_empty());
        self.state = state;
    }
}

/// Shared participant registry for gesture targets.
///
/// Generic over the hand key `H` so the interaction layer can bring its own handle
/// type; the registry only needs to copy and compare hands.
///
/// ## Usage
///
/// - [`Registry::insert`] targets with their [`TargetFlags`]; remove them when the
///   host destroys the entity.
/// - Apply participant transitions through the mutators; each returns `true` only
///   when it changed state, and refreshes the cached [`TargetState`].
/// - Read [`Registry::state`] (or the individual participant accessors) to reflect
///   interaction state; stale ids read as empty.
pub struct Registry<H> {
    slots: Vec<Option<Slot<H>>>,
    free_list: Vec<usize>,
}

impl<H> core::fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.slots.len();
        let alive = self.slots.iter().filter(|s| s.is_some()).count();
        f.debug_struct("Registry")
            .field("targets_total", &total)
            .field("targets_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Registry<H> {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }
}

impl<H: Copy + Eq> Registry<H> {
    /// Register a target with the given capabilities.
    pub fn insert(&mut self, flags: TargetFlags) -> TargetId {
        if let Some(idx) = self.free_list.pop() {
            let generation = self.slots[idx].as_ref().map(|s| s.generation).unwrap_or(0) + 1;
            self.slots[idx] = Some(Slot::new(generation, flags));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "TargetId uses 32-bit indices by design."
            )]
            TargetId::new(idx as u32, generation)
        } else {
            self.slots.push(Some(Slot::new(1, flags)));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "TargetId uses 32-bit indices by design."
            )]
            TargetId::new((self.slots.len() - 1) as u32, 1)
        }
    }

    /// Remove a target, freeing its slot and dropping all participant state.
    pub fn remove(&mut self, id: TargetId) {
        if !self.is_alive(id) {
            return;
        }
        self.slots[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Whether `id` still refers to a live target.
    pub fn is_alive(&self, id: TargetId) -> bool {
        self.slot(id).is_some()
    }

    /// Capability flags, or empty for stale ids.
    pub fn flags(&self, id: TargetId) -> TargetFlags {
        self.slot(id).map(|s| s.flags).unwrap_or(TargetFlags::empty())
    }

    /// Replace the capability flags.
    ///
    /// Applies to future transitions only; existing participants are not evicted.
    pub fn set_flags(&mut self, id: TargetId, flags: TargetFlags) {
        if let Some(slot) = self.slot_mut(id) {
            slot.flags = flags;
        }
    }

    /// Derived state, or empty for stale ids.
    pub fn state(&self, id: TargetId) -> TargetState {
        self.slot(id).map(|s| s.state).unwrap_or(TargetState::empty())
    }

    /// Whether an exclusive gesture (grab, stretch, or drag) holds the target.
    pub fn is_exclusively_held(&self, id: TargetId) -> bool {
        self.state(id).exclusively_held()
    }

    /// Hands currently hovering the target, in arrival order.
    pub fn hoverers(&self, id: TargetId) -> &[H] {
        self.slot(id).map(|s| s.hoverers.as_slice()).unwrap_or(&[])
    }

    /// The grabbing hand, if any.
    pub fn grabber(&self, id: TargetId) -> Option<H> {
        self.slot(id).and_then(|s| s.grabber)
    }

    /// Hands currently stretching the target, in arrival order.
    pub fn stretchers(&self, id: TargetId) -> &[H] {
        self.slot(id).map(|s| s.stretchers.as_slice()).unwrap_or(&[])
    }

    /// The drag-carrying hand, if any.
    pub fn dragger(&self, id: TargetId) -> Option<H> {
        self.slot(id).and_then(|s| s.dragger)
    }

    /// Hands for which this target is the current drop candidate, in arrival order.
    pub fn dragover(&self, id: TargetId) -> &[H] {
        self.slot(id).map(|s| s.dragover.as_slice()).unwrap_or(&[])
    }

    /// Add a hoverer. Returns whether the set changed.
    pub fn add_hoverer(&mut self, id: TargetId, hand: H) -> bool {
        self.add_member(id, hand, |s| &mut s.hoverers)
    }

    /// Remove a hoverer. Returns whether the set changed.
    pub fn remove_hoverer(&mut self, id: TargetId, hand: H) -> bool {
        self.remove_member(id, hand, |s| &mut s.hoverers)
    }

    /// Bind the exclusive grabber.
    ///
    /// Returns `false` without touching state while the slot is occupied,
    /// including when `hand` already holds it.
    pub fn set_grabber(&mut self, id: TargetId, hand: H) -> bool {
        self.bind_exclusive(id, hand, |s| &mut s.grabber)
    }

    /// Release the grabber if `hand` holds it. Returns whether state changed.
    pub fn clear_grabber(&mut self, id: TargetId, hand: H) -> bool {
        self.release_exclusive(id, hand, |s| &mut s.grabber)
    }

    /// Add a stretcher (cooperative). Returns whether the set changed.
    pub fn add_stretcher(&mut self, id: TargetId, hand: H) -> bool {
        self.add_member(id, hand, |s| &mut s.stretchers)
    }

    /// Remove a stretcher. Returns whether the set changed.
    pub fn remove_stretcher(&mut self, id: TargetId, hand: H) -> bool {
        self.remove_member(id, hand, |s| &mut s.stretchers)
    }

    /// Bind the exclusive dragger. Same contract as [`Registry::set_grabber`].
    pub fn set_dragger(&mut self, id: TargetId, hand: H) -> bool {
        self.bind_exclusive(id, hand, |s| &mut s.dragger)
    }

    /// Release the dragger if `hand` holds it. Returns whether state changed.
    pub fn clear_dragger(&mut self, id: TargetId, hand: H) -> bool {
        self.release_exclusive(id, hand, |s| &mut s.dragger)
    }

    /// Mark the target as `hand`'s drop candidate. Returns whether the set changed.
    pub fn add_dragover(&mut self, id: TargetId, hand: H) -> bool {
        self.add_member(id, hand, |s| &mut s.dragover)
    }

    /// Withdraw `hand`'s drop candidacy. Returns whether the set changed.
    pub fn remove_dragover(&mut self, id: TargetId, hand: H) -> bool {
        self.remove_member(id, hand, |s| &mut s.dragover)
    }

    /// Scrub a hand from every participant structure of every target.
    ///
    /// Used when the host destroys a hand. Returns whether anything changed.
    pub fn remove_hand(&mut self, hand: H) -> bool {
        let mut changed = false;
        for slot in self.slots.iter_mut().flatten() {
            let members_before =
                slot.hoverers.len() + slot.stretchers.len() + slot.dragover.len();
            slot.hoverers.retain(|h| *h != hand);
            slot.stretchers.retain(|h| *h != hand);
            slot.dragover.retain(|h| *h != hand);
            let mut slot_changed =
                slot.hoverers.len() + slot.stretchers.len() + slot.dragover.len()
                    != members_before;
            if slot.grabber == Some(hand) {
                slot.grabber = None;
                slot_changed = true;
            }
            if slot.dragger == Some(hand) {
                slot.dragger = None;
                slot_changed = true;
            }
            if slot_changed {
                slot.refresh_state();
                changed = true;
            }
        }
        changed
    }

    // --- internals ---

    fn slot(&self, id: TargetId) -> Option<&Slot<H>> {
        let s = self.slots.get(id.idx())?.as_ref()?;
        (s.generation == id.1).then_some(s)
    }

    fn slot_mut(&mut self, id: TargetId) -> Option<&mut Slot<H>> {
        let s = self.slots.get_mut(id.idx())?.as_mut()?;
        (s.generation == id.1).then_some(s)
    }

    fn add_member(
        &mut self,
        id: TargetId,
        hand: H,
        set: fn(&mut Slot<H>) -> &mut Vec<H>,
    ) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        if set(slot).contains(&hand) {
            return false;
        }
        set(slot).push(hand);
        slot.refresh_state();
        true
    }

    fn remove_member(
        &mut self,
        id: TargetId,
        hand: H,
        set: fn(&mut Slot<H>) -> &mut Vec<H>,
    ) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        let members = set(slot);
        let Some(pos) = members.iter().position(|h| *h == hand) else {
            return false;
        };
        members.remove(pos);
        slot.refresh_state();
        true
    }

    fn bind_exclusive(
        &mut self,
        id: TargetId,
        hand: H,
        field: fn(&mut Slot<H>) -> &mut Option<H>,
    ) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        if field(slot).is_some() {
            return false;
        }
        *field(slot) = Some(hand);
        slot.refresh_state();
        true
    }

    fn release_exclusive(
        &mut self,
        id: TargetId,
        hand: H,
        field: fn(&mut Slot<H>) -> &mut Option<H>,
    ) -> bool {
        let Some(slot) = self.slot_mut(id) else {
            return false;
        };
        if *field(slot) != Some(hand) {
            return false;
        }
        *field(slot) = None;
        slot.refresh_state();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> TargetFlags {
        TargetFlags::all()
    }

    #[test]
    fn hoverers_are_idempotent_and_ordered() {
        let mut reg: Registry<u8> = Registry::new();
        let t = reg.insert(full());
        assert!(reg.add_hoverer(t, 1));
        assert!(reg.add_hoverer(t, 2));
        assert!(!reg.add_hoverer(t, 1), "repeat add must not change state");
        assert_eq!(reg.hoverers(t), &[1, 2]);
        assert!(reg.remove_hoverer(t, 1));
        assert!(!reg.remove_hoverer(t, 1), "repeat remove must not change state");
        assert_eq!(reg.hoverers(t), &[2]);
    }

    #[test]
    fn grabber_is_exclusive() {
        let mut reg: Registry<u8> = Registry::new();
        let t = reg.insert(full());
        assert!(reg.set_grabber(t, 1));
        assert!(!reg.set_grabber(t, 2), "contested grab is rejected");
        assert!(!reg.set_grabber(t, 1), "re-grab by holder is a no-op");
        assert_eq!(reg.grabber(t), Some(1));
        assert!(!reg.clear_grabber(t, 2), "only the holder may release");
        assert!(reg.clear_grabber(t, 1));
        assert_eq!(reg.grabber(t), None);
    }

    #[test]
    fn stretchers_empty_before_unstretched() {
        let mut reg: Registry<u8> = Registry::new();
        let t = reg.insert(full());
        reg.add_stretcher(t, 1);
        reg.add_stretcher(t, 2);
        assert!(reg.state(t).contains(TargetState::STRETCHED));
        reg.remove_stretcher(t, 1);
        assert!(reg.state(t).contains(TargetState::STRETCHED), "one stretcher remains");
        reg.remove_stretcher(t, 2);
        assert!(!reg.state(t).contains(TargetState::STRETCHED));
        assert!(reg.stretchers(t).is_empty());
    }

    #[test]
    fn state_tracks_every_mutation() {
        let mut reg: Registry<u8> = Registry::new();
        let t = reg.insert(full());
        assert_eq!(reg.state(t), TargetState::empty());
        reg.add_hoverer(t, 1);
        assert_eq!(reg.state(t), TargetState::HOVERED);
        reg.set_dragger(t, 1);
        assert_eq!(reg.state(t), TargetState::HOVERED | TargetState::DRAGGED);
        assert!(reg.is_exclusively_held(t));
        reg.remove_hoverer(t, 1);
        reg.clear_dragger(t, 1);
        assert_eq!(reg.state(t), TargetState::empty());
        assert!(!reg.is_exclusively_held(t));
    }

    #[test]
    fn dragover_set_semantics() {
        let mut reg: Registry<u8> = Registry::new();
        let t = reg.insert(full());
        assert!(reg.add_dragover(t, 3));
        assert!(!reg.add_dragover(t, 3));
        assert!(reg.state(t).contains(TargetState::DRAGOVER));
        assert!(!reg.state(t).exclusively_held(), "dragover does not suppress hover");
        assert!(reg.remove_dragover(t, 3));
        assert!(!reg.state(t).contains(TargetState::DRAGOVER));
    }

    #[test]
    fn stale_ids_are_silent() {
        let mut reg: Registry<u8> = Registry::new();
        let t = reg.insert(full());
        reg.add_hoverer(t, 1);
        reg.remove(t);
        assert!(!reg.is_alive(t));
        assert!(!reg.add_hoverer(t, 2));
        assert!(!reg.set_grabber(t, 2));
        assert_eq!(reg.state(t), TargetState::empty());
        assert_eq!(reg.flags(t), TargetFlags::empty());
        assert!(reg.hoverers(t).is_empty());

        // Slot reuse bumps the generation; the stale id still reads empty.
        let t2 = reg.insert(full());
        assert_eq!(t2.idx(), t.idx(), "slot is reused");
        assert!(!reg.is_alive(t));
        assert!(reg.is_alive(t2));
    }

    #[test]
    fn remove_hand_scrubs_everything() {
        let mut reg: Registry<u8> = Registry::new();
        let a = reg.insert(full());
        let b = reg.insert(full());
        reg.add_hoverer(a, 1);
        reg.set_grabber(b, 1);
        reg.add_stretcher(a, 1);
        reg.add_stretcher(a, 2);
        assert!(reg.remove_hand(1));
        assert!(reg.hoverers(a).is_empty());
        assert_eq!(reg.grabber(b), None);
        assert_eq!(reg.stretchers(a), &[2]);
        assert!(!reg.remove_hand(1), "second scrub finds nothing");
    }
}
