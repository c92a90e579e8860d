// Copyright 2026 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the registry: target identifiers, capability flags, derived state.

/// Identifier for a registered target.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `TargetId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `TargetId`.
///
/// ### Liveness
///
/// Use [`Registry::is_alive`](crate::Registry::is_alive) to check whether a `TargetId`
/// still refers to a live target. Stale `TargetId`s never alias a different live target
/// because the generation must match; registry operations on stale ids are silent no-ops
/// and queries read as empty.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TargetId(pub(crate) u32, pub(crate) u32);

impl TargetId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Capability flags declaring which gestures a target can receive.
    ///
    /// Each capability is independent; a target with none of them is inert and every
    /// gesture attempt against it degrades to a no-op.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TargetFlags: u8 {
        /// Target participates in passive proximity hover.
        const HOVERABLE   = 0b0000_0001;
        /// Target can be carried by a single grabbing hand.
        const GRABBABLE   = 0b0000_0010;
        /// Target can be stretched cooperatively by any number of hands.
        const STRETCHABLE = 0b0000_0100;
        /// Target can be drag-carried and can act as a drop candidate.
        const DROPPABLE   = 0b0000_1000;
    }
}

impl Default for TargetFlags {
    /// Hover is the passive baseline; everything else is opt-in.
    fn default() -> Self {
        Self::HOVERABLE
    }
}

bitflags::bitflags! {
    /// Derived per-target state, recomputed from the participant sets on every mutation.
    ///
    /// Hosts read this to reflect interaction state visually. It is never written
    /// directly; [`Registry`](crate::Registry) mutators keep it in sync.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TargetState: u8 {
        /// At least one hand hovers the target.
        const HOVERED   = 0b0000_0001;
        /// A grabber is bound.
        const GRABBED   = 0b0000_0010;
        /// The stretcher set is non-empty.
        const STRETCHED = 0b0000_0100;
        /// A dragger is carrying the target.
        const DRAGGED   = 0b0000_1000;
        /// The target is some hand's current drop candidate.
        const DRAGOVER  = 0b0001_0000;
    }
}

impl TargetState {
    /// Whether an exclusive gesture holds the target.
    ///
    /// Hover is suppressed on a target for as long as this is true.
    pub const fn exclusively_held(self) -> bool {
        self.intersects(
            Self::GRABBED
                .union(Self::STRETCHED)
                .union(Self::DRAGGED),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_are_hover_only() {
        assert_eq!(TargetFlags::default(), TargetFlags::HOVERABLE);
    }

    #[test]
    fn exclusivity_ignores_hover_and_dragover() {
        assert!(!TargetState::HOVERED.exclusively_held());
        assert!(!TargetState::DRAGOVER.exclusively_held());
        assert!(!(TargetState::HOVERED | TargetState::DRAGOVER).exclusively_held());
    }

    #[test]
    fn any_exclusive_bit_suppresses() {
        assert!(TargetState::GRABBED.exclusively_held());
        assert!(TargetState::STRETCHED.exclusively_held());
        assert!(TargetState::DRAGGED.exclusively_held());
        assert!((TargetState::HOVERED | TargetState::GRABBED).exclusively_held());
    }
}
