// Copyright 2026 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle events emitted by the state machine.
//!
//! ## Overview
//!
//! Every mutating operation on [`Hands`](crate::machine::Hands) returns the
//! transition events it caused, in order, as a `Vec<GestureEvent>`. The core never
//! delivers events itself; a host-side dispatcher walks the vector and fans each
//! record out to whatever listens on the named entity (see the sketch in the crate
//! docs).
//!
//! Deduplication is structural: an event appears exactly when the underlying
//! registry membership changed, so replaying the same contact set tick after tick
//! yields empty vectors.

use grasp_registry::TargetId;

use crate::types::HandId;

/// A single gesture lifecycle transition.
///
/// `target` is the entity the event is addressed to. [`DragDrop`](Self::DragDrop)
/// is emitted twice per completed drop, once addressed to the carried item and once
/// to the drop target, each carrying the other participant as `counterpart`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GestureEvent {
    /// A hand started hovering the target.
    HoverStart {
        /// The hovering hand.
        hand: HandId,
        /// The hovered target.
        target: TargetId,
    },
    /// A hand stopped hovering the target.
    HoverEnd {
        /// The formerly hovering hand.
        hand: HandId,
        /// The target losing the hoverer.
        target: TargetId,
    },
    /// The target was bound to a grabbing hand.
    GrabStart {
        /// The grabbing hand.
        hand: HandId,
        /// The carried target.
        target: TargetId,
    },
    /// The grab was released.
    GrabEnd {
        /// The releasing hand.
        hand: HandId,
        /// The released target.
        target: TargetId,
    },
    /// The target went from unstretched to stretched.
    StretchStart {
        /// The hand whose engagement caused the transition.
        hand: HandId,
        /// The stretched target.
        target: TargetId,
    },
    /// The last stretcher let go.
    StretchEnd {
        /// The hand whose release caused the transition.
        hand: HandId,
        /// The unstretched target.
        target: TargetId,
    },
    /// The target is being drag-carried.
    DragStart {
        /// The carrying hand.
        hand: HandId,
        /// The carried target.
        target: TargetId,
    },
    /// The drag carry ended.
    DragEnd {
        /// The releasing hand.
        hand: HandId,
        /// The released target.
        target: TargetId,
    },
    /// The target became a hand's drop candidate.
    DragoverStart {
        /// The carrying hand.
        hand: HandId,
        /// The candidate drop target.
        target: TargetId,
    },
    /// The target stopped being a hand's drop candidate.
    DragoverEnd {
        /// The carrying hand.
        hand: HandId,
        /// The demoted drop target.
        target: TargetId,
    },
    /// A carried item was dropped onto a candidate.
    DragDrop {
        /// The hand completing the drop.
        hand: HandId,
        /// The entity this record is addressed to.
        target: TargetId,
        /// The other participant of the drop.
        counterpart: TargetId,
    },
}

impl GestureEvent {
    /// The stable wire name of the event, for hosts that dispatch by string.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::HoverStart { .. } => "hover-start",
            Self::HoverEnd { .. } => "hover-end",
            Self::GrabStart { .. } => "grab-start",
            Self::GrabEnd { .. } => "grab-end",
            Self::StretchStart { .. } => "stretch-start",
            Self::StretchEnd { .. } => "stretch-end",
            Self::DragStart { .. } => "drag-start",
            Self::DragEnd { .. } => "drag-end",
            Self::DragoverStart { .. } => "dragover-start",
            Self::DragoverEnd { .. } => "dragover-end",
            Self::DragDrop { .. } => "drag-drop",
        }
    }

    /// The hand involved in the transition.
    pub const fn hand(&self) -> HandId {
        match *self {
            Self::HoverStart { hand, .. }
            | Self::HoverEnd { hand, .. }
            | Self::GrabStart { hand, .. }
            | Self::GrabEnd { hand, .. }
            | Self::StretchStart { hand, .. }
            | Self::StretchEnd { hand, .. }
            | Self::DragStart { hand, .. }
            | Self::DragEnd { hand, .. }
            | Self::DragoverStart { hand, .. }
            | Self::DragoverEnd { hand, .. }
            | Self::DragDrop { hand, .. } => hand,
        }
    }

    /// The entity the event is addressed to.
    pub const fn target(&self) -> TargetId {
        match *self {
            Self::HoverStart { target, .. }
            | Self::HoverEnd { target, .. }
            | Self::GrabStart { target, .. }
            | Self::GrabEnd { target, .. }
            | Self::StretchStart { target, .. }
            | Self::StretchEnd { target, .. }
            | Self::DragStart { target, .. }
            | Self::DragEnd { target, .. }
            | Self::DragoverStart { target, .. }
            | Self::DragoverEnd { target, .. }
            | Self::DragDrop { target, .. } => target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::Hands;
    use grasp_registry::TargetFlags;

    #[test]
    fn wire_names_are_stable() {
        let mut hands = Hands::new();
        let h = hands.register_hand();
        let t = hands.insert_target(TargetFlags::HOVERABLE);
        let ev = hands.on_hit(h, t);
        assert_eq!(ev.len(), 1);
        assert_eq!(ev[0].name(), "hover-start");
        assert_eq!(ev[0].hand(), h);
        assert_eq!(ev[0].target(), t);
        let ev = hands.on_contact_lost(h, t);
        assert_eq!(ev[0].name(), "hover-end");
    }

    #[test]
    fn drag_drop_is_addressed_to_both_participants() {
        let mut hands = Hands::new();
        let h = hands.register_hand();
        let item = hands.insert_target(TargetFlags::DROPPABLE);
        let bin = hands.insert_target(TargetFlags::DROPPABLE);
        let _ = hands.press_drag(h);
        let _ = hands.on_hit(h, item);
        let _ = hands.on_hit(h, bin);
        let ev = hands.release_drag(h);
        let drops: alloc::vec::Vec<_> =
            ev.iter().filter(|e| e.name() == "drag-drop").collect();
        assert_eq!(drops.len(), 2, "one record per participant");
        assert!(drops.iter().any(|e| e.target() == item));
        assert!(drops.iter().any(|e| e.target() == bin));
    }
}
