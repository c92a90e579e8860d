// Copyright 2026 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the state machine: hand identifiers, modes, hover diagnostics.

/// Identifier for a registered hand controller.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter, in the same shape as
/// `grasp_registry::TargetId`.
///
/// ## Liveness
///
/// Use [`Hands::is_hand_alive`](crate::machine::Hands::is_hand_alive) to check whether
/// a `HandId` still refers to a live hand. Operations on stale ids are silent no-ops.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct HandId(pub(crate) u32, pub(crate) u32);

impl HandId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Derived gesture mode of a hand.
///
/// A hand can hold a stretch alongside a carry; the derived mode reports the
/// carry first (grab, then drag), then stretch, then hover.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum GestureMode {
    /// No gesture and no hover.
    #[default]
    Idle,
    /// At least one hovered target, nothing held.
    Hovering,
    /// Carrying a target via grab.
    Grabbing,
    /// Stretching a target.
    Stretching,
    /// Carrying a target via drag.
    Dragging,
}

/// The most recent hover-category transition a hand went through.
///
/// Kept per hand as a diagnostic: a rejected alternate-gesture attempt (say, a
/// dragover onto a target that is not droppable) must not disturb it, so a consumer
/// can tell a real hover transition apart from a rejected one.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HoverTransition {
    /// The hand started hovering a target.
    HoverStart,
    /// The hand stopped hovering a target.
    HoverEnd,
    /// A target became the hand's drop candidate.
    DragoverStart,
    /// A target stopped being the hand's drop candidate.
    DragoverEnd,
}
