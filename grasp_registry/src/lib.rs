// Copyright 2026 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grasp Registry: participant bookkeeping for gesture targets.
//!
//! Grasp Registry is the shared substrate of the Grasp interaction stack.
//!
//! - Registers targets with capability flags ([`TargetFlags`]): hoverable, grabbable,
//!   stretchable, droppable.
//! - Tracks, per target, which hands currently participate in each gesture: an ordered
//!   hoverer set, an exclusive grabber, a cooperative stretcher set, an exclusive
//!   dragger, and the drop-candidate set.
//! - Derives per-target state ([`TargetState`]) from the participant sets on every
//!   mutation; the cached state is what a host reflects visually.
//!
//! Mutators are idempotent and return whether they changed anything. Callers use that
//! changed-flag as the event-deduplication mechanism: a transition event is emitted
//! exactly when the registry reports a membership change, never from separate
//! "already fired" bookkeeping.
//!
//! The registry is generic over the hand key `H` so the interaction layer can bring
//! its own handle type. It does not decide gesture policy — which hand may engage
//! what, and when — that lives upstream in `grasp_gestures`.
//!
//! # Example
//!
//! ```rust
//! use grasp_registry::{Registry, TargetFlags, TargetState};
//!
//! let mut reg: Registry<u32> = Registry::new();
//! let t = reg.insert(TargetFlags::HOVERABLE | TargetFlags::GRABBABLE);
//!
//! assert!(reg.add_hoverer(t, 1));
//! assert!(!reg.add_hoverer(t, 1), "second add is a no-op");
//! assert!(reg.state(t).contains(TargetState::HOVERED));
//!
//! // The grabber slot is exclusive.
//! assert!(reg.set_grabber(t, 1));
//! assert!(!reg.set_grabber(t, 2), "contested grab is rejected");
//! assert_eq!(reg.grabber(t), Some(1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod registry;
pub mod types;

pub use registry::Registry;
pub use types::{TargetFlags, TargetId, TargetState};
