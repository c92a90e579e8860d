// Copyright 2026 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grasp Gestures: a deterministic, `no_std` state machine for hand interaction.
//!
//! ## Overview
//!
//! This crate arbitrates the four gestures of a hand-interaction rig — hover, grab,
//! stretch, drag-drop — across any number of hands and targets.
//! It does not detect collisions.
//! Instead, feed it contact reports from your collider and button intents from your
//! input layer, and it emits a deterministic, deduplicated sequence of lifecycle
//! events you can dispatch.
//!
//! ## Inputs
//!
//! - [`Hands::on_hit`](crate::machine::Hands::on_hit) per (hand, target) contact each
//!   collision tick, and [`Hands::on_contact_lost`](crate::machine::Hands::on_contact_lost)
//!   when a contact ends.
//! - Three press/release intent pairs per hand: grab, stretch, drag. Pressing while
//!   already in contact engages immediately; pressing in empty space arms the intent
//!   for the next contact.
//!
//! ## Arbitration
//!
//! - Grab and drag carries are exclusive: one hand per target, one target per hand,
//!   and never both carries on one hand. Contested attempts are silent no-ops.
//! - Stretch is cooperative: any number of hands may hold one target, which stays
//!   stretched until the last one lets go.
//! - Hover is suppressed on a target for as long as an exclusive gesture holds it,
//!   and resumes for every hand still in contact the moment the gesture ends.
//! - A drag carry recognizes at most one drop candidate per hand; the last-touched
//!   droppable wins, demoting the previous candidate.
//!
//! ## Events
//!
//! Every mutating call returns `Vec<`[`GestureEvent`](crate::events::GestureEvent)`>`.
//! Emission is gated on registry membership changes, so replaying the same contact
//! set tick after tick yields empty vectors — repeats cost nothing and fire nothing.
//!
//! ## Dispatcher sketch
//!
//! The core never delivers events; a host-side dispatcher walks each returned
//! vector and fans the records out to whatever listens on the named entities.
//!
//! ```
//! use grasp_gestures::events::GestureEvent;
//! use grasp_gestures::machine::Hands;
//! use grasp_registry::TargetFlags;
//!
//! /// Deliver a single event to your scene's listener layer.
//! fn deliver(ev: &GestureEvent) {
//!     // e.g. scene.entity(ev.target()).emit(ev.name(), ev.hand());
//!     let _ = (ev.name(), ev.hand(), ev.target());
//! }
//!
//! let mut hands = Hands::new();
//! let hand = hands.register_hand();
//! let cube = hands.insert_target(TargetFlags::HOVERABLE | TargetFlags::GRABBABLE);
//!
//! // One collision tick: the contact becomes a hover.
//! for ev in hands.on_hit(hand, cube) {
//!     deliver(&ev);
//! }
//!
//! // A button press upgrades the hover into a carry.
//! let names: Vec<_> = hands.press_grab(hand).iter().map(|e| e.name()).collect();
//! assert_eq!(names, ["hover-end", "grab-start"]);
//! ```
//!
//! ## Adapters
//!
//! The feature-gated `adapters::proximity` module (feature `proximity_adapter`)
//! ships a circular proximity feed
//! for examples and tests; real hosts wire their own collider the same way.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod events;
pub mod machine;
pub mod types;
