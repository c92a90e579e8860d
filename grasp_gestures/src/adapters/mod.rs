// Copyright 2026 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters that feed the state machine from concrete collision sources.
//!
//! Enabled via feature flags to keep the core small and `no_std` by default.

#[cfg(feature = "proximity_adapter")]
pub mod proximity;
