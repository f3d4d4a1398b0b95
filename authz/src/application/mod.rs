// Copyright (c) 2026 Contextgate Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Application layer for chunk authorization
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** The [`AccessGate`] service wrapping the domain decision

pub mod gate;

pub use gate::*;
