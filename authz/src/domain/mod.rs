// Copyright (c) 2026 Contextgate Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Domain layer for chunk authorization
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Value objects and the pure decision function

pub mod chunk;
pub mod decision;
pub mod errors;
pub mod events;
pub mod permission_set;

pub use chunk::*;
pub use decision::*;
pub use errors::*;
pub use events::*;
pub use permission_set::*;
