// Copyright (c) 2026 Contextgate Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Contextgate Authorization Engine
//!
//! Attribute-based access control for retrieved content chunks. Before
//! retrieved chunks are assembled into a model prompt, every chunk passes a
//! per-caller access check; unauthorized chunks never reach the prompt
//! assembler.
//!
//! # Architecture
//!
//! - **Layer:** Access Control Layer
//! - **Purpose:** Gates the retrieval → prompt-assembly boundary
//!
//! The domain layer holds the value objects ([`PermissionSet`],
//! [`ChunkDescriptor`]) and the pure decision function; the application layer
//! wraps them in the [`AccessGate`] service, which adds audit events and
//! structured logging. The engine performs no I/O and holds no shared state,
//! so every entry point is safe to call from any number of concurrent
//! request handlers.

pub mod domain;
pub mod application;

pub use domain::*;
pub use application::*;
