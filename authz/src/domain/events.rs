// Copyright (c) 2026 Contextgate Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Domain events for the authorization bounded context
//! Published per decision so denials are auditable without logging chunk
//! content. `batch_id` correlates the per-chunk events of one filter call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::decision::{DenyReason, GrantRule};

/// Authorization audit events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessEvent {
    /// A chunk passed the access check
    ChunkGranted {
        batch_id: Uuid,
        user_id: String,
        chunk_id: String,
        rule: GrantRule,
        timestamp: DateTime<Utc>,
    },

    /// A chunk was withheld from the caller
    ChunkDenied {
        batch_id: Uuid,
        user_id: String,
        chunk_id: String,
        reason: DenyReason,
        timestamp: DateTime<Utc>,
    },

    /// A batch of candidates finished filtering
    BatchFiltered {
        batch_id: Uuid,
        user_id: String,
        candidates: usize,
        authorized: usize,
        malformed_dropped: usize,
        timestamp: DateTime<Utc>,
    },
}

impl AccessEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            AccessEvent::ChunkGranted { .. } => "chunk_granted",
            AccessEvent::ChunkDenied { .. } => "chunk_denied",
            AccessEvent::BatchFiltered { .. } => "batch_filtered",
        }
    }
}
