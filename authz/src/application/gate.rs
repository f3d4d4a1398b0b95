// Copyright (c) 2026 Contextgate Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # AccessGate — Chunk Authorization Service
//!
//! Application service sitting between the retrieval collaborator and the
//! prompt assembler. It wraps the pure domain decision with audit events and
//! structured logging; the verdicts themselves are exactly those of
//! [`crate::domain::decision`].
//!
//! ## Failure Policy
//!
//! A missing permission set fails closed ([`AuthzError::MissingPermissionSet`]).
//! A single malformed record inside a batch is dropped and the rest of the
//! batch proceeds — one bad record must not deny a caller the legitimate
//! remainder of a result set. Audit-sink failures are logged and never
//! change a verdict.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    check_access, evaluate, AccessDecision, AccessEvent, AuthzError, ChunkDescriptor,
    PermissionSet,
};

/// Sink for authorization audit events.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: AccessEvent) -> Result<()>;
}

/// Sink for callers without an audit pipeline.
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn publish(&self, _event: AccessEvent) -> Result<()> {
        Ok(())
    }
}

/// AccessGate interface
pub trait AccessGate: Send + Sync {
    /// Check a single chunk. Fails closed when either argument is absent.
    fn check(
        &self,
        permissions: Option<&PermissionSet>,
        chunk: Option<&ChunkDescriptor>,
    ) -> Result<bool, AuthzError>;

    /// Keep the authorized subsequence of `chunks` in original ranking
    /// order. The returned list is the complete authorized set for this
    /// request; the caller must not re-request withheld chunks.
    fn filter_authorized(
        &self,
        permissions: &PermissionSet,
        chunks: Vec<ChunkDescriptor>,
    ) -> Vec<ChunkDescriptor>;

    /// Like [`Self::filter_authorized`], but for the retrieval boundary
    /// where individual records may have failed to decode. Absent entries
    /// are dropped, the rest of the batch proceeds.
    fn filter_candidates(
        &self,
        permissions: &PermissionSet,
        candidates: Vec<Option<ChunkDescriptor>>,
    ) -> Vec<ChunkDescriptor>;
}

/// Standard implementation of AccessGate
pub struct StandardAccessGate {
    event_sink: Arc<dyn EventSink>,
}

impl StandardAccessGate {
    pub fn new() -> Self {
        Self {
            event_sink: Arc::new(NoopEventSink),
        }
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    fn publish(&self, event: AccessEvent) {
        if let Err(e) = self.event_sink.publish(event) {
            tracing::warn!("audit event dropped: {}", e);
        }
    }

    fn filter_inner(
        &self,
        permissions: &PermissionSet,
        candidates: Vec<Option<ChunkDescriptor>>,
    ) -> Vec<ChunkDescriptor> {
        let batch_id = Uuid::new_v4();
        let total = candidates.len();
        let mut malformed_dropped = 0usize;
        let mut authorized = Vec::new();

        for candidate in candidates {
            let Some(chunk) = candidate else {
                malformed_dropped += 1;
                tracing::warn!(
                    user_id = permissions.user_id(),
                    %batch_id,
                    "malformed chunk record dropped from batch"
                );
                continue;
            };

            match evaluate(permissions, &chunk) {
                AccessDecision::Granted { rule } => {
                    tracing::debug!(
                        user_id = permissions.user_id(),
                        chunk_id = chunk.id.as_str(),
                        ?rule,
                        "chunk authorized"
                    );
                    self.publish(AccessEvent::ChunkGranted {
                        batch_id,
                        user_id: permissions.user_id().to_string(),
                        chunk_id: chunk.id.clone(),
                        rule,
                        timestamp: Utc::now(),
                    });
                    authorized.push(chunk);
                }
                AccessDecision::Denied { reason } => {
                    tracing::debug!(
                        user_id = permissions.user_id(),
                        chunk_id = chunk.id.as_str(),
                        ?reason,
                        "chunk withheld"
                    );
                    self.publish(AccessEvent::ChunkDenied {
                        batch_id,
                        user_id: permissions.user_id().to_string(),
                        chunk_id: chunk.id.clone(),
                        reason,
                        timestamp: Utc::now(),
                    });
                }
            }
        }

        self.publish(AccessEvent::BatchFiltered {
            batch_id,
            user_id: permissions.user_id().to_string(),
            candidates: total,
            authorized: authorized.len(),
            malformed_dropped,
            timestamp: Utc::now(),
        });

        authorized
    }
}

impl Default for StandardAccessGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessGate for StandardAccessGate {
    fn check(
        &self,
        permissions: Option<&PermissionSet>,
        chunk: Option<&ChunkDescriptor>,
    ) -> Result<bool, AuthzError> {
        check_access(permissions, chunk)
    }

    fn filter_authorized(
        &self,
        permissions: &PermissionSet,
        chunks: Vec<ChunkDescriptor>,
    ) -> Vec<ChunkDescriptor> {
        self.filter_inner(permissions, chunks.into_iter().map(Some).collect())
    }

    fn filter_candidates(
        &self,
        permissions: &PermissionSet,
        candidates: Vec<Option<ChunkDescriptor>>,
    ) -> Vec<ChunkDescriptor> {
        self.filter_inner(permissions, candidates)
    }
}
