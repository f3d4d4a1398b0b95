// Copyright (c) 2026 Contextgate Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Access Decision Function
//!
//! The single non-trivial rule in the engine. Precedence is fixed:
//!
//! 1. A labeled chunk is authorized iff the label is granted. Tags are never
//!    consulted for labeled chunks — a single explicit classification
//!    outranks looser tag-based grants.
//! 2. An unlabeled, tagged chunk is authorized iff any one tag is granted
//!    (OR semantics).
//! 3. A chunk with no label and no tags carries no access-control metadata
//!    and is authorized unconditionally.
//!
//! The unrestricted path depends only on the chunk's own metadata, never on
//! the caller's grant sets being empty: a caller with empty grants unlocks
//! unrestricted chunks and nothing else. Every call is a stateless,
//! side-effect-free evaluation of its two arguments.

use serde::{Deserialize, Serialize};

use super::chunk::ChunkDescriptor;
use super::errors::AuthzError;
use super::permission_set::PermissionSet;

/// Which rule granted access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantRule {
    /// The chunk's security label is in the caller's granted labels.
    LabelMatch,
    /// At least one chunk tag is in the caller's granted tags.
    TagMatch,
    /// The chunk carries no access-control metadata.
    Unrestricted,
}

/// Why access was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// The chunk is classified and the caller lacks the matching label grant.
    LabelNotGranted,
    /// The chunk is tag-restricted and no tag overlaps the caller's grants.
    NoMatchingTag,
}

/// Reasoned verdict for one (permission set, chunk) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum AccessDecision {
    Granted { rule: GrantRule },
    Denied { reason: DenyReason },
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted { .. })
    }
}

/// Evaluate one chunk against one permission set, returning the verdict and
/// the rule or reason behind it, for audit events and logs.
pub fn evaluate(permissions: &PermissionSet, chunk: &ChunkDescriptor) -> AccessDecision {
    // Classification dominates: tag grants cannot bypass a label.
    if let Some(label) = chunk.label() {
        return if permissions.has_label(label) {
            AccessDecision::Granted {
                rule: GrantRule::LabelMatch,
            }
        } else {
            AccessDecision::Denied {
                reason: DenyReason::LabelNotGranted,
            }
        };
    }

    let mut tags = chunk.effective_tags().peekable();
    if tags.peek().is_some() {
        return if permissions.grants_any_tag(tags) {
            AccessDecision::Granted {
                rule: GrantRule::TagMatch,
            }
        } else {
            AccessDecision::Denied {
                reason: DenyReason::NoMatchingTag,
            }
        };
    }

    AccessDecision::Granted {
        rule: GrantRule::Unrestricted,
    }
}

/// Boolean form of [`evaluate`].
pub fn is_authorized(permissions: &PermissionSet, chunk: &ChunkDescriptor) -> bool {
    evaluate(permissions, chunk).is_granted()
}

/// Fail-closed entry point for callers whose inputs may be absent, such as a
/// request handler assembling both arguments from deserialized session and
/// retrieval payloads. A missing argument is a programming error surfaced to
/// the immediate caller, never an implicit allow.
///
/// # Errors
///
/// - `MissingPermissionSet` when `permissions` is `None`
/// - `MissingChunk` when `chunk` is `None`
pub fn check_access(
    permissions: Option<&PermissionSet>,
    chunk: Option<&ChunkDescriptor>,
) -> Result<bool, AuthzError> {
    let permissions = permissions.ok_or(AuthzError::MissingPermissionSet)?;
    let chunk = chunk.ok_or(AuthzError::MissingChunk)?;
    Ok(is_authorized(permissions, chunk))
}

/// Keep the authorized subsequence of `chunks`, preserving the retrieval
/// ranking order exactly. No re-ranking, no deduplication; applying the
/// filter to its own output is a no-op.
pub fn filter_authorized(
    permissions: &PermissionSet,
    chunks: Vec<ChunkDescriptor>,
) -> Vec<ChunkDescriptor> {
    chunks
        .into_iter()
        .filter(|chunk| is_authorized(permissions, chunk))
        .collect()
}
