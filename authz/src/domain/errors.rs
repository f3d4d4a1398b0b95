// Copyright (c) 2026 Contextgate Contributors
// SPDX-License-Identifier: AGPL-3.0

use thiserror::Error;

/// Errors raised by the authorization engine.
///
/// The missing-input variants signal construction-time misuse of the checked
/// API, not runtime conditions to retry: the engine performs no I/O and has
/// no transient-failure class. Empty grant sets are valid inputs and never
/// produce an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthzError {
    /// The checked API was invoked without a permission set. Authorization is
    /// never attempted on behalf of an implicit caller.
    #[error("authorization attempted without a permission set")]
    MissingPermissionSet,

    /// The checked API was invoked without a chunk to evaluate.
    #[error("authorization attempted without a chunk")]
    MissingChunk,

    /// A permission set was constructed with an empty user identifier.
    #[error("permission set requires a non-empty user id")]
    EmptyUserId,
}
