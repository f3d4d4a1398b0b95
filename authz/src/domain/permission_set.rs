// Copyright (c) 2026 Contextgate Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # PermissionSet Value Object
//!
//! The caller-scoped collection of security labels, tags, and opaque claims
//! a given identity is granted. Constructed once per request by the
//! authentication collaborator and immutable afterwards — no mutating API is
//! exposed, which keeps verdicts consistent under concurrent use without
//! locks.
//!
//! ## Normalization
//!
//! All membership is case-insensitive. Labels, tags, and claim keys are
//! lowercased and trimmed at construction, and every query normalizes its
//! argument the same way, so `"Finance"` matches a grant of `"finance"`.
//! Blank entries are discarded during normalization; the sets never contain
//! an empty member.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::errors::AuthzError;

/// Lowercase, trimmed form used for every membership comparison.
pub(crate) fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Immutable grant set for a single caller identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PermissionSetSpec")]
pub struct PermissionSet {
    user_id: String,
    allowed_labels: BTreeSet<String>,
    allowed_tags: BTreeSet<String>,
    custom_claims: BTreeMap<String, String>,
}

/// Wire shape for a permission set, before normalization. Deserialization
/// funnels through [`PermissionSet::new`] so the case and blank-entry
/// invariants hold for permission sets loaded from session storage as well
/// as those built in code.
#[derive(Debug, Deserialize)]
struct PermissionSetSpec {
    user_id: String,
    #[serde(default)]
    allowed_labels: Vec<String>,
    #[serde(default)]
    allowed_tags: Vec<String>,
    #[serde(default)]
    custom_claims: BTreeMap<String, String>,
}

impl TryFrom<PermissionSetSpec> for PermissionSet {
    type Error = AuthzError;

    fn try_from(spec: PermissionSetSpec) -> Result<Self, Self::Error> {
        PermissionSet::new(spec.user_id, spec.allowed_labels, spec.allowed_tags)
            .map(|set| set.with_claims(spec.custom_claims))
    }
}

impl PermissionSet {
    /// Build a permission set for `user_id` with the given label and tag
    /// grants. Entries are lowercased and trimmed; blank entries are
    /// dropped (an empty string can never be granted).
    ///
    /// # Errors
    ///
    /// `AuthzError::EmptyUserId` when `user_id` is empty or whitespace.
    pub fn new<L, T>(
        user_id: impl Into<String>,
        allowed_labels: L,
        allowed_tags: T,
    ) -> Result<Self, AuthzError>
    where
        L: IntoIterator,
        L::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(AuthzError::EmptyUserId);
        }
        Ok(Self {
            user_id,
            allowed_labels: normalize_set(allowed_labels),
            allowed_tags: normalize_set(allowed_tags),
            custom_claims: BTreeMap::new(),
        })
    }

    /// Attach an opaque claim. Claims are carried for external policy layers
    /// and never consulted by the decision function itself. Keys are
    /// case-insensitive; a later claim with the same key wins.
    pub fn with_claim(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        let key = normalize(key.as_ref());
        if !key.is_empty() {
            self.custom_claims.insert(key, value.into());
        }
        self
    }

    /// Attach a batch of claims. Same semantics as [`Self::with_claim`].
    pub fn with_claims(self, claims: impl IntoIterator<Item = (String, String)>) -> Self {
        claims
            .into_iter()
            .fold(self, |set, (key, value)| set.with_claim(key, value))
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Granted security labels, in normalized form.
    pub fn allowed_labels(&self) -> &BTreeSet<String> {
        &self.allowed_labels
    }

    /// Granted tags, in normalized form.
    pub fn allowed_tags(&self) -> &BTreeSet<String> {
        &self.allowed_tags
    }

    /// Whether `label` is granted, case-insensitively.
    pub fn has_label(&self, label: &str) -> bool {
        self.allowed_labels.contains(&normalize(label))
    }

    /// Whether any of `tags` is granted, case-insensitively. OR semantics: a
    /// single overlap suffices.
    pub fn grants_any_tag<'a>(&self, tags: impl IntoIterator<Item = &'a str>) -> bool {
        tags.into_iter()
            .any(|tag| self.allowed_tags.contains(&normalize(tag)))
    }

    /// Look up an opaque claim by case-insensitive key.
    pub fn claim(&self, key: &str) -> Option<&str> {
        self.custom_claims.get(&normalize(key)).map(String::as_str)
    }
}

fn normalize_set<I>(entries: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| normalize(entry.as_ref()))
        .filter(|entry| !entry.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_user_id() {
        assert_eq!(
            PermissionSet::new("", ["public"], Vec::<String>::new()).unwrap_err(),
            AuthzError::EmptyUserId,
        );
        assert_eq!(
            PermissionSet::new("   ", Vec::<String>::new(), Vec::<String>::new()).unwrap_err(),
            AuthzError::EmptyUserId,
        );
    }

    #[test]
    fn test_normalizes_case_and_drops_blanks() {
        let set = PermissionSet::new(
            "alice",
            ["Public", " CONFIDENTIAL ", "", "public"],
            ["HR", "  "],
        )
        .unwrap();

        assert_eq!(set.allowed_labels().len(), 2);
        assert!(set.has_label("public"));
        assert!(set.has_label("Confidential"));
        assert!(!set.has_label(""));
        assert!(set.grants_any_tag(["hr"]));
        assert!(!set.grants_any_tag([""]));
    }

    #[test]
    fn test_tag_membership_is_or_semantics() {
        let set = PermissionSet::new("alice", Vec::<String>::new(), ["legal"]).unwrap();
        assert!(set.grants_any_tag(["hr", "legal"]));
        assert!(!set.grants_any_tag(["hr", "finance"]));
    }

    #[test]
    fn test_claims_are_case_insensitive_by_key() {
        let set = PermissionSet::new("alice", Vec::<String>::new(), Vec::<String>::new())
            .unwrap()
            .with_claim("Department", "finance");

        assert_eq!(set.claim("department"), Some("finance"));
        assert_eq!(set.claim("DEPARTMENT"), Some("finance"));
        assert_eq!(set.claim("team"), None);
    }

    #[test]
    fn test_deserialization_applies_normalization() {
        let set: PermissionSet = serde_json::from_value(serde_json::json!({
            "user_id": "alice",
            "allowed_labels": ["Public", ""],
            "allowed_tags": ["Legal"],
            "custom_claims": {"Department": "finance"}
        }))
        .unwrap();

        assert!(set.has_label("PUBLIC"));
        assert!(set.grants_any_tag(["legal"]));
        assert_eq!(set.claim("department"), Some("finance"));
        assert_eq!(set.allowed_labels().len(), 1);
    }

    #[test]
    fn test_deserialization_rejects_empty_user_id() {
        let result: Result<PermissionSet, _> =
            serde_json::from_value(serde_json::json!({"user_id": ""}));
        assert!(result.is_err());
    }
}
