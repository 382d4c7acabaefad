//! # Security Exclusions
//!
//! Caller-declared opt-outs from provider-side safety checks. Pure data: the
//! engine forwards them verbatim in every request envelope and never acts on
//! them itself.

use serde::{Deserialize, Serialize};

/// Checks the caller asks the provider to skip.
///
/// Unset flags are omitted from the wire so the provider applies its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SecurityExclusions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_assert_to_transactions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_metadata_integrity: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_match: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whitelisted_actions: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_integrity: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relaxed_contract_parsing: Option<bool>,
}

impl SecurityExclusions {
    /// True when no exclusion is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
