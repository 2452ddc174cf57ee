//! Identifier types for roster members and tenants.
//!
//! Both are string newtypes: ids come from an external document store and
//! are opaque to the dashboard.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

// =============================================================================
// Core ID Types
// =============================================================================

/// Stable identifier of a roster entry (the member document id).
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a clan. Each tenant owns exactly one schedule.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct TenantId(pub String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TenantId {
    fn default() -> Self {
        Self("default".to_string())
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_display() {
        let id = MemberId::from("m-42");
        assert_eq!(id.to_string(), "m-42");
        assert_eq!(id.as_str(), "m-42");
    }

    #[test]
    fn test_member_id_serializes_as_plain_string() {
        let id = MemberId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn test_tenant_default() {
        assert_eq!(TenantId::default().as_str(), "default");
    }
}
