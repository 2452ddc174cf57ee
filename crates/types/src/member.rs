//! Roster member types.
//!
//! [`Member`] is the fully-defaulted in-memory form of a stored member
//! document. [`PublicMember`] is what leaves the service: the same fields
//! minus anything internal, serialized with the camelCase names the
//! dashboard expects.

use serde::{Deserialize, Serialize};

/// A roster entry with every absent field resolved to its default.
///
/// Scalars default to `None`, the infantry flag to `false` and labels to an
/// empty list, so aggregation code never has to deal with partial records.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Member {
    pub nationality: Option<String>,
    /// Troop-type classification.
    pub main_troops: Option<String>,
    pub nickname: Option<String>,
    /// Peak observed power rating.
    pub highest_power: Option<f64>,
    pub units_killed: Option<u64>,
    pub units_dead: Option<u64>,
    /// Cumulative resource spend.
    pub mana_spent: Option<u64>,
    pub is_infantry_group: bool,
    pub labels: Vec<String>,
    /// Contact address. Internal only, never projected.
    pub email: Option<String>,
}

impl Member {
    /// Nickname if set and non-blank.
    pub fn display_name(&self) -> Option<&str> {
        self.nickname.as_deref().filter(|n| !n.trim().is_empty())
    }
}

/// Externally visible shape of a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMember {
    pub nationality: Option<String>,
    pub main_troops: Option<String>,
    pub nickname: Option<String>,
    pub highest_power: Option<f64>,
    pub units_killed: Option<u64>,
    pub units_dead: Option<u64>,
    pub mana_spent: Option<u64>,
    pub is_infantry_group: bool,
    pub labels: Vec<String>,
}

impl From<&Member> for PublicMember {
    fn from(member: &Member) -> Self {
        Self {
            nationality: member.nationality.clone(),
            main_troops: member.main_troops.clone(),
            nickname: member.nickname.clone(),
            highest_power: member.highest_power,
            units_killed: member.units_killed,
            units_dead: member.units_dead,
            mana_spent: member.mana_spent,
            is_infantry_group: member.is_infantry_group,
            labels: member.labels.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_member() {
        let member = Member::default();
        assert!(member.nationality.is_none());
        assert!(!member.is_infantry_group);
        assert!(member.labels.is_empty());
    }

    #[test]
    fn test_public_member_uses_camel_case() {
        let member = Member {
            main_troops: Some("Cavalry".into()),
            mana_spent: Some(1200),
            is_infantry_group: true,
            email: Some("hidden@example.com".into()),
            ..Default::default()
        };

        let json = serde_json::to_string(&PublicMember::from(&member)).unwrap();
        assert!(json.contains("\"mainTroops\":\"Cavalry\""));
        assert!(json.contains("\"manaSpent\":1200"));
        assert!(json.contains("\"isInfantryGroup\":true"));
        assert!(json.contains("\"labels\":[]"));
        assert!(!json.contains("hidden@example.com"));
    }

    #[test]
    fn test_display_name_ignores_blank() {
        let member = Member {
            nickname: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(member.display_name(), None);
    }
}
