//! Roster summarizer.
//!
//! Collapses a roster into counts per category for a fixed set of fields,
//! and projects stored members into their public shape.

use std::collections::BTreeMap;

use serde::Serialize;
use types::{Member, MemberId, PublicMember};

/// Category used for members with no value for a field.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Categorical fields counted by [`summarize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryField {
    Nationality,
    MainTroops,
}

impl CategoryField {
    pub const ALL: [CategoryField; 2] = [CategoryField::Nationality, CategoryField::MainTroops];

    /// Field name as exposed to clients.
    pub fn key(self) -> &'static str {
        match self {
            CategoryField::Nationality => "nationality",
            CategoryField::MainTroops => "mainTroops",
        }
    }

    /// The member's value for this field, if present and non-blank.
    pub fn value(self, member: &Member) -> Option<&str> {
        let raw = match self {
            CategoryField::Nationality => member.nationality.as_deref(),
            CategoryField::MainTroops => member.main_troops.as_deref(),
        };
        raw.filter(|v| !v.trim().is_empty())
    }
}

/// Categorical summary of a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterSummary {
    pub total_count: usize,
    /// field key -> category -> member count
    pub counts_by_field: BTreeMap<&'static str, BTreeMap<String, u64>>,
}

impl RosterSummary {
    /// Counts for one field. Always present for every [`CategoryField`].
    pub fn counts(&self, field: CategoryField) -> &BTreeMap<String, u64> {
        static EMPTY: BTreeMap<String, u64> = BTreeMap::new();
        self.counts_by_field.get(field.key()).unwrap_or(&EMPTY)
    }
}

/// Count members per category for every [`CategoryField`].
///
/// Every member lands in exactly one category per field, so each field's
/// counts add up to `total_count`.
pub fn summarize(members: &[Member]) -> RosterSummary {
    let mut counts_by_field: BTreeMap<&'static str, BTreeMap<String, u64>> = CategoryField::ALL
        .iter()
        .map(|field| (field.key(), BTreeMap::new()))
        .collect();

    for member in members {
        for field in CategoryField::ALL {
            let category = field.value(member).unwrap_or(UNKNOWN_CATEGORY);
            if let Some(counts) = counts_by_field.get_mut(field.key()) {
                *counts.entry(category.to_string()).or_insert(0) += 1;
            }
        }
    }

    RosterSummary {
        total_count: members.len(),
        counts_by_field,
    }
}

/// Map a stored member to its public shape.
pub fn project(member: &Member) -> PublicMember {
    PublicMember::from(member)
}

/// Project a whole roster, keyed and ordered by member id.
pub fn project_roster(members: &[(MemberId, Member)]) -> BTreeMap<MemberId, PublicMember> {
    members
        .iter()
        .map(|(id, member)| (id.clone(), project(member)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(nationality: Option<&str>, troops: Option<&str>) -> Member {
        Member {
            nationality: nationality.map(str::to_string),
            main_troops: troops.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_summarize_counts_unknown() {
        let roster = vec![
            member(Some("FR"), None),
            member(Some("FR"), None),
            Member::default(),
        ];

        let summary = summarize(&roster);

        assert_eq!(summary.total_count, 3);
        let nationality = summary.counts(CategoryField::Nationality);
        assert_eq!(nationality.get("FR"), Some(&2));
        assert_eq!(nationality.get(UNKNOWN_CATEGORY), Some(&1));
        let troops = summary.counts(CategoryField::MainTroops);
        assert_eq!(troops.len(), 1);
        assert_eq!(troops.get(UNKNOWN_CATEGORY), Some(&3));
    }

    #[test]
    fn test_summarize_blank_is_unknown() {
        let summary = summarize(&[member(Some("  "), Some("Archers"))]);
        assert_eq!(
            summary.counts(CategoryField::Nationality).get(UNKNOWN_CATEGORY),
            Some(&1)
        );
        assert_eq!(
            summary.counts(CategoryField::MainTroops).get("Archers"),
            Some(&1)
        );
    }

    #[test]
    fn test_summarize_empty_roster() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_count, 0);
        for field in CategoryField::ALL {
            assert!(summary.counts(field).is_empty());
        }
    }

    #[test]
    fn test_project_roster_orders_by_id() {
        let roster = vec![
            (MemberId::from("b"), member(Some("DE"), None)),
            (MemberId::from("a"), member(None, Some("Cavalry"))),
        ];

        let projected = project_roster(&roster);
        let ids: Vec<&str> = projected.keys().map(MemberId::as_str).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(
            projected[&MemberId::from("a")].main_troops.as_deref(),
            Some("Cavalry")
        );
    }
}
