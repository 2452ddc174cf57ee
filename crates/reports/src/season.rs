//! Season and week resolution.
//!
//! A [`SeasonCatalog`] wraps the season definitions read from the store, in
//! stored order. Week order matters downstream: series points are aligned
//! with weeks by index, so weeks are always returned sorted by start date.

use types::{Season, WeekBoundary};

use crate::error::ReportError;

/// Chart label for the week at `index` (0-based): `Week <n> (<start date>)`.
pub fn week_label(index: usize, week: &WeekBoundary) -> String {
    format!("Week {} ({})", index + 1, week.start.format("%Y-%m-%d"))
}

/// Read-only view over the stored seasons.
#[derive(Debug, Clone, Default)]
pub struct SeasonCatalog {
    seasons: Vec<Season>,
}

impl SeasonCatalog {
    /// `seasons` must be in stored order; the current-season fallback uses it.
    pub fn new(seasons: Vec<Season>) -> Self {
        Self { seasons }
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    /// Season names in stored order.
    pub fn names(&self) -> Vec<&str> {
        self.seasons.iter().map(|s| s.name.as_str()).collect()
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Result<&Season, ReportError> {
        self.seasons
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| ReportError::SeasonNotFound(name.to_string()))
    }

    /// Weeks of `name` in chronological order (index 0 = earliest).
    ///
    /// Weeks sharing a start date keep their stored order.
    pub fn resolve_weeks(&self, name: &str) -> Result<Vec<WeekBoundary>, ReportError> {
        let mut weeks = self.get(name)?.weeks.clone();
        weeks.sort_by_key(|w| w.start);
        Ok(weeks)
    }

    /// Labels for the resolved weeks of `name`.
    pub fn week_labels(&self, name: &str) -> Result<Vec<String>, ReportError> {
        Ok(self
            .resolve_weeks(name)?
            .iter()
            .enumerate()
            .map(|(i, week)| week_label(i, week))
            .collect())
    }

    /// The running season.
    ///
    /// The last season flagged current, in stored order. When none is
    /// flagged, the last season in stored order. `None` only for an empty
    /// catalog.
    pub fn current_season(&self) -> Option<&str> {
        self.seasons
            .iter()
            .rev()
            .find(|s| s.current)
            .or_else(|| self.seasons.last())
            .map(|s| s.name.as_str())
    }

    /// Like [`current_season`](Self::current_season), as an error for callers
    /// that cannot proceed without one.
    pub fn require_current(&self) -> Result<&str, ReportError> {
        self.current_season().ok_or(ReportError::NoSeasons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn week(start_day: u32) -> WeekBoundary {
        let start = NaiveDate::from_ymd_opt(2024, 1, start_day).unwrap();
        WeekBoundary::new(start, start + chrono::Days::new(6)).unwrap()
    }

    #[test]
    fn test_resolve_weeks_sorts_chronologically() {
        let catalog = SeasonCatalog::new(vec![Season::new("S1", vec![week(15), week(1), week(8)])]);

        let weeks = catalog.resolve_weeks("S1").unwrap();
        let starts: Vec<u32> = weeks.iter().map(|w| chrono::Datelike::day(&w.start)).collect();
        assert_eq!(starts, vec![1, 8, 15]);
    }

    #[test]
    fn test_unknown_season_is_not_found() {
        let catalog = SeasonCatalog::new(vec![Season::new("S1", vec![])]);
        let err = catalog.resolve_weeks("S9").unwrap_err();
        assert_eq!(err, ReportError::SeasonNotFound("S9".into()));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_lookup_is_exact() {
        let catalog = SeasonCatalog::new(vec![Season::new("Season 1", vec![])]);
        assert!(catalog.get("season 1").is_err());
        assert!(catalog.get("Season 1").is_ok());
    }

    #[test]
    fn test_week_labels() {
        let catalog = SeasonCatalog::new(vec![Season::new("S1", vec![week(8), week(1)])]);
        assert_eq!(
            catalog.week_labels("S1").unwrap(),
            vec!["Week 1 (2024-01-01)", "Week 2 (2024-01-08)"]
        );
    }

    #[test]
    fn test_zero_week_season_resolves_empty() {
        let catalog = SeasonCatalog::new(vec![Season::new("Off", vec![])]);
        assert!(catalog.resolve_weeks("Off").unwrap().is_empty());
        assert!(catalog.week_labels("Off").unwrap().is_empty());
    }

    #[test]
    fn test_current_season_prefers_flag() {
        let catalog = SeasonCatalog::new(vec![
            Season::new("S1", vec![]),
            Season::new("S2", vec![]).flagged_current(),
            Season::new("S3", vec![]),
        ]);
        assert_eq!(catalog.current_season(), Some("S2"));
    }

    #[test]
    fn test_current_season_last_flag_wins() {
        let catalog = SeasonCatalog::new(vec![
            Season::new("S1", vec![]).flagged_current(),
            Season::new("S2", vec![]).flagged_current(),
            Season::new("S3", vec![]),
        ]);
        assert_eq!(catalog.current_season(), Some("S2"));
    }

    #[test]
    fn test_current_season_falls_back_to_last_stored() {
        let catalog = SeasonCatalog::new(vec![Season::new("S2", vec![]), Season::new("S1", vec![])]);
        assert_eq!(catalog.current_season(), Some("S1"));
        assert_eq!(catalog.names(), vec!["S2", "S1"]);
    }

    #[test]
    fn test_empty_catalog_has_no_current() {
        let catalog = SeasonCatalog::default();
        assert_eq!(catalog.current_season(), None);
        assert_eq!(catalog.require_current(), Err(ReportError::NoSeasons));
    }
}
