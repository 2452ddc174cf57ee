use thiserror::Error;
use types::UnknownMetricKind;

/// Conditions raised while resolving or building a report.
///
/// Dirty records never produce an error; only references to things that do
/// not exist or arguments that cannot be understood do.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("season '{0}' not found")]
    SeasonNotFound(String),

    #[error("no seasons defined")]
    NoSeasons,

    #[error(transparent)]
    InvalidMetricKind(#[from] UnknownMetricKind),
}

impl ReportError {
    /// Whether the condition is a missing resource (as opposed to a bad argument).
    pub fn is_not_found(&self) -> bool {
        matches!(self, ReportError::SeasonNotFound(_) | ReportError::NoSeasons)
    }
}
