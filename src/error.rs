use chrono::NaiveDate;
use derive_more::Display;

use crate::model::EmployeeId;

/// Failures a reconciliation request can surface to its caller.
///
/// A backing-store failure fails the whole request; a missing schedule only
/// drops the affected employee from a batch (the aggregator logs it and
/// carries on), but is returned as-is from single-employee entry points.
#[derive(Debug, Display)]
pub enum EngineError {
    #[display(fmt = "data source unavailable: {}", _0)]
    DataSource(anyhow::Error),

    #[display(fmt = "invalid date range: end {} precedes start {}", end, start)]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[display(fmt = "employee {} has no resolvable shift code", _0)]
    MissingSchedule(EmployeeId),
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::DataSource(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for EngineError {
    fn from(e: anyhow::Error) -> Self {
        EngineError::DataSource(e)
    }
}
