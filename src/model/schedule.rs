use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::error::EngineError;
use crate::model::EmployeeId;

/// Classification of a date's labor obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DayType {
    Work,
    Rest,
    HolidayEligible,
    Compensatory,
}

/// One row of the cyclic schedule table, keyed by
/// (shift_code, cycle_week, day_of_week).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRule {
    pub shift_code: String,
    pub cycle_week: u32,
    /// Ledger convention: 1 = Sunday .. 7 = Saturday.
    pub day_of_week: u32,
    pub planned_minutes: i64,
    pub day_type: DayType,
    pub scheduled_start: NaiveTime,
    pub scheduled_end: NaiveTime,
}

/// Exact-date forced schedule, highest precedence. Unique per (employee, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyOverride {
    pub employee: EmployeeId,
    pub date: NaiveDate,
    pub day_type: DayType,
    pub planned_minutes: i64,
    pub scheduled_start: Option<NaiveTime>,
    pub scheduled_end: Option<NaiveTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveCategory {
    Leave,
    Vacation,
    Medical,
}

/// Operator-entered absence range. Covered dates compute with zero worked and
/// zero planned minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRange {
    pub employee: EmployeeId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub category: LeaveCategory,
}

impl LeaveRange {
    /// Rejects inverted ranges before anything touches a store.
    pub fn new(
        employee: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
        category: LeaveCategory,
    ) -> Result<Self, EngineError> {
        if end < start {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok(LeaveRange {
            employee,
            start,
            end,
            category,
        })
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Bulk-uploaded explicit schedule for one employee and date. Unique per
/// (employee, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub employee: EmployeeId,
    pub date: NaiveDate,
    pub day_type: DayType,
    pub planned_minutes: i64,
    pub scheduled_start: Option<NaiveTime>,
    pub scheduled_end: Option<NaiveTime>,
}

/// Inclusive calendar-day range of a report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EngineError> {
        if end < start {
            return Err(EngineError::InvalidRange { start, end });
        }
        Ok(DateRange { start, end })
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Same range padded outward on both sides; an overnight shift can anchor
    /// the day before the window and punch out the day after it.
    pub fn padded(&self, before: i64, after: i64) -> DateRange {
        DateRange {
            start: self.start - Duration::days(before),
            end: self.end + Duration::days(after),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn leave_range_rejects_inverted_dates() {
        let emp = EmployeeId::new("0601000343").unwrap();
        let err = LeaveRange::new(emp, d("2025-03-10"), d("2025-03-01"), LeaveCategory::Medical);
        assert!(matches!(err, Err(EngineError::InvalidRange { .. })));
    }

    #[test]
    fn date_range_iterates_inclusive() {
        let range = DateRange::new(d("2025-03-01"), d("2025-03-03")).unwrap();
        let days: Vec<_> = range.days().collect();
        assert_eq!(days, vec![d("2025-03-01"), d("2025-03-02"), d("2025-03-03")]);
    }
}
