use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::model::EmployeeId;

/// Status label attached to a day's balance when something other than a plain
/// work day applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DayStatus {
    Work,
    Rest,
    Holiday,
    Compensatory,
    Leave,
    Override,
}

/// Categorized minute buckets for one employee and calendar day. All buckets
/// are non-negative except `undertime`, which is zero or negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyBalance {
    pub date: NaiveDate,
    pub status: DayStatus,
    pub worked_minutes: i64,
    pub planned_minutes: i64,
    pub normal: i64,
    pub overtime50: i64,
    pub overtime100: i64,
    pub undertime: i64,
}

/// Bucket sums across the requested period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotal {
    pub worked_minutes: i64,
    pub normal: i64,
    pub overtime50: i64,
    pub overtime100: i64,
    pub undertime: i64,
}

impl PeriodTotal {
    pub fn accumulate(&mut self, day: &DailyBalance) {
        self.worked_minutes += day.worked_minutes;
        self.normal += day.normal;
        self.overtime50 += day.overtime50;
        self.overtime100 += day.overtime100;
        self.undertime += day.undertime;
    }
}

/// Per-employee slice of a report: one balance per requested day, ascending,
/// plus period totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeReport {
    pub employee: EmployeeId,
    pub days: Vec<DailyBalance>,
    pub totals: PeriodTotal,
}

/// Employee dropped from a batch, with the logged reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEmployee {
    pub employee: EmployeeId,
    pub reason: String,
}

/// Full output of one report request. Employee order follows the request;
/// days are ascending within each employee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodReport {
    pub employees: Vec<EmployeeReport>,
    pub skipped: Vec<SkippedEmployee>,
}
