pub mod holiday;
pub mod ledger;
pub mod memory;

use chrono::{NaiveDate, NaiveDateTime};

use crate::model::{
    DailyOverride, DateRange, EmployeeId, LeaveRange, Punch, RosterEntry, ScheduleRule,
};

/// Read access to the external workforce ledger: shift assignments, the
/// cyclic schedule tables, and raw terminal punches.
#[allow(async_fn_in_trait)]
pub trait ScheduleStore {
    async fn shift_code_for(&self, employee: &EmployeeId) -> anyhow::Result<Option<String>>;

    async fn schedule_rule(
        &self,
        shift_code: &str,
        cycle_week: u32,
        day_of_week: u32,
    ) -> anyhow::Result<Option<ScheduleRule>>;

    /// Number of weeks in the shift's rotation. Zero means unknown.
    async fn cycle_length(&self, shift_code: &str) -> anyhow::Result<u32>;

    /// Punches recorded by the ledger over the range, tagged with their
    /// originating slot.
    async fn raw_punches(
        &self,
        employee: &EmployeeId,
        range: &DateRange,
    ) -> anyhow::Result<Vec<Punch>>;
}

/// Read/write access to locally managed rows: daily overrides, leave ranges,
/// roster entries, and app-captured punches. Overrides and roster entries are
/// unique per (employee, date) with last-writer-wins upserts; leave ranges
/// are unique per (employee, start date).
#[allow(async_fn_in_trait)]
pub trait LocalStore {
    async fn override_for(
        &self,
        employee: &EmployeeId,
        date: NaiveDate,
    ) -> anyhow::Result<Option<DailyOverride>>;

    async fn leave_covering(
        &self,
        employee: &EmployeeId,
        date: NaiveDate,
    ) -> anyhow::Result<Option<LeaveRange>>;

    async fn roster_for(
        &self,
        employee: &EmployeeId,
        date: NaiveDate,
    ) -> anyhow::Result<Option<RosterEntry>>;

    async fn app_punches(
        &self,
        employee: &EmployeeId,
        range: &DateRange,
    ) -> anyhow::Result<Vec<Punch>>;

    async fn upsert_override(&self, row: DailyOverride) -> anyhow::Result<()>;

    async fn remove_override(&self, employee: &EmployeeId, date: NaiveDate)
    -> anyhow::Result<bool>;

    async fn upsert_leave(&self, row: LeaveRange) -> anyhow::Result<()>;

    async fn remove_leave(&self, employee: &EmployeeId, start: NaiveDate) -> anyhow::Result<bool>;

    async fn upsert_roster(&self, row: RosterEntry) -> anyhow::Result<()>;

    /// Punches are immutable facts once recorded; this appends.
    async fn record_app_punch(&self, employee: &EmployeeId, punch: Punch) -> anyhow::Result<()>;

    /// Explicit correction of a recorded punch timestamp. Returns false when
    /// no punch matched `old_ts`.
    async fn correct_app_punch(
        &self,
        employee: &EmployeeId,
        old_ts: NaiveDateTime,
        new_ts: NaiveDateTime,
    ) -> anyhow::Result<bool>;
}

/// Jurisdiction holiday lookup: fixed dates, recurring dates, ad hoc extras.
pub trait HolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}
