use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::{DayType, EmployeeId, LeaveCategory};
use crate::store::{LocalStore, ScheduleStore};

/// Which precedence tier produced a resolved day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSource {
    Override,
    Leave(LeaveCategory),
    Roster,
    Cycle,
    /// No rule matched; historically a day off, never an error.
    Fallback,
}

/// Planned obligation for one employee and date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedDay {
    pub planned_minutes: i64,
    pub day_type: DayType,
    pub scheduled_start: Option<NaiveTime>,
    pub scheduled_end: Option<NaiveTime>,
    pub source: RuleSource,
}

/// Position of `date` within an N-week rotation, 1-based. Falls back to week
/// 1 whenever the anchor is unset, the cycle length is unusable, or the date
/// precedes the anchor.
pub fn cycle_week(date: NaiveDate, anchor: Option<NaiveDate>, weeks_in_cycle: u32) -> u32 {
    let Some(anchor) = anchor else {
        return 1;
    };
    if weeks_in_cycle == 0 {
        return 1;
    }
    let days = (date - anchor).num_days();
    if days < 0 {
        return 1;
    }
    ((days / 7) % weeks_in_cycle as i64) as u32 + 1
}

/// Day of week in the ledger's convention: 1 = Sunday .. 7 = Saturday.
pub fn ledger_day_of_week(date: NaiveDate) -> u32 {
    date.weekday().number_from_sunday()
}

/// Resolves the schedule for one employee and date through the precedence
/// chain: exact-date override, then leave range, then roster entry, then the
/// cyclic schedule, then the rest-day fallback.
pub async fn resolve<S, L>(
    schedule: &S,
    local: &L,
    employee: &EmployeeId,
    shift_code: &str,
    date: NaiveDate,
    cycle_anchor: Option<NaiveDate>,
) -> Result<ResolvedDay, EngineError>
where
    S: ScheduleStore,
    L: LocalStore,
{
    if let Some(ov) = local.override_for(employee, date).await? {
        return Ok(ResolvedDay {
            planned_minutes: ov.planned_minutes.max(0),
            day_type: ov.day_type,
            scheduled_start: ov.scheduled_start,
            scheduled_end: ov.scheduled_end,
            source: RuleSource::Override,
        });
    }

    if let Some(leave) = local.leave_covering(employee, date).await? {
        return Ok(ResolvedDay {
            planned_minutes: 0,
            day_type: DayType::Rest,
            scheduled_start: None,
            scheduled_end: None,
            source: RuleSource::Leave(leave.category),
        });
    }

    if let Some(entry) = local.roster_for(employee, date).await? {
        return Ok(ResolvedDay {
            planned_minutes: entry.planned_minutes.max(0),
            day_type: entry.day_type,
            scheduled_start: entry.scheduled_start,
            scheduled_end: entry.scheduled_end,
            source: RuleSource::Roster,
        });
    }

    let weeks = schedule.cycle_length(shift_code).await?;
    let week = cycle_week(date, cycle_anchor, weeks);
    let dow = ledger_day_of_week(date);
    if let Some(rule) = schedule.schedule_rule(shift_code, week, dow).await? {
        return Ok(ResolvedDay {
            planned_minutes: rule.planned_minutes.max(0),
            day_type: rule.day_type,
            scheduled_start: Some(rule.scheduled_start),
            scheduled_end: Some(rule.scheduled_end),
            source: RuleSource::Cycle,
        });
    }

    tracing::debug!(%employee, %date, shift_code, week, dow, "no schedule rule, defaulting to rest");
    Ok(ResolvedDay {
        planned_minutes: 0,
        day_type: DayType::Rest,
        scheduled_start: None,
        scheduled_end: None,
        source: RuleSource::Fallback,
    })
}
