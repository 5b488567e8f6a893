use std::collections::HashMap;

use chrono::{Duration, NaiveDate, Timelike};
use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::engine::resolver::{self, ResolvedDay, RuleSource};
use crate::engine::{balance, merge, segment};
use crate::error::EngineError;
use crate::model::{
    DailyBalance, DateRange, DayStatus, DayType, EmployeeId, EmployeeReport, PeriodReport,
    PeriodTotal, Punch, SkippedEmployee,
};
use crate::store::{HolidayCalendar, LocalStore, ScheduleStore};

/// The reconciliation engine: resolves schedules, merges and segments
/// punches, and rolls per-day balances into period totals for a batch of
/// employees.
pub struct ReconcileEngine<S, L, H> {
    schedule: S,
    local: L,
    holidays: H,
    config: EngineConfig,
}

impl<S, L, H> ReconcileEngine<S, L, H>
where
    S: ScheduleStore,
    L: LocalStore,
    H: HolidayCalendar,
{
    pub fn new(schedule: S, local: L, holidays: H, config: EngineConfig) -> Self {
        ReconcileEngine {
            schedule,
            local,
            holidays,
            config,
        }
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    /// Runs one report over `[range.start, range.end]` for the given batch.
    ///
    /// Employees without a resolvable shift code are skipped with a logged
    /// reason and listed in the output; a backing-store failure aborts the
    /// whole request. Output preserves the input employee order, days
    /// ascending within each employee.
    pub async fn report(
        &self,
        employees: &[EmployeeId],
        range: DateRange,
        cycle_anchor: Option<NaiveDate>,
    ) -> Result<PeriodReport, EngineError> {
        info!(
            start = %range.start,
            end = %range.end,
            batch = employees.len(),
            "starting reconciliation report"
        );

        let workers = self.config.report_workers.max(1);
        let results: Vec<_> = futures::stream::iter(
            employees
                .iter()
                .map(|e| self.employee_slice(e, &range, cycle_anchor)),
        )
        .buffered(workers)
        .collect()
        .await;

        let mut out = PeriodReport::default();
        for (employee, result) in employees.iter().zip(results) {
            match result {
                Ok(Some(slice)) => out.employees.push(slice),
                Ok(None) => {
                    let reason = EngineError::MissingSchedule(employee.clone()).to_string();
                    warn!(%employee, "skipping employee: {reason}");
                    out.skipped.push(SkippedEmployee {
                        employee: employee.clone(),
                        reason,
                    });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }

    /// Single-employee entry point; a missing shift code is an error here
    /// rather than a skip.
    pub async fn reconcile(
        &self,
        employee: &EmployeeId,
        range: DateRange,
        cycle_anchor: Option<NaiveDate>,
    ) -> Result<EmployeeReport, EngineError> {
        self.employee_slice(employee, &range, cycle_anchor)
            .await?
            .ok_or_else(|| EngineError::MissingSchedule(employee.clone()))
    }

    async fn employee_slice(
        &self,
        employee: &EmployeeId,
        range: &DateRange,
        cycle_anchor: Option<NaiveDate>,
    ) -> Result<Option<EmployeeReport>, EngineError> {
        let Some(shift_code) = self.schedule.shift_code_for(employee).await? else {
            return Ok(None);
        };
        let overnight = self.shift_is_overnight(&shift_code).await?;

        // Overnight shifts punch out past the last requested day, and the
        // shift before the first requested day leaves its exit inside the
        // window; the punch fetch pads one day on both sides so every shift
        // pairs against its own punches. Out-of-range anchor dates drop out
        // in the day loop.
        let fetch_range = if overnight { range.padded(1, 1) } else { *range };
        let ledger = self.schedule.raw_punches(employee, &fetch_range).await?;
        let app = self.local.app_punches(employee, &fetch_range).await?;

        // Full-period segmentation happens once up front for overnight
        // employees; shifts then redistribute to their anchor dates.
        let mut shifts_by_day: HashMap<NaiveDate, Vec<segment::WorkShift>> = HashMap::new();
        if overnight {
            let pooled = merge::pool_timestamps(&ledger, &app);
            for shift in segment::segment(&pooled, Duration::hours(self.config.quiet_period_hours))
            {
                shifts_by_day.entry(shift.anchor_date).or_default().push(shift);
            }
        }

        let mut days = Vec::new();
        let mut totals = PeriodTotal::default();
        for date in range.days() {
            let resolved = resolver::resolve(
                &self.schedule,
                &self.local,
                employee,
                &shift_code,
                date,
                cycle_anchor,
            )
            .await?;
            let is_holiday = self.holidays.is_holiday(date);

            let (mut worked, punch_count) = if matches!(resolved.source, RuleSource::Leave(_)) {
                // leave suppresses the day's computation entirely
                (0, 0)
            } else if overnight {
                let shifts = shifts_by_day.get(&date);
                let worked = shifts
                    .map(|s| s.iter().map(|sh| sh.worked_minutes).sum())
                    .unwrap_or(0);
                let count = shifts
                    .map(|s| s.iter().map(|sh| sh.punches.len()).sum())
                    .unwrap_or(0);
                (worked, count)
            } else {
                self.standard_day_minutes(&ledger, &app, date)
            };

            let special =
                is_holiday || matches!(resolved.day_type, DayType::Rest | DayType::Compensatory);
            if special && punch_count % 2 == 1 {
                // unpairable punches on a special day: never guess pairing
                warn!(
                    %employee,
                    %date,
                    punch_count,
                    "ambiguous punch data on holiday/rest day, discarding"
                );
                worked = 0;
            }

            let buckets = balance::compute(
                worked,
                resolved.planned_minutes,
                resolved.day_type,
                is_holiday,
                &self.config,
            );
            let day = DailyBalance {
                date,
                status: day_status(&resolved, is_holiday),
                worked_minutes: worked,
                planned_minutes: resolved.planned_minutes,
                normal: buckets.normal,
                overtime50: buckets.overtime50,
                overtime100: buckets.overtime100,
                undertime: buckets.undertime,
            };
            totals.accumulate(&day);
            days.push(day);
        }

        debug!(%employee, days = days.len(), "employee reconciled");
        Ok(Some(EmployeeReport {
            employee: employee.clone(),
            days,
            totals,
        }))
    }

    /// Slot-wise merge and single-shift pairing for one standard day.
    fn standard_day_minutes(&self, ledger: &[Punch], app: &[Punch], date: NaiveDate) -> (i64, usize) {
        let day_of = |punches: &[Punch]| -> Vec<Punch> {
            punches
                .iter()
                .filter(|p| p.timestamp.date() == date)
                .cloned()
                .collect()
        };
        let slots = merge::merge_day_slots(&day_of(ledger), &day_of(app));
        let timestamps = slots.timestamps();
        let worked = segment::segment(&timestamps, Duration::hours(24))
            .iter()
            .map(|s| s.worked_minutes)
            .sum();
        (worked, timestamps.len())
    }

    /// A shift whose schedule starts at or past the configured evening hour
    /// on any day of its rotation reclassifies the whole employee: punches
    /// pool across days and segmentation takes over pairing.
    async fn shift_is_overnight(&self, shift_code: &str) -> Result<bool, EngineError> {
        let weeks = self.schedule.cycle_length(shift_code).await?.max(1);
        for week in 1..=weeks {
            for dow in 1..=7 {
                if let Some(rule) = self.schedule.schedule_rule(shift_code, week, dow).await? {
                    if rule.scheduled_start.hour() >= self.config.overnight_start_hour {
                        return Ok(true);
                    }
                }
            }
        }
        Ok(false)
    }
}

fn day_status(resolved: &ResolvedDay, is_holiday: bool) -> DayStatus {
    match resolved.source {
        RuleSource::Leave(_) => DayStatus::Leave,
        RuleSource::Override => DayStatus::Override,
        _ if is_holiday => DayStatus::Holiday,
        _ => match resolved.day_type {
            DayType::Rest => DayStatus::Rest,
            DayType::Compensatory => DayStatus::Compensatory,
            DayType::Work | DayType::HolidayEligible => DayStatus::Work,
        },
    }
}
