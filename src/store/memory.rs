use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use chrono::{NaiveDate, NaiveDateTime};

use crate::model::{
    DailyOverride, DateRange, EmployeeId, LeaveRange, Punch, RosterEntry, ScheduleRule,
};
use crate::store::{LocalStore, ScheduleStore};

#[derive(Debug, Default)]
struct LocalRows {
    overrides: HashMap<(EmployeeId, NaiveDate), DailyOverride>,
    leaves: HashMap<(EmployeeId, NaiveDate), LeaveRange>,
    roster: HashMap<(EmployeeId, NaiveDate), RosterEntry>,
    punches: HashMap<EmployeeId, Vec<Punch>>,
}

/// In-memory [`LocalStore`] holding override/leave/roster rows under their
/// unique keys and app punches append-only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<LocalRows>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn read(&self) -> anyhow::Result<RwLockReadGuard<'_, LocalRows>> {
        self.inner.read().map_err(|_| anyhow!("local store lock poisoned"))
    }

    fn write(&self) -> anyhow::Result<RwLockWriteGuard<'_, LocalRows>> {
        self.inner.write().map_err(|_| anyhow!("local store lock poisoned"))
    }
}

impl LocalStore for MemoryStore {
    async fn override_for(
        &self,
        employee: &EmployeeId,
        date: NaiveDate,
    ) -> anyhow::Result<Option<DailyOverride>> {
        Ok(self.read()?.overrides.get(&(employee.clone(), date)).cloned())
    }

    async fn leave_covering(
        &self,
        employee: &EmployeeId,
        date: NaiveDate,
    ) -> anyhow::Result<Option<LeaveRange>> {
        Ok(self
            .read()?
            .leaves
            .values()
            .find(|l| &l.employee == employee && l.covers(date))
            .cloned())
    }

    async fn roster_for(
        &self,
        employee: &EmployeeId,
        date: NaiveDate,
    ) -> anyhow::Result<Option<RosterEntry>> {
        Ok(self.read()?.roster.get(&(employee.clone(), date)).cloned())
    }

    async fn app_punches(
        &self,
        employee: &EmployeeId,
        range: &DateRange,
    ) -> anyhow::Result<Vec<Punch>> {
        let rows = self.read()?;
        let mut out: Vec<Punch> = rows
            .punches
            .get(employee)
            .map(|v| {
                v.iter()
                    .filter(|p| {
                        let d = p.timestamp.date();
                        range.start <= d && d <= range.end
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        out.sort_by_key(|p| p.timestamp);
        Ok(out)
    }

    async fn upsert_override(&self, row: DailyOverride) -> anyhow::Result<()> {
        self.write()?
            .overrides
            .insert((row.employee.clone(), row.date), row);
        Ok(())
    }

    async fn remove_override(
        &self,
        employee: &EmployeeId,
        date: NaiveDate,
    ) -> anyhow::Result<bool> {
        Ok(self
            .write()?
            .overrides
            .remove(&(employee.clone(), date))
            .is_some())
    }

    async fn upsert_leave(&self, row: LeaveRange) -> anyhow::Result<()> {
        self.write()?
            .leaves
            .insert((row.employee.clone(), row.start), row);
        Ok(())
    }

    async fn remove_leave(&self, employee: &EmployeeId, start: NaiveDate) -> anyhow::Result<bool> {
        Ok(self
            .write()?
            .leaves
            .remove(&(employee.clone(), start))
            .is_some())
    }

    async fn upsert_roster(&self, row: RosterEntry) -> anyhow::Result<()> {
        self.write()?
            .roster
            .insert((row.employee.clone(), row.date), row);
        Ok(())
    }

    async fn record_app_punch(&self, employee: &EmployeeId, punch: Punch) -> anyhow::Result<()> {
        self.write()?
            .punches
            .entry(employee.clone())
            .or_default()
            .push(punch);
        Ok(())
    }

    async fn correct_app_punch(
        &self,
        employee: &EmployeeId,
        old_ts: NaiveDateTime,
        new_ts: NaiveDateTime,
    ) -> anyhow::Result<bool> {
        let mut rows = self.write()?;
        let Some(punches) = rows.punches.get_mut(employee) else {
            return Ok(false);
        };
        match punches.iter_mut().find(|p| p.timestamp == old_ts) {
            Some(p) => {
                p.timestamp = new_ts;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Debug, Default)]
struct ScheduleRows {
    shift_codes: HashMap<EmployeeId, String>,
    cycle_lengths: HashMap<String, u32>,
    rules: HashMap<(String, u32, u32), ScheduleRule>,
    punches: HashMap<EmployeeId, Vec<Punch>>,
}

/// In-memory [`ScheduleStore`], the test double for the ledger adapter.
#[derive(Debug, Default)]
pub struct MemoryScheduleStore {
    inner: RwLock<ScheduleRows>,
}

impl MemoryScheduleStore {
    pub fn new() -> Self {
        MemoryScheduleStore::default()
    }

    fn read(&self) -> anyhow::Result<RwLockReadGuard<'_, ScheduleRows>> {
        self.inner
            .read()
            .map_err(|_| anyhow!("schedule store lock poisoned"))
    }

    fn write(&self) -> anyhow::Result<RwLockWriteGuard<'_, ScheduleRows>> {
        self.inner
            .write()
            .map_err(|_| anyhow!("schedule store lock poisoned"))
    }

    pub fn assign_shift(&self, employee: EmployeeId, shift_code: &str) {
        self.write()
            .expect("schedule store lock poisoned")
            .shift_codes
            .insert(employee, shift_code.to_string());
    }

    pub fn set_cycle_length(&self, shift_code: &str, weeks: u32) {
        self.write()
            .expect("schedule store lock poisoned")
            .cycle_lengths
            .insert(shift_code.to_string(), weeks);
    }

    pub fn add_rule(&self, rule: ScheduleRule) {
        self.write()
            .expect("schedule store lock poisoned")
            .rules
            .insert((rule.shift_code.clone(), rule.cycle_week, rule.day_of_week), rule);
    }

    pub fn add_punch(&self, employee: EmployeeId, punch: Punch) {
        self.write()
            .expect("schedule store lock poisoned")
            .punches
            .entry(employee)
            .or_default()
            .push(punch);
    }
}

impl ScheduleStore for MemoryScheduleStore {
    async fn shift_code_for(&self, employee: &EmployeeId) -> anyhow::Result<Option<String>> {
        Ok(self.read()?.shift_codes.get(employee).cloned())
    }

    async fn schedule_rule(
        &self,
        shift_code: &str,
        cycle_week: u32,
        day_of_week: u32,
    ) -> anyhow::Result<Option<ScheduleRule>> {
        Ok(self
            .read()?
            .rules
            .get(&(shift_code.to_string(), cycle_week, day_of_week))
            .cloned())
    }

    async fn cycle_length(&self, shift_code: &str) -> anyhow::Result<u32> {
        Ok(self
            .read()?
            .cycle_lengths
            .get(shift_code)
            .copied()
            .unwrap_or(0))
    }

    async fn raw_punches(
        &self,
        employee: &EmployeeId,
        range: &DateRange,
    ) -> anyhow::Result<Vec<Punch>> {
        let rows = self.read()?;
        let mut out: Vec<Punch> = rows
            .punches
            .get(employee)
            .map(|v| {
                v.iter()
                    .filter(|p| {
                        let d = p.timestamp.date();
                        range.start <= d && d <= range.end
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        out.sort_by_key(|p| p.timestamp);
        Ok(out)
    }
}
