use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{MySqlPool, Row};

use crate::model::{DateRange, DayType, EmployeeId, Punch, PunchSlot, PunchSource, ScheduleRule};
use crate::store::ScheduleStore;

/// Ledger adapter over the TOTVS Protheus database: staff records in
/// `SRA010`, shift schedule detail in `SPJ010`, terminal punches in `SP8010`.
/// Reads only; the ledger is authoritative and never written from here.
pub struct ProtheusLedger {
    pool: MySqlPool,
}

/// Soft-delete guard every Protheus query needs.
const NOT_DELETED: &str = "(D_E_L_E_T_ IS NULL OR D_E_L_E_T_ <> '*')";

/// Protheus stores times as decimal hours where the fraction is literal
/// minutes: `8.30` is 08:30, not 8h18m.
fn decimal_hour_to_minutes(raw: f64) -> i64 {
    let hours = raw.trunc();
    hours as i64 * 60 + ((raw - hours) * 100.0).round() as i64
}

fn minutes_to_time(minutes: i64) -> Option<NaiveTime> {
    if !(0..24 * 60).contains(&minutes) {
        return None;
    }
    NaiveTime::from_hms_opt(minutes as u32 / 60, minutes as u32 % 60, 0)
}

fn day_type_from_tpdia(tpdia: &str) -> DayType {
    match tpdia.trim() {
        "2" => DayType::Compensatory,
        "3" => DayType::Rest,
        "4" => DayType::HolidayEligible,
        _ => DayType::Work,
    }
}

impl ProtheusLedger {
    pub fn new(pool: MySqlPool) -> Self {
        ProtheusLedger { pool }
    }

    pub async fn connect(database_url: &str) -> anyhow::Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .context("connecting to the ledger database")?;
        Ok(ProtheusLedger { pool })
    }
}

impl ScheduleStore for ProtheusLedger {
    async fn shift_code_for(&self, employee: &EmployeeId) -> anyhow::Result<Option<String>> {
        let sql = format!(
            "SELECT RA_TNOTRAB FROM SRA010 \
             WHERE RA_FILIAL = ? AND RA_MAT = ? AND {NOT_DELETED}"
        );
        let row = sqlx::query(&sql)
            .bind(employee.branch())
            .bind(employee.registration())
            .fetch_optional(&self.pool)
            .await
            .context("fetching shift code from SRA010")?;

        match row {
            None => Ok(None),
            Some(r) => {
                let code: String = r.try_get("RA_TNOTRAB").context("reading RA_TNOTRAB")?;
                let code = code.trim().to_string();
                Ok((!code.is_empty()).then_some(code))
            }
        }
    }

    async fn schedule_rule(
        &self,
        shift_code: &str,
        cycle_week: u32,
        day_of_week: u32,
    ) -> anyhow::Result<Option<ScheduleRule>> {
        let sql = format!(
            "SELECT PJ_ENTRA1, PJ_SAIDA1, PJ_ENTRA2, PJ_SAIDA2, PJ_TPDIA \
             FROM SPJ010 \
             WHERE PJ_TURNO = ? AND PJ_SEMANA = ? AND PJ_DIA = ? AND {NOT_DELETED}"
        );
        let row = sqlx::query(&sql)
            .bind(shift_code)
            .bind(format!("{cycle_week:02}"))
            .bind(day_of_week.to_string())
            .fetch_optional(&self.pool)
            .await
            .context("fetching schedule rule from SPJ010")?;

        let Some(r) = row else {
            return Ok(None);
        };

        let entra1 = r
            .try_get::<Option<f64>, _>("PJ_ENTRA1")
            .context("reading PJ_ENTRA1")?
            .map(decimal_hour_to_minutes);
        let saida1 = r
            .try_get::<Option<f64>, _>("PJ_SAIDA1")
            .context("reading PJ_SAIDA1")?
            .map(decimal_hour_to_minutes);
        let entra2 = r
            .try_get::<Option<f64>, _>("PJ_ENTRA2")
            .context("reading PJ_ENTRA2")?
            .map(decimal_hour_to_minutes);
        let saida2 = r
            .try_get::<Option<f64>, _>("PJ_SAIDA2")
            .context("reading PJ_SAIDA2")?
            .map(decimal_hour_to_minutes);
        let tpdia: String = r.try_get("PJ_TPDIA").context("reading PJ_TPDIA")?;

        let pair = |start: Option<i64>, end: Option<i64>| match (start, end) {
            // overnight pairs wrap past midnight
            (Some(s), Some(e)) if e < s => e + 24 * 60 - s,
            (Some(s), Some(e)) => e - s,
            _ => 0,
        };
        let planned_minutes = pair(entra1, saida1).max(0) + pair(entra2, saida2).max(0);

        let scheduled_start = entra1.and_then(minutes_to_time).unwrap_or(NaiveTime::MIN);
        let scheduled_end = saida2
            .or(saida1)
            .and_then(minutes_to_time)
            .unwrap_or(NaiveTime::MIN);

        Ok(Some(ScheduleRule {
            shift_code: shift_code.to_string(),
            cycle_week,
            day_of_week,
            planned_minutes,
            day_type: day_type_from_tpdia(&tpdia),
            scheduled_start,
            scheduled_end,
        }))
    }

    async fn cycle_length(&self, shift_code: &str) -> anyhow::Result<u32> {
        let sql = format!(
            "SELECT COUNT(DISTINCT PJ_SEMANA) AS weeks FROM SPJ010 \
             WHERE PJ_TURNO = ? AND {NOT_DELETED}"
        );
        let row = sqlx::query(&sql)
            .bind(shift_code)
            .fetch_one(&self.pool)
            .await
            .context("counting cycle weeks in SPJ010")?;
        let weeks: i64 = row.try_get("weeks").context("reading week count")?;
        Ok(weeks.max(0) as u32)
    }

    async fn raw_punches(
        &self,
        employee: &EmployeeId,
        range: &DateRange,
    ) -> anyhow::Result<Vec<Punch>> {
        let sql = format!(
            "SELECT P8_DATA, P8_HORA, P8_TPMARCA FROM SP8010 \
             WHERE P8_FILIAL = ? AND P8_MAT = ? \
             AND P8_DATA BETWEEN ? AND ? \
             AND P8_APONTA = 'S' AND {NOT_DELETED} \
             ORDER BY P8_DATA, P8_HORA"
        );
        let rows = sqlx::query(&sql)
            .bind(employee.branch())
            .bind(employee.registration())
            .bind(range.start.format("%Y%m%d").to_string())
            .bind(range.end.format("%Y%m%d").to_string())
            .fetch_all(&self.pool)
            .await
            .context("fetching punches from SP8010")?;

        let mut punches = Vec::with_capacity(rows.len());
        for r in rows {
            let data: String = r.try_get("P8_DATA").context("reading P8_DATA")?;
            let hora: f64 = r.try_get("P8_HORA").context("reading P8_HORA")?;
            let tpmarca: String = r.try_get("P8_TPMARCA").context("reading P8_TPMARCA")?;

            let date = NaiveDate::parse_from_str(data.trim(), "%Y%m%d")
                .with_context(|| format!("malformed P8_DATA '{data}'"))?;
            let Some(time) = minutes_to_time(decimal_hour_to_minutes(hora)) else {
                tracing::warn!(%employee, %data, hora, "ledger punch with out-of-range time, dropped");
                continue;
            };

            punches.push(Punch {
                source: PunchSource::Ledger,
                timestamp: date.and_time(time),
                slot: tpmarca.trim().parse::<PunchSlot>().ok(),
                verified: true,
            });
        }
        Ok(punches)
    }
}
