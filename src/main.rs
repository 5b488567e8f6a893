use std::env;

use anyhow::Context;
use chrono::NaiveDate;
use dotenvy::dotenv;
use tracing::info;
use tracing_appender::rolling;

use ponto_engine::config::EngineConfig;
use ponto_engine::engine::ReconcileEngine;
use ponto_engine::model::{DateRange, EmployeeId};
use ponto_engine::store::holiday::FixedHolidayCalendar;
use ponto_engine::store::ledger::ProtheusLedger;
use ponto_engine::store::memory::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Rolling daily log
    let file_appender = rolling::daily("logs", "ponto.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .init();

    info!("Reconciliation run starting...");

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let employees = env::var("EMPLOYEE_IDS").context("EMPLOYEE_IDS must be set")?;
    let start: NaiveDate = env::var("START_DATE")
        .context("START_DATE must be set")?
        .parse()
        .context("START_DATE must be YYYY-MM-DD")?;
    let end: NaiveDate = env::var("END_DATE")
        .context("END_DATE must be set")?
        .parse()
        .context("END_DATE must be YYYY-MM-DD")?;
    let cycle_anchor: Option<NaiveDate> = match env::var("CYCLE_ANCHOR") {
        Ok(v) => Some(v.parse().context("CYCLE_ANCHOR must be YYYY-MM-DD")?),
        Err(_) => None,
    };

    let employees = employees
        .split(',')
        .map(|raw| EmployeeId::new(raw.trim()))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let range = DateRange::new(start, end)?;

    let ledger = ProtheusLedger::connect(&database_url).await?;
    let engine = ReconcileEngine::new(
        ledger,
        MemoryStore::new(),
        FixedHolidayCalendar::brazil_national(),
        EngineConfig::from_env(),
    );

    let report = engine.report(&employees, range, cycle_anchor).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!(
        employees = report.employees.len(),
        skipped = report.skipped.len(),
        "Reconciliation run finished"
    );
    Ok(())
}
