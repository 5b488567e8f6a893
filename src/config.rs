use std::env;

use dotenvy::dotenv;
use strum_macros::{Display, EnumString};

/// Default cap on the 50% overtime tier before overflow routes to the 100%
/// tier.
pub const DEFAULT_OVERTIME50_CAP_MIN: i64 = 120;

/// Default quiet-period gap separating two shifts of an overnight employee.
pub const DEFAULT_QUIET_PERIOD_HOURS: i64 = 6;

/// A shift whose scheduled start hour is at or past this is overnight.
pub const DEFAULT_OVERNIGHT_START_HOUR: u32 = 18;

/// Whether a rest/holiday day with planned minutes but no work debits
/// undertime. The reference behavior shows both; lenient is the default
/// because attendance defaults fail toward no pay impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum RestUndertimePolicy {
    Strict,
    Lenient,
}

/// Where worked minutes land on a day with no planned schedule that is not a
/// holiday or rest day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum UnplannedWorkPolicy {
    Normal,
    Overtime50,
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub overtime50_cap_min: i64,
    pub quiet_period_hours: i64,
    pub overnight_start_hour: u32,
    pub rest_undertime: RestUndertimePolicy,
    pub unplanned_work: UnplannedWorkPolicy,
    /// Upper bound on employees reconciled concurrently within one report.
    pub report_workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            overtime50_cap_min: DEFAULT_OVERTIME50_CAP_MIN,
            quiet_period_hours: DEFAULT_QUIET_PERIOD_HOURS,
            overnight_start_hour: DEFAULT_OVERNIGHT_START_HOUR,
            rest_undertime: RestUndertimePolicy::Lenient,
            unplanned_work: UnplannedWorkPolicy::Normal,
            report_workers: 4,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = EngineConfig::default();
        EngineConfig {
            overtime50_cap_min: env::var("PONTO_OVERTIME50_CAP_MIN")
                .unwrap_or_else(|_| defaults.overtime50_cap_min.to_string())
                .parse()
                .unwrap(),
            quiet_period_hours: env::var("PONTO_QUIET_PERIOD_HOURS")
                .unwrap_or_else(|_| defaults.quiet_period_hours.to_string())
                .parse()
                .unwrap(),
            overnight_start_hour: env::var("PONTO_OVERNIGHT_START_HOUR")
                .unwrap_or_else(|_| defaults.overnight_start_hour.to_string())
                .parse()
                .unwrap(),
            rest_undertime: env::var("PONTO_REST_UNDERTIME")
                .unwrap_or_else(|_| "lenient".to_string())
                .parse()
                .unwrap(),
            unplanned_work: env::var("PONTO_UNPLANNED_WORK")
                .unwrap_or_else(|_| "normal".to_string())
                .parse()
                .unwrap(),
            report_workers: env::var("PONTO_REPORT_WORKERS")
                .unwrap_or_else(|_| defaults.report_workers.to_string())
                .parse()
                .unwrap(),
        }
    }
}
