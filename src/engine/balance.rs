use crate::config::{EngineConfig, RestUndertimePolicy, UnplannedWorkPolicy};
use crate::model::DayType;

/// The four minute buckets of one day, before the status label is attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Buckets {
    pub normal: i64,
    pub overtime50: i64,
    pub overtime100: i64,
    pub undertime: i64,
}

/// Deterministic rule table converting a day's worked/planned minutes into
/// categorized buckets.
///
/// Evaluation order:
/// 1. holiday or rest/compensatory day: everything worked is 100% overtime;
/// 2. planned work day: planned minutes fill `normal`, surplus fills the 50%
///    tier up to the configured cap and overflows into the 100% tier, deficit
///    goes to `undertime`;
/// 3. no planned minutes: policy decides between `normal` and the 50% tier.
pub fn compute(
    worked_minutes: i64,
    planned_minutes: i64,
    day_type: DayType,
    is_holiday: bool,
    config: &EngineConfig,
) -> Buckets {
    let worked = worked_minutes.max(0);
    let planned = planned_minutes.max(0);
    let mut out = Buckets::default();

    if is_holiday || matches!(day_type, DayType::Rest | DayType::Compensatory) {
        out.overtime100 = worked;
        if worked == 0 && planned > 0 && config.rest_undertime == RestUndertimePolicy::Strict {
            out.undertime = -planned;
        }
        return out;
    }

    if planned > 0 {
        let balance = worked - planned;
        if balance > 0 {
            out.normal = planned;
            out.overtime50 = balance.min(config.overtime50_cap_min);
            out.overtime100 = (balance - config.overtime50_cap_min).max(0);
        } else {
            out.normal = worked;
            out.undertime = balance;
        }
        return out;
    }

    match config.unplanned_work {
        UnplannedWorkPolicy::Normal => out.normal = worked,
        UnplannedWorkPolicy::Overtime50 => out.overtime50 = worked,
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn surplus_fills_the_fifty_tier_first() {
        let b = compute(600, 480, DayType::Work, false, &cfg());
        assert_eq!(
            b,
            Buckets {
                normal: 480,
                overtime50: 120,
                overtime100: 0,
                undertime: 0
            }
        );
    }

    #[test]
    fn surplus_past_the_cap_overflows_to_hundred() {
        let b = compute(700, 480, DayType::Work, false, &cfg());
        assert_eq!(
            b,
            Buckets {
                normal: 480,
                overtime50: 120,
                overtime100: 100,
                undertime: 0
            }
        );
    }

    #[test]
    fn deficit_debits_undertime() {
        let b = compute(400, 480, DayType::Work, false, &cfg());
        assert_eq!(b.normal, 400);
        assert_eq!(b.undertime, -80);
        assert_eq!(b.overtime50 + b.overtime100, 0);
    }

    #[test]
    fn holiday_work_is_all_hundred_percent() {
        let b = compute(90, 480, DayType::Work, true, &cfg());
        assert_eq!(
            b,
            Buckets {
                normal: 0,
                overtime50: 0,
                overtime100: 90,
                undertime: 0
            }
        );
    }

    #[test]
    fn rest_day_without_work_is_all_zero() {
        let b = compute(0, 0, DayType::Rest, false, &cfg());
        assert_eq!(b, Buckets::default());
    }

    #[test]
    fn compensatory_day_routes_like_rest() {
        let b = compute(200, 480, DayType::Compensatory, false, &cfg());
        assert_eq!(b.overtime100, 200);
        assert_eq!(b.normal, 0);
    }

    #[test]
    fn strict_policy_debits_idle_planned_rest_days() {
        let mut config = cfg();
        config.rest_undertime = RestUndertimePolicy::Strict;
        let b = compute(0, 480, DayType::Rest, false, &config);
        assert_eq!(b.undertime, -480);

        // lenient leaves it alone
        let b = compute(0, 480, DayType::Rest, false, &cfg());
        assert_eq!(b.undertime, 0);
    }

    #[test]
    fn unplanned_work_policy_picks_the_bucket() {
        let b = compute(300, 0, DayType::Work, false, &cfg());
        assert_eq!(b.normal, 300);
        assert_eq!(b.overtime50, 0);

        let mut config = cfg();
        config.unplanned_work = UnplannedWorkPolicy::Overtime50;
        let b = compute(300, 0, DayType::Work, false, &config);
        assert_eq!(b.normal, 0);
        assert_eq!(b.overtime50, 300);
    }

    #[test]
    fn exact_attendance_is_all_normal() {
        let b = compute(480, 480, DayType::Work, false, &cfg());
        assert_eq!(
            b,
            Buckets {
                normal: 480,
                overtime50: 0,
                overtime100: 0,
                undertime: 0
            }
        );
    }
}
