use chrono::NaiveDateTime;

use crate::model::{DaySlots, Punch, PunchSlot, PunchSource};

fn usable(punch: &Punch) -> bool {
    match punch.source {
        PunchSource::App => punch.verified,
        PunchSource::Ledger | PunchSource::Manual => true,
    }
}

/// Slot-wise merge of one calendar day's punches. Ledger values fill the four
/// positions first; a verified app value at the same position overrides the
/// ledger one. Unverified app punches never participate.
pub fn merge_day_slots(ledger: &[Punch], app: &[Punch]) -> DaySlots {
    let mut slots = DaySlots::default();
    for punch in ledger.iter().chain(app.iter()) {
        if !usable(punch) {
            tracing::debug!(ts = %punch.timestamp, "unverified app punch ignored in merge");
            continue;
        }
        match punch.slot {
            Some(slot) => slots.set(slot, punch.timestamp),
            None => tracing::debug!(ts = %punch.timestamp, "punch without slot tag ignored in slot merge"),
        }
    }
    slots
}

/// Overnight merge: no per-day slot precedence, just one chronological pool
/// of every usable timestamp from both sources. Role assignment is deferred
/// to segmentation.
pub fn pool_timestamps(ledger: &[Punch], app: &[Punch]) -> Vec<NaiveDateTime> {
    let mut out: Vec<NaiveDateTime> = ledger
        .iter()
        .chain(app.iter())
        .filter(|p| usable(p))
        .map(|p| p.timestamp)
        .collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn app_slot_overrides_ledger_slot() {
        let ledger = vec![
            Punch::ledger(ts("2025-03-03 08:00"), PunchSlot::Entry1),
            Punch::ledger(ts("2025-03-03 17:00"), PunchSlot::Exit1),
        ];
        let app = vec![Punch::app(ts("2025-03-03 08:05"), PunchSlot::Entry1, true)];

        let slots = merge_day_slots(&ledger, &app);
        assert_eq!(slots.entry1, Some(ts("2025-03-03 08:05")));
        assert_eq!(slots.exit1, Some(ts("2025-03-03 17:00")));
        assert_eq!(slots.entry2, None);
    }

    #[test]
    fn unverified_app_punch_is_ignored() {
        let ledger = vec![Punch::ledger(ts("2025-03-03 08:00"), PunchSlot::Entry1)];
        let app = vec![Punch::app(ts("2025-03-03 08:05"), PunchSlot::Entry1, false)];

        let slots = merge_day_slots(&ledger, &app);
        assert_eq!(slots.entry1, Some(ts("2025-03-03 08:00")));

        let pooled = pool_timestamps(&ledger, &app);
        assert_eq!(pooled, vec![ts("2025-03-03 08:00")]);
    }

    #[test]
    fn pooling_sorts_and_dedups_across_days() {
        let ledger = vec![
            Punch::ledger(ts("2025-03-04 06:10"), PunchSlot::Exit1),
            Punch::ledger(ts("2025-03-03 22:00"), PunchSlot::Entry1),
        ];
        let app = vec![Punch::app(ts("2025-03-03 22:00"), PunchSlot::Entry1, true)];

        let pooled = pool_timestamps(&ledger, &app);
        assert_eq!(pooled, vec![ts("2025-03-03 22:00"), ts("2025-03-04 06:10")]);

        let date: NaiveDate = "2025-03-03".parse().unwrap();
        assert_eq!(pooled[0].date(), date);
    }
}
