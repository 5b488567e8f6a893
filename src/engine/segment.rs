use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One contiguous work session recovered from raw timestamps. All of its
/// minutes attribute to `anchor_date`, the calendar date of the first punch,
/// even when later punches fall on the next day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkShift {
    pub anchor_date: NaiveDate,
    /// Every timestamp of the shift, entry/exit alternating by position
    /// parity starting with entry. An odd trailing timestamp is kept here
    /// for display but contributes no minutes.
    pub punches: Vec<NaiveDateTime>,
    pub worked_minutes: i64,
}

impl WorkShift {
    /// Trailing timestamp that never found its pair.
    pub fn open_punch(&self) -> Option<NaiveDateTime> {
        if self.punches.len() % 2 == 1 {
            self.punches.last().copied()
        } else {
            None
        }
    }

    fn from_punches(punches: Vec<NaiveDateTime>) -> Self {
        let anchor_date = punches[0].date();
        let mut worked_seconds = 0i64;
        for pair in punches.chunks_exact(2) {
            worked_seconds += (pair[1] - pair[0]).num_seconds();
        }
        WorkShift {
            anchor_date,
            punches,
            // nearest whole minute over the shift
            worked_minutes: (worked_seconds + 30) / 60,
        }
    }
}

/// An entry left open longer than this cannot belong to one work session;
/// past it the gap rule applies even to an unpaired entry, so a forgotten
/// punch-out stays an orphan instead of fusing with the next day's entry.
pub const MAX_SESSION_HOURS: i64 = 16;

/// Groups ascending timestamps into shifts: a gap longer than `quiet_period`
/// closes the current shift and opens the next. The first timestamp always
/// opens shift 1.
///
/// The quiet-period check only applies once the current shift holds complete
/// pairs; a long stretch after an un-exited entry is time on shift (a night
/// worker's whole session sits between two punches), not a quiet period,
/// up to [`MAX_SESSION_HOURS`].
pub fn segment(timestamps: &[NaiveDateTime], quiet_period: Duration) -> Vec<WorkShift> {
    let mut shifts = Vec::new();
    let mut current: Vec<NaiveDateTime> = Vec::new();

    for &ts in timestamps {
        if let Some(&prev) = current.last() {
            let gap = ts - prev;
            let mid_pair = current.len() % 2 == 1;
            let limit = if mid_pair {
                Duration::hours(MAX_SESSION_HOURS)
            } else {
                quiet_period
            };
            if gap > limit {
                shifts.push(WorkShift::from_punches(std::mem::take(&mut current)));
            }
        }
        current.push(ts);
    }
    if !current.is_empty() {
        shifts.push(WorkShift::from_punches(current));
    }
    shifts
}
