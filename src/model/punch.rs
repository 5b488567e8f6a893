use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Originating channel of a punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PunchSource {
    /// Badge/terminal punch from the authoritative workforce ledger.
    Ledger,
    /// Companion mobile app capture.
    App,
    /// Operator-entered correction.
    Manual,
}

/// Slot tag of a punch within one calendar day, in the ledger's own vocabulary
/// (`P8_TPMARCA` values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum PunchSlot {
    #[strum(serialize = "1E")]
    Entry1,
    #[strum(serialize = "1S")]
    Exit1,
    #[strum(serialize = "2E")]
    Entry2,
    #[strum(serialize = "2S")]
    Exit2,
}

impl PunchSlot {
    pub const ALL: [PunchSlot; 4] = [
        PunchSlot::Entry1,
        PunchSlot::Exit1,
        PunchSlot::Entry2,
        PunchSlot::Exit2,
    ];
}

/// A single captured punch. Entry/exit role is not stored; it is inferred from
/// chronological position parity inside a shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Punch {
    pub source: PunchSource,
    pub timestamp: NaiveDateTime,
    pub slot: Option<PunchSlot>,
    /// Identity-verification outcome attached by the capture channel. Ledger
    /// punches are implicitly verified; app punches carry the flag from the
    /// face-verification service.
    pub verified: bool,
}

impl Punch {
    pub fn ledger(timestamp: NaiveDateTime, slot: PunchSlot) -> Self {
        Punch {
            source: PunchSource::Ledger,
            timestamp,
            slot: Some(slot),
            verified: true,
        }
    }

    pub fn app(timestamp: NaiveDateTime, slot: PunchSlot, verified: bool) -> Self {
        Punch {
            source: PunchSource::App,
            timestamp,
            slot: Some(slot),
            verified,
        }
    }
}

/// Fixed four-slot shape of one calendar day's punches. A closed set of
/// explicitly optional fields rather than a keyed map, so a mistyped slot
/// cannot silently create a fifth position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySlots {
    pub entry1: Option<NaiveDateTime>,
    pub exit1: Option<NaiveDateTime>,
    pub entry2: Option<NaiveDateTime>,
    pub exit2: Option<NaiveDateTime>,
}

impl DaySlots {
    pub fn get(&self, slot: PunchSlot) -> Option<NaiveDateTime> {
        match slot {
            PunchSlot::Entry1 => self.entry1,
            PunchSlot::Exit1 => self.exit1,
            PunchSlot::Entry2 => self.entry2,
            PunchSlot::Exit2 => self.exit2,
        }
    }

    pub fn set(&mut self, slot: PunchSlot, timestamp: NaiveDateTime) {
        match slot {
            PunchSlot::Entry1 => self.entry1 = Some(timestamp),
            PunchSlot::Exit1 => self.exit1 = Some(timestamp),
            PunchSlot::Entry2 => self.entry2 = Some(timestamp),
            PunchSlot::Exit2 => self.exit2 = Some(timestamp),
        }
    }

    /// Present timestamps in chronological order, ready for parity pairing.
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        let mut out: Vec<NaiveDateTime> = [self.entry1, self.exit1, self.entry2, self.exit2]
            .into_iter()
            .flatten()
            .collect();
        out.sort();
        out
    }
}
