use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::store::HolidayCalendar;

/// Brazilian national recurring holidays as (month, day).
const NATIONAL_RECURRING: [(u32, u32); 8] = [
    (1, 1),   // Confraternização Universal
    (4, 21),  // Tiradentes
    (5, 1),   // Dia do Trabalho
    (9, 7),   // Independência
    (10, 12), // Nossa Senhora Aparecida
    (11, 2),  // Finados
    (11, 15), // Proclamação da República
    (12, 25), // Natal
];

/// Calendar of recurring (month, day) holidays plus ad hoc fixed dates such
/// as movable feasts and municipal holidays.
#[derive(Debug, Clone, Default)]
pub struct FixedHolidayCalendar {
    recurring: HashSet<(u32, u32)>,
    fixed: HashSet<NaiveDate>,
}

impl FixedHolidayCalendar {
    /// Empty calendar; every date is a regular day.
    pub fn empty() -> Self {
        FixedHolidayCalendar::default()
    }

    /// Calendar seeded with the Brazilian national recurring dates.
    pub fn brazil_national() -> Self {
        FixedHolidayCalendar {
            recurring: NATIONAL_RECURRING.into_iter().collect(),
            fixed: HashSet::new(),
        }
    }

    pub fn add_recurring(&mut self, month: u32, day: u32) -> &mut Self {
        self.recurring.insert((month, day));
        self
    }

    pub fn add_fixed(&mut self, date: NaiveDate) -> &mut Self {
        self.fixed.insert(date);
        self
    }
}

impl HolidayCalendar for FixedHolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.fixed.contains(&date) || self.recurring.contains(&(date.month(), date.day()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recurring_and_fixed_dates_match() {
        let mut cal = FixedHolidayCalendar::brazil_national();
        cal.add_fixed("2025-03-04".parse().unwrap()); // Carnaval is movable

        assert!(cal.is_holiday("2025-12-25".parse().unwrap()));
        assert!(cal.is_holiday("2031-12-25".parse().unwrap()));
        assert!(cal.is_holiday("2025-03-04".parse().unwrap()));
        assert!(!cal.is_holiday("2025-03-05".parse().unwrap()));
    }
}
