pub mod balance;
pub mod employee;
pub mod punch;
pub mod schedule;

pub use balance::{DailyBalance, DayStatus, EmployeeReport, PeriodReport, PeriodTotal, SkippedEmployee};
pub use employee::EmployeeId;
pub use punch::{DaySlots, Punch, PunchSlot, PunchSource};
pub use schedule::{
    DailyOverride, DateRange, DayType, LeaveCategory, LeaveRange, RosterEntry, ScheduleRule,
};
