pub mod balance;
pub mod merge;
pub mod report;
pub mod resolver;
pub mod segment;

pub use report::ReconcileEngine;
pub use resolver::{ResolvedDay, RuleSource};
pub use segment::WorkShift;
