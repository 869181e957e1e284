//! Clock source port trait.

use chrono::NaiveDateTime;

/// Supplies the current instant on each evaluation tick.
///
/// The time zone is the adapter's concern; the evaluator only ever sees a
/// zone-free local timestamp.
pub trait ClockPort {
    fn now(&self) -> NaiveDateTime;
}
