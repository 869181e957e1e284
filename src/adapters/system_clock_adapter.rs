//! System clock adapter.

use crate::ports::clock_port::ClockPort;
use chrono::NaiveDateTime;

/// Wall clock in the machine's local time zone.
pub struct SystemClockAdapter;

impl ClockPort for SystemClockAdapter {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}
