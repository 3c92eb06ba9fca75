//! Injected time source.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

// `date(1)`-style: `Sun Aug 23 14:05:07 2026`.
const DATE_FORMAT: &[FormatItem<'_>] = format_description!(
    "[weekday repr:short] [month repr:short] [day padding:space] [hour]:[minute]:[second] [year]"
);

/// Time source for the `date` command and the taskbar clock. Tests pin the
/// instant by substituting their own implementation.
pub trait Clock: Send {
    fn now(&self) -> OffsetDateTime;
}

/// Wall clock, in local time when the offset is known, UTC otherwise.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
    }
}

pub fn format_date(instant: OffsetDateTime) -> String {
    instant
        .format(&DATE_FORMAT)
        .unwrap_or_else(|_| instant.to_string())
}

/// Taskbar clock label, minute granularity: `2:05 PM`.
pub fn format_clock(instant: OffsetDateTime) -> String {
    let hour24 = instant.hour();
    let (hour12, meridiem) = match hour24 {
        0 => (12, "AM"),
        1..=11 => (hour24, "AM"),
        12 => (12, "PM"),
        _ => (hour24 - 12, "PM"),
    };
    format!("{}:{:02} {}", hour12, instant.minute(), meridiem)
}
