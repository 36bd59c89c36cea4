//! Calendar-day helpers for cooldown comparisons.
//!
//! All day arithmetic uses the fixed UTC reference timezone — a reward
//! claimed at 23:59 UTC and another at 00:01 UTC the next day are different
//! days everywhere in the system, regardless of the user's locale.

use salus_types::Timestamp;

/// Whether two timestamps fall on the same UTC calendar day.
pub fn same_calendar_day(a: Timestamp, b: Timestamp) -> bool {
    a.day_number() == b.day_number()
}
