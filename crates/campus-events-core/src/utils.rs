//! Display helpers shared by the views and the CLI

use chrono::{NaiveDate, NaiveTime};

/// Format a date as `Apr 12, 2025`
#[must_use]
pub fn format_event_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Format a time as 12-hour clock, e.g. `7:30 PM`
#[must_use]
pub fn format_event_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Avatar initial for an admin name, `A` when the name is empty
#[must_use]
pub fn avatar_initial(name: &str) -> char {
    name.chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('A')
}
