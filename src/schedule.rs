//! Carrier collection date.
//!
//! Parcels handed over before the daily cutoff leave the same business day;
//! later ones, and anything packed over the weekend, leave on the next
//! business day.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};

pub const CUTOFF_HOUR: u32 = 11;
pub const CUTOFF_MINUTE: u32 = 2;

/// Whether `time` is strictly past the cutoff minute (11:02 itself still counts as on time).
fn past_cutoff(time: NaiveTime) -> bool {
    (time.hour(), time.minute()) > (CUTOFF_HOUR, CUTOFF_MINUTE)
}

/// The date the carrier collects parcels packed at `now`.
pub fn collection_date(now: NaiveDateTime) -> NaiveDate {
    let today = now.date();
    match today.weekday() {
        Weekday::Sat => today + Duration::days(2),
        Weekday::Sun => today + Duration::days(1),
        Weekday::Fri if past_cutoff(now.time()) => today + Duration::days(3),
        _ if past_cutoff(now.time()) => today + Duration::days(1),
        _ => today,
    }
}
