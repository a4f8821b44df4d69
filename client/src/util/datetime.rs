//! Time formatting for weather and chat displays.
//!
//! Weather timestamps arrive as UTC seconds plus the location's UTC offset,
//! so every helper takes both and formats in the location's local time.

#[cfg(test)]
#[path = "datetime_test.rs"]
mod datetime_test;

use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

const NOON_SECS: i64 = 12 * 60 * 60;

/// UTC seconds shifted into a location's local time.
#[must_use]
pub fn local(utc_secs: i64, offset_secs: i64) -> Option<OffsetDateTime> {
    let offset = UtcOffset::from_whole_seconds(i32::try_from(offset_secs).ok()?).ok()?;
    Some(OffsetDateTime::from_unix_timestamp(utc_secs).ok()?.to_offset(offset))
}

/// Calendar day of the instant in the location's local time.
#[must_use]
pub fn local_date(utc_secs: i64, offset_secs: i64) -> Option<Date> {
    local(utc_secs, offset_secs).map(|t| t.date())
}

/// Distance in seconds from local noon on the same day.
#[must_use]
pub fn seconds_from_noon(utc_secs: i64, offset_secs: i64) -> Option<i64> {
    let t = local(utc_secs, offset_secs)?;
    let secs_of_day = i64::from(t.hour()) * 3600 + i64::from(t.minute()) * 60 + i64::from(t.second());
    Some((secs_of_day - NOON_SECS).abs())
}

/// `07:05 AM` style clock time. Empty when the instant is out of range.
#[must_use]
pub fn clock(utc_secs: i64, offset_secs: i64) -> String {
    let fmt = format_description!("[hour repr:12]:[minute] [period]");
    local(utc_secs, offset_secs)
        .and_then(|t| t.format(&fmt).ok())
        .unwrap_or_default()
}

/// `Mon, Jan 5, 2024` style day label.
#[must_use]
pub fn day_label(utc_secs: i64, offset_secs: i64) -> String {
    let fmt = format_description!("[weekday repr:short], [month repr:short] [day padding:none], [year]");
    local(utc_secs, offset_secs)
        .and_then(|t| t.format(&fmt).ok())
        .unwrap_or_default()
}

/// Current time, UTC seconds.
#[must_use]
pub fn now_unix() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let secs = (js_sys::Date::now() / 1000.0) as i64;
        secs
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}

/// The browser's current UTC offset in seconds (zero off-browser).
#[must_use]
pub fn browser_offset_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        // getTimezoneOffset is UTC minus local, in minutes.
        #[allow(clippy::cast_possible_truncation)]
        let minutes = js_sys::Date::new_0().get_timezone_offset() as i64;
        -minutes * 60
    }
    #[cfg(not(feature = "hydrate"))]
    {
        0
    }
}

/// Clock time for a chat message stamped now.
#[must_use]
pub fn chat_timestamp() -> String {
    clock(now_unix(), browser_offset_secs())
}
