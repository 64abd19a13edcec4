//! Conversion between `iso8601::DateTime` and the `<dateTime.iso8601>` wire form.
//!
//! The wire form is the fixed-width `YYYYMMDDThh:mm:ss`. No timezone is written or read: the
//! calendar fields are sent as they are, without normalizing to UTC.

use crate::error::{Error, Result};

use iso8601::{Date, DateTime, Time};

const FOR_TYPE: &str = "dateTime.iso8601";

/// Formats a date/time as `YYYYMMDDThh:mm:ss`.
///
/// Milliseconds and the timezone offset are dropped.
///
/// # Errors
///
/// `Error::UnsupportedValueShape` for:
///
/// * week (`2016-W05-3`) and ordinal (`2016-123`) dates, which have no calendar fields to write;
/// * years outside `0..=9999` and out-of-range fields, which do not fit the fixed-width form.
pub fn to_wire(date_time: &DateTime) -> Result<String> {
    let Time { hour, minute, second, .. } = date_time.time;

    match date_time.date {
        Date::YMD { year, month, day } => {
            if !(0..=9999).contains(&year) || !fields_in_range(month, day, hour, minute, second) {
                return Err(Error::UnsupportedValueShape(format!(
                    "date {}-{}-{} {}:{}:{} has no {} form",
                    year, month, day, hour, minute, second, FOR_TYPE
                )));
            }
            Ok(format!("{:04}{:02}{:02}T{:02}:{:02}:{:02}", year, month, day, hour, minute, second))
        }
        Date::Week { year, ww, d } => Err(Error::UnsupportedValueShape(format!(
            "week date {:04}-W{:02}-{} has no calendar form", year, ww, d
        ))),
        Date::Ordinal { year, ddd } => Err(Error::UnsupportedValueShape(format!(
            "ordinal date {:04}-{:03} has no calendar form", year, ddd
        ))),
    }
}

fn fields_in_range(month: u32, day: u32, hour: u32, minute: u32, second: u32) -> bool {
    (1..=12).contains(&month) && (1..=31).contains(&day) && hour <= 23 && minute <= 59 && second <= 60
}

/// Parses `YYYYMMDDThh:mm:ss` by fixed character offsets.
///
/// The separators must be `T` and `:`. Anything after the seconds field (fractions, a timezone
/// suffix) is ignored. The result has a zero timezone offset and zero milliseconds.
pub fn from_wire(text: &str) -> Result<DateTime> {
    let text = text.trim();
    let invalid = || Error::invalid_value(FOR_TYPE, text);

    let field = |start: usize, len: usize| -> Result<u32> {
        let digits = text.get(start..start + len).ok_or_else(invalid)?;
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        digits.parse().map_err(|_| invalid())
    };

    let separators = [(8, b'T'), (11, b':'), (14, b':')];
    if separators.iter().any(|&(at, sep)| text.as_bytes().get(at) != Some(&sep)) {
        return Err(invalid());
    }

    let year = field(0, 4)?;
    let month = field(4, 2)?;
    let day = field(6, 2)?;
    let hour = field(9, 2)?;
    let minute = field(12, 2)?;
    let second = field(15, 2)?;

    if !fields_in_range(month, day, hour, minute, second) {
        return Err(invalid());
    }

    Ok(DateTime {
        date: Date::YMD {
            year: year as i32,
            month,
            day,
        },
        time: Time {
            hour,
            minute,
            second,
            millisecond: 0,
            tz_offset_hours: 0,
            tz_offset_minutes: 0,
        },
    })
}
