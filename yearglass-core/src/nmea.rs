//! Minimal RMC sentence handling for the satellite time provider.
//!
//! Only `$GPRMC` sentences with the validity flag set are accepted; anything
//! else is discarded where it is read, never reported upward.

use yearglass_common::DateTime;

use crate::calendar;

/// The one sentence tag the core consumes.
pub const RMC_TAG: &str = "$GPRMC";

const MIN_FIELDS: usize = 10;

/// Extract a UTC sample from one RMC sentence, or `None` if the line is not
/// a valid fix. Weekday and yearday come from calendar arithmetic, not from
/// the receiver.
pub fn parse_rmc(line: &str) -> Option<DateTime> {
    let line = line.trim();
    if !line.starts_with(RMC_TAG) {
        return None;
    }

    let mut field_count = 0usize;
    let mut time_field = "";
    let mut status_field = "";
    let mut date_field = "";
    for (i, field) in line.split(',').enumerate() {
        field_count += 1;
        match i {
            1 => time_field = field,
            2 => status_field = field,
            9 => date_field = field,
            _ => {}
        }
    }
    if field_count < MIN_FIELDS || status_field != "A" {
        return None;
    }
    if time_field.len() < 6 || date_field.len() < 6 {
        return None;
    }

    let hour = two_digits(time_field, 0)?;
    let minute = two_digits(time_field, 2)?;
    let second = two_digits(time_field, 4)?;
    let day = two_digits(date_field, 0)?;
    let month = two_digits(date_field, 2)?;
    let year = 2000 + two_digits(date_field, 4)? as u16;

    calendar::datetime_from_ymd_hms(year, month, day, hour, minute, second).ok()
}

fn two_digits(s: &str, at: usize) -> Option<u8> {
    let bytes = s.as_bytes();
    let hi = *bytes.get(at)?;
    let lo = *bytes.get(at + 1)?;
    if !hi.is_ascii_digit() || !lo.is_ascii_digit() {
        return None;
    }
    Some((hi - b'0') * 10 + (lo - b'0'))
}
