//! Gregorian arithmetic and the civil-time rule.
//!
//! Everything in here is pure. Clocks store UTC; conversion to civil time
//! (CET/CEST) happens only on the consumer side, via [`utc_to_local`].

use yearglass_common::{DateTime, RtcDateTime, TimeError, YearProgress};

/// Weekday convention: 0 = Monday .. 6 = Sunday.
pub const SUNDAY: u8 = 6;

const SECS_PER_DAY: i64 = 86400;

const DAYS: [[u8; 12]; 2] = [
    [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
    [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
];

pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub fn days_in_month(year: u16, month: u8) -> u8 {
    DAYS[is_leap_year(year) as usize][month as usize - 1]
}

pub fn days_in_year(year: u16) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// 1-based ordinal day within the year.
pub fn day_of_year(year: u16, month: u8, day: u8) -> u16 {
    let mut ordinal = day as u16;
    for m in 1..month {
        ordinal += days_in_month(year, m) as u16;
    }
    ordinal
}

fn days_since_epoch(year: u16, month: u8, day: u8) -> i64 {
    let mut days = 0i64;
    for y in 1970..year {
        days += days_in_year(y) as i64;
    }
    days + day_of_year(year, month, day) as i64 - 1
}

/// 0 = Monday .. 6 = Sunday. 1970-01-01 was a Thursday.
pub fn weekday(year: u16, month: u8, day: u8) -> u8 {
    ((days_since_epoch(year, month, day) + 3) % 7) as u8
}

pub fn ymd_hms_to_unix(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> i64 {
    days_since_epoch(year, month, day) * SECS_PER_DAY
        + hour as i64 * 3600
        + minute as i64 * 60
        + second as i64
}

pub fn to_unix_seconds(dt: &DateTime) -> i64 {
    ymd_hms_to_unix(dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second)
}

/// Break unix seconds (1970+, UTC) back into calendar fields, weekday and
/// yearday included.
pub fn from_unix_seconds(ts: i64) -> DateTime {
    let mut year = 1970u16;
    let mut remaining = ts;
    loop {
        let year_secs = days_in_year(year) as i64 * SECS_PER_DAY;
        if remaining >= year_secs {
            remaining -= year_secs;
            year += 1;
        } else {
            break;
        }
    }

    let mut month = 1u8;
    loop {
        let month_secs = days_in_month(year, month) as i64 * SECS_PER_DAY;
        if remaining >= month_secs {
            remaining -= month_secs;
            month += 1;
        } else {
            break;
        }
    }

    let day = (remaining / SECS_PER_DAY) as u8 + 1;
    remaining %= SECS_PER_DAY;
    let hour = (remaining / 3600) as u8;
    remaining %= 3600;
    let minute = (remaining / 60) as u8;
    let second = (remaining % 60) as u8;

    DateTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
        weekday: weekday(year, month, day),
        yearday: day_of_year(year, month, day),
    }
}

/// Validating constructor; the only way raw source fields become a sample.
/// Weekday and yearday are always recomputed here, never taken on trust.
pub fn datetime_from_ymd_hms(
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
) -> Result<DateTime, TimeError> {
    if !(1970..=2105).contains(&year)
        || !(1..=12).contains(&month)
        || day < 1
        || day > days_in_month(year, month)
        || hour > 23
        || minute > 59
        || second > 59
    {
        return Err(TimeError::InvalidTimeTuple);
    }
    Ok(DateTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
        weekday: weekday(year, month, day),
        yearday: day_of_year(year, month, day),
    })
}

/// Ingest a durable-clock tuple. The chip's weekday byte is ignored.
pub fn datetime_from_rtc(t: &RtcDateTime) -> Result<DateTime, TimeError> {
    datetime_from_ymd_hms(t.year, t.month, t.day, t.hour, t.minute, t.second)
}

/// Day of month of the last Sunday, scanning 31 down to 25 and skipping days
/// the month does not have.
pub fn last_sunday(year: u16, month: u8) -> Option<u8> {
    let limit = days_in_month(year, month);
    for day in (25..=31u8).rev() {
        if day <= limit && weekday(year, month, day) == SUNDAY {
            return Some(day);
        }
    }
    None
}

/// CET/CEST rule: DST runs from 02:00 UTC on the last Sunday of March to
/// 01:00 UTC on the last Sunday of October of the same year.
pub fn is_dst(utc: &DateTime) -> bool {
    let (Some(march), Some(october)) = (last_sunday(utc.year, 3), last_sunday(utc.year, 10))
    else {
        return false;
    };
    let start = ymd_hms_to_unix(utc.year, 3, march, 2, 0, 0);
    let end = ymd_hms_to_unix(utc.year, 10, october, 1, 0, 0);
    let now = to_unix_seconds(utc);
    start <= now && now < end
}

pub fn civil_offset_hours(utc: &DateTime) -> i64 {
    if is_dst(utc) { 2 } else { 1 }
}

/// Apply the civil offset and renormalize every calendar field.
pub fn utc_to_local(utc: &DateTime) -> DateTime {
    from_unix_seconds(to_unix_seconds(utc) + civil_offset_hours(utc) * 3600)
}

/// Day-count engine: completed days only, the current day never counts.
pub fn year_progress(local: &DateTime) -> YearProgress {
    YearProgress {
        days_elapsed: local.yearday.saturating_sub(1),
        days_total: days_in_year(local.year),
    }
}

/// Seconds from `local` to the next midnight, without any safety margin.
/// 00:00:00 yields a full day (86400), 23:59:59 yields 1.
pub fn seconds_till_midnight_raw(local: &DateTime) -> i32 {
    (23 - local.hour as i32) * 3600 + (59 - local.minute as i32) * 60 + (60 - local.second as i32)
}
