//! Calendar date rendering and RFC 3339 timestamp parsing.
//!
//! Date values carry calendar fields of varying precision and are rendered
//! `YYYY[/M[/D]]`. Resource timestamps (`creationDate`,
//! `lastModificationDate`) are RFC 3339 datetimes converted to microseconds
//! since the Unix epoch plus the offset in minutes.

const MICROSECONDS_PER_SECOND: i64 = 1_000_000;
const MICROSECONDS_PER_MINUTE: i64 = 60 * MICROSECONDS_PER_SECOND;
const MICROSECONDS_PER_HOUR: i64 = 60 * MICROSECONDS_PER_MINUTE;
const MICROSECONDS_PER_DAY: i64 = 24 * MICROSECONDS_PER_HOUR;

/// How much of a calendar date is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatePrecision {
    Year,
    Month,
    Day,
}

impl DatePrecision {
    /// Derives the precision from which fields are present.
    ///
    /// A day without a month is meaningless and counts as year precision.
    pub fn from_fields(month: Option<u32>, day: Option<u32>) -> Self {
        match (month, day) {
            (Some(_), Some(_)) => DatePrecision::Day,
            (Some(_), None) => DatePrecision::Month,
            (None, _) => DatePrecision::Year,
        }
    }
}

/// Renders a date as `YYYY`, `YYYY/M` or `YYYY/M/D` depending on precision.
///
/// Month and day are never zero-padded.
pub fn format_partial_date(
    year: i32,
    month: Option<u32>,
    day: Option<u32>,
    precision: DatePrecision,
) -> String {
    match (precision, month, day) {
        (DatePrecision::Day, Some(m), Some(d)) => format!("{year}/{m}/{d}"),
        (DatePrecision::Month | DatePrecision::Day, Some(m), _) => format!("{year}/{m}"),
        _ => year.to_string(),
    }
}

/// Error type for RFC 3339 parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeParseError {
    pub message: String,
}

impl DateTimeParseError {
    fn invalid(what: &str, input: &str) -> Self {
        Self {
            message: format!("Invalid {what} in datetime: {input}"),
        }
    }
}

impl std::fmt::Display for DateTimeParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DateTimeParseError {}

/// A point in time as stored on resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTimeStamp {
    /// Microseconds since 1970-01-01T00:00:00Z.
    pub epoch_us: i64,
    /// Offset of the original notation from UTC, in minutes.
    pub offset_min: i16,
}

/// Parses `Z`, `+HH:MM` or `-HH:MM` into minutes.
fn parse_timezone_offset(offset: &str, input: &str) -> Result<i16, DateTimeParseError> {
    if offset == "Z" || offset == "z" {
        return Ok(0);
    }
    let (sign, rest) = match offset.as_bytes().first() {
        Some(b'+') => (1i16, &offset[1..]),
        Some(b'-') => (-1i16, &offset[1..]),
        _ => return Err(DateTimeParseError::invalid("offset", input)),
    };
    let (hh, mm) = rest
        .split_once(':')
        .ok_or_else(|| DateTimeParseError::invalid("offset", input))?;
    if hh.len() != 2 || mm.len() != 2 {
        return Err(DateTimeParseError::invalid("offset", input));
    }
    let hours: i16 = hh
        .parse()
        .map_err(|_| DateTimeParseError::invalid("offset", input))?;
    let minutes: i16 = mm
        .parse()
        .map_err(|_| DateTimeParseError::invalid("offset", input))?;
    if hours > 23 || minutes > 59 {
        return Err(DateTimeParseError::invalid("offset", input));
    }
    Ok(sign * (hours * 60 + minutes))
}

/// Converts up to six fractional digits into microseconds; extra digits are truncated.
fn parse_fractional_seconds(frac: &str) -> i64 {
    let digits: String = frac.chars().take(6).collect();
    let padded = format!("{digits:0<6}");
    padded.parse().unwrap_or(0)
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days since the Unix epoch for a proleptic Gregorian date (Howard Hinnant).
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(if month <= 2 { year - 1 } else { year });
    let m = i64::from(month);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = y - era * 400;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + i64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Parses an RFC 3339 datetime (`YYYY-MM-DDTHH:MM:SS[.ffffff](Z|±HH:MM)`).
///
/// A missing offset is read as UTC.
pub fn parse_datetime_stamp(input: &str) -> Result<DateTimeStamp, DateTimeParseError> {
    let bytes = input.as_bytes();
    if bytes.len() < 19
        || bytes[4] != b'-'
        || bytes[7] != b'-'
        || !matches!(bytes[10], b'T' | b't' | b' ')
        || bytes[13] != b':'
        || bytes[16] != b':'
        || !input.is_char_boundary(19)
    {
        return Err(DateTimeParseError {
            message: format!("Invalid RFC 3339 datetime: {input}"),
        });
    }

    let field = |range: std::ops::Range<usize>, what: &str| -> Result<u32, DateTimeParseError> {
        let text = &input[range];
        if !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateTimeParseError::invalid(what, input));
        }
        text.parse().map_err(|_| DateTimeParseError::invalid(what, input))
    };

    let year = field(0..4, "year")? as i32;
    let month = field(5..7, "month")?;
    let day = field(8..10, "day")?;
    let hours = field(11..13, "hours")?;
    let minutes = field(14..16, "minutes")?;
    let seconds = field(17..19, "seconds")?;

    if !(1..=12).contains(&month) {
        return Err(DateTimeParseError::invalid("month", input));
    }
    if day < 1 || day > days_in_month(year, month) {
        return Err(DateTimeParseError::invalid("day", input));
    }
    if hours > 23 {
        return Err(DateTimeParseError::invalid("hours", input));
    }
    if minutes > 59 {
        return Err(DateTimeParseError::invalid("minutes", input));
    }
    if seconds > 59 {
        return Err(DateTimeParseError::invalid("seconds", input));
    }

    let rest = &input[19..];
    let (fraction, offset) = match rest.strip_prefix('.') {
        Some(after_dot) => {
            let end = after_dot
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_dot.len());
            if end == 0 {
                return Err(DateTimeParseError::invalid("fraction", input));
            }
            (&after_dot[..end], &after_dot[end..])
        }
        None => ("", rest),
    };

    let offset_min = if offset.is_empty() {
        0
    } else {
        parse_timezone_offset(offset, input)?
    };

    let local_us = days_from_civil(year, month, day) * MICROSECONDS_PER_DAY
        + i64::from(hours) * MICROSECONDS_PER_HOUR
        + i64::from(minutes) * MICROSECONDS_PER_MINUTE
        + i64::from(seconds) * MICROSECONDS_PER_SECOND
        + parse_fractional_seconds(fraction);

    // local = UTC + offset
    let epoch_us = local_us - i64::from(offset_min) * MICROSECONDS_PER_MINUTE;
    Ok(DateTimeStamp {
        epoch_us,
        offset_min,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_date_year() {
        assert_eq!(format_partial_date(1950, None, None, DatePrecision::Year), "1950");
        // month present but precision says year
        assert_eq!(format_partial_date(1950, Some(6), None, DatePrecision::Year), "1950");
    }

    #[test]
    fn test_partial_date_month() {
        assert_eq!(format_partial_date(1950, Some(6), None, DatePrecision::Month), "1950/6");
        assert_eq!(format_partial_date(1950, Some(6), Some(9), DatePrecision::Month), "1950/6");
    }

    #[test]
    fn test_partial_date_day() {
        assert_eq!(format_partial_date(2018, Some(10), Some(30), DatePrecision::Day), "2018/10/30");
        // no day to print
        assert_eq!(format_partial_date(2018, Some(10), None, DatePrecision::Day), "2018/10");
    }

    #[test]
    fn test_precision_from_fields() {
        assert_eq!(DatePrecision::from_fields(None, None), DatePrecision::Year);
        assert_eq!(DatePrecision::from_fields(Some(1), None), DatePrecision::Month);
        assert_eq!(DatePrecision::from_fields(Some(1), Some(2)), DatePrecision::Day);
        assert_eq!(DatePrecision::from_fields(None, Some(2)), DatePrecision::Year);
    }

    #[test]
    fn test_parse_datetime_utc() {
        let ts = parse_datetime_stamp("1970-01-01T00:00:00Z").unwrap();
        assert_eq!(ts, DateTimeStamp { epoch_us: 0, offset_min: 0 });

        let ts = parse_datetime_stamp("2024-01-15T10:30:45.123456Z").unwrap();
        assert_eq!(ts.epoch_us, 1_705_314_645_123_456);
    }

    #[test]
    fn test_parse_datetime_fraction_truncated() {
        let ts = parse_datetime_stamp("2018-05-28T15:52:03.897Z").unwrap();
        assert_eq!(ts.epoch_us % MICROSECONDS_PER_SECOND, 897_000);

        let ts = parse_datetime_stamp("1970-01-01T00:00:00.1234567Z").unwrap();
        assert_eq!(ts.epoch_us, 123_456);
    }

    #[test]
    fn test_parse_datetime_with_offset() {
        let ts = parse_datetime_stamp("1970-01-01T01:00:00+01:00").unwrap();
        assert_eq!(ts.epoch_us, 0);
        assert_eq!(ts.offset_min, 60);

        let ts = parse_datetime_stamp("1969-12-31T19:00:00-05:00").unwrap();
        assert_eq!(ts.epoch_us, 0);
        assert_eq!(ts.offset_min, -300);
    }

    #[test]
    fn test_parse_datetime_before_epoch() {
        let ts = parse_datetime_stamp("1969-12-31T23:59:59Z").unwrap();
        assert_eq!(ts.epoch_us, -MICROSECONDS_PER_SECOND);
    }

    #[test]
    fn test_invalid_datetimes() {
        for input in [
            "",
            "2024-01-15",
            "2024-13-01T00:00:00Z",
            "2023-02-29T00:00:00Z",
            "2024-01-15T24:00:00Z",
            "2024-01-15T10:30:45+25:00",
            "2024-01-15T10:30:45.Z",
            "2024-01-15X10:30:45Z",
            "2024-0a-15T10:30:45Z",
        ] {
            assert!(parse_datetime_stamp(input).is_err(), "{input} should not parse");
        }
        assert!(parse_datetime_stamp("2024-02-29T00:00:00Z").is_ok());
    }
}
