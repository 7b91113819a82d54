//! Parsing and formatting of user-entered due values.
//!
//! Input fields hand over raw strings; these helpers turn them into calendar
//! dates and wall-clock times. An empty field means "no value", not an error.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike};

use crate::error::ParseError;

/// Parse a due date relative to `today`.
///
/// Supports:
/// - "" (no due date)
/// - "today", "tomorrow", "yesterday"
/// - "monday" .. "sunday" (and short forms), "next friday"
/// - "end of week" / "eow", "end of month" / "eom"
/// - "in 3d", "in 2w"
/// - "YYYY-MM-DD"
pub fn parse_due_date(input: &str, today: NaiveDate) -> Result<Option<NaiveDate>, ParseError> {
    let s = input.trim().to_lowercase();
    if s.is_empty() {
        return Ok(None);
    }

    match s.as_str() {
        "today" => return Ok(Some(today)),
        "tomorrow" => return Ok(Some(today + Duration::days(1))),
        "yesterday" => return Ok(Some(today - Duration::days(1))),
        "end of week" | "eow" => {
            let to_sunday = 6 - i64::from(today.weekday().num_days_from_monday());
            return Ok(Some(today + Duration::days(to_sunday)));
        }
        "end of month" | "eom" => {
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            if let Some(first_of_next) = NaiveDate::from_ymd_opt(year, month, 1) {
                return Ok(Some(first_of_next - Duration::days(1)));
            }
        }
        _ => {}
    }

    if let Some(rest) = s.strip_prefix("in ") {
        let rest = rest.trim();
        let offset = if let Some(n) = rest.strip_suffix('d') {
            n.trim().parse::<i64>().ok().map(Duration::try_days)
        } else if let Some(n) = rest.strip_suffix('w') {
            n.trim().parse::<i64>().ok().map(Duration::try_weeks)
        } else {
            None
        };
        if let Some(offset) = offset {
            // Offsets past chrono's calendar range are rejected.
            return offset
                .and_then(|d| today.checked_add_signed(d))
                .map(Some)
                .ok_or_else(|| ParseError::InvalidDate(input.trim().to_string()));
        }
    }

    let (next_week, day_name) = match s.strip_prefix("next ") {
        Some(rest) => (true, rest.trim()),
        None => (false, s.strip_prefix("this ").unwrap_or(&s).trim()),
    };
    if let Some(target) = weekday_index(day_name) {
        let current = i64::from(today.weekday().num_days_from_monday());
        let mut ahead = (target + 7 - current) % 7;
        if next_week {
            ahead += 7;
        }
        return Ok(Some(today + Duration::days(ahead)));
    }

    NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| ParseError::InvalidDate(input.trim().to_string()))
}

fn weekday_index(name: &str) -> Option<i64> {
    let idx = match name {
        "monday" | "mon" => 0,
        "tuesday" | "tue" => 1,
        "wednesday" | "wed" => 2,
        "thursday" | "thu" => 3,
        "friday" | "fri" => 4,
        "saturday" | "sat" => 5,
        "sunday" | "sun" => 6,
        _ => return None,
    };
    Some(idx)
}

/// Parse a due time: "" (none), "HH:MM" (24h), "3:30pm", "3pm".
pub fn parse_due_time(input: &str) -> Result<Option<NaiveTime>, ParseError> {
    let s = input.trim().to_lowercase().replace(' ', "");
    if s.is_empty() {
        return Ok(None);
    }
    let invalid = || ParseError::InvalidTime(input.trim().to_string());

    if let Ok(t) = NaiveTime::parse_from_str(&s, "%H:%M") {
        return Ok(Some(t));
    }

    let (clock, pm) = if let Some(c) = s.strip_suffix("pm") {
        (c, true)
    } else if let Some(c) = s.strip_suffix("am") {
        (c, false)
    } else {
        return Err(invalid());
    };

    let (hour, minute) = match clock.split_once(':') {
        Some((h, m)) => (h, m),
        None => (clock, "0"),
    };
    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&hour) {
        return Err(invalid());
    }
    let hour24 = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    NaiveTime::from_hms_opt(hour24, minute, 0).map(Some).ok_or_else(invalid)
}

/// Format a time as "3:05 PM".
pub fn format_time_12h(time: NaiveTime) -> String {
    let (pm, hour) = time.hour12();
    format!("{}:{:02} {}", hour, time.minute(), if pm { "PM" } else { "AM" })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    // 2024-03-13 is a Wednesday.
    const TODAY: &str = "2024-03-13";

    #[test]
    fn parse_due_date_forms() {
        let today = date(TODAY);
        assert_eq!(parse_due_date("", today), Ok(None));
        assert_eq!(parse_due_date("  ", today), Ok(None));
        assert_eq!(parse_due_date("today", today), Ok(Some(today)));
        assert_eq!(parse_due_date("Tomorrow", today), Ok(Some(date("2024-03-14"))));
        assert_eq!(parse_due_date("in 3d", today), Ok(Some(date("2024-03-16"))));
        assert_eq!(parse_due_date("in 2w", today), Ok(Some(date("2024-03-27"))));
        assert_eq!(parse_due_date("friday", today), Ok(Some(date("2024-03-15"))));
        assert_eq!(parse_due_date("wed", today), Ok(Some(today)));
        assert_eq!(parse_due_date("next monday", today), Ok(Some(date("2024-03-25"))));
        assert_eq!(parse_due_date("eow", today), Ok(Some(date("2024-03-17"))));
        assert_eq!(parse_due_date("eom", today), Ok(Some(date("2024-03-31"))));
        assert_eq!(parse_due_date("2025-01-05", today), Ok(Some(date("2025-01-05"))));
    }

    #[test]
    fn parse_due_date_rejects_garbage() {
        let today = date(TODAY);
        assert_eq!(
            parse_due_date("soonish", today),
            Err(ParseError::InvalidDate("soonish".to_string()))
        );
        assert!(parse_due_date("2024-13-01", today).is_err());
    }

    #[test]
    fn parse_due_date_out_of_range_offsets_are_invalid() {
        let today = date(TODAY);
        assert_eq!(
            parse_due_date("in 100000000d", today),
            Err(ParseError::InvalidDate("in 100000000d".to_string()))
        );
        assert_eq!(
            parse_due_date("in 99999999999999w", today),
            Err(ParseError::InvalidDate("in 99999999999999w".to_string()))
        );
        assert_eq!(parse_due_date("in -2d", today), Ok(Some(date("2024-03-11"))));
    }

    #[test]
    fn end_of_month_in_december_rolls_year() {
        assert_eq!(
            parse_due_date("eom", date("2024-12-05")),
            Ok(Some(date("2024-12-31")))
        );
    }

    #[test]
    fn parse_due_time_forms() {
        assert_eq!(parse_due_time(""), Ok(None));
        assert_eq!(parse_due_time("15:00"), Ok(Some(hm(15, 0))));
        assert_eq!(parse_due_time("09:05"), Ok(Some(hm(9, 5))));
        assert_eq!(parse_due_time("3pm"), Ok(Some(hm(15, 0))));
        assert_eq!(parse_due_time("3:30 PM"), Ok(Some(hm(15, 30))));
        assert_eq!(parse_due_time("12am"), Ok(Some(hm(0, 0))));
        assert_eq!(parse_due_time("12:15pm"), Ok(Some(hm(12, 15))));
        assert!(parse_due_time("25:00").is_err());
        assert!(parse_due_time("13pm").is_err());
        assert!(parse_due_time("noon").is_err());
    }

    #[test]
    fn format_time_12h_matches_en_us() {
        assert_eq!(format_time_12h(hm(15, 0)), "3:00 PM");
        assert_eq!(format_time_12h(hm(0, 7)), "12:07 AM");
        assert_eq!(format_time_12h(hm(12, 30)), "12:30 PM");
    }
}
