//! Display-date derivation.
//!
//! Dates are computed against an explicit [`FixedOffset`] so results never
//! depend on the process time zone or locale.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

use crate::{Error, Result};

/// Asia/Taipei has observed a fixed UTC+8 with no DST since 1979.
pub const DEFAULT_UTC_OFFSET: &str = "+08:00";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format `instant` as `YYYY-MM-DD` in the given offset.
pub fn format_date(instant: DateTime<Utc>, offset: &FixedOffset) -> String {
  instant.with_timezone(offset).format(DATE_FORMAT).to_string()
}

/// Today's date in the given offset.
pub fn today(offset: &FixedOffset) -> String { format_date(Utc::now(), offset) }

/// Accept `YYYY-MM-DD` or `YYYY/MM/DD` (components may be unpadded) and
/// return the canonical zero-padded hyphenated form.
///
/// The year must be exactly four unsigned digits; `%Y` alone would also take
/// signed or five-digit years, which break the fixed-width text ordering.
pub fn normalize_date(input: &str) -> Result<String> {
  let hyphenated = input.trim().replace('/', "-");
  let widths_ok = {
    let mut fields = hyphenated.split('-');
    let digits = |f: Option<&str>, len: std::ops::RangeInclusive<usize>| {
      f.is_some_and(|f| {
        len.contains(&f.len()) && f.bytes().all(|b| b.is_ascii_digit())
      })
    };
    digits(fields.next(), 4..=4)
      && digits(fields.next(), 1..=2)
      && digits(fields.next(), 1..=2)
      && fields.next().is_none()
  };
  if !widths_ok {
    return Err(Error::InvalidDate(input.to_owned()));
  }
  NaiveDate::parse_from_str(&hyphenated, DATE_FORMAT)
    .map(|d| d.format(DATE_FORMAT).to_string())
    .map_err(|_| Error::InvalidDate(input.to_owned()))
}

/// Parse `±HH:MM`, `±HHMM`, `±HH`, `Z`/`UTC`, or the `Asia/Taipei` alias.
pub fn parse_offset(input: &str) -> Result<FixedOffset> {
  let invalid = || Error::InvalidOffset(input.to_owned());
  let s = input.trim();

  let seconds = match s {
    "Z" | "UTC" | "utc" => 0,
    "Asia/Taipei" => 8 * 3600,
    _ => {
      let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return Err(invalid()),
      };
      let digits: String = rest.chars().filter(|c| *c != ':').collect();
      if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
      }
      let (hours, minutes) = match digits.len() {
        2 => (&digits[..2], "0"),
        4 => (&digits[..2], &digits[2..]),
        _ => return Err(invalid()),
      };
      let hours: i32 = hours.parse().map_err(|_| invalid())?;
      let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
      if minutes >= 60 {
        return Err(invalid());
      }
      sign * (hours * 3600 + minutes * 60)
    }
  };

  FixedOffset::east_opt(seconds).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  fn taipei() -> FixedOffset { parse_offset(DEFAULT_UTC_OFFSET).unwrap() }

  #[test]
  fn taipei_rolls_over_before_utc() {
    // 2024-12-31 16:30 UTC is already 2025-01-01 in Taipei.
    let instant = Utc.with_ymd_and_hms(2024, 12, 31, 16, 30, 0).unwrap();
    assert_eq!(format_date(instant, &taipei()), "2025-01-01");
    assert_eq!(
      format_date(instant, &parse_offset("Z").unwrap()),
      "2024-12-31"
    );
  }

  #[test]
  fn format_is_zero_padded() {
    let instant = Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap();
    assert_eq!(format_date(instant, &taipei()), "2025-03-04");
  }

  #[test]
  fn today_has_fixed_shape() {
    let d = today(&taipei());
    assert_eq!(d.len(), 10);
    assert_eq!(&d[4..5], "-");
    assert_eq!(&d[7..8], "-");
  }

  #[test]
  fn slashes_become_hyphens() {
    assert_eq!(normalize_date("2024/05/06").unwrap(), "2024-05-06");
    assert_eq!(normalize_date("2024-5-6").unwrap(), "2024-05-06");
  }

  #[test]
  fn impossible_dates_are_rejected() {
    assert!(normalize_date("2024-02-30").is_err());
    assert!(normalize_date("06/05/2024").is_err());
  }

  #[test]
  fn signed_or_wide_years_are_rejected() {
    assert!(normalize_date("+12345-01-01").is_err());
    assert!(normalize_date("-0001-01-01").is_err());
    assert!(normalize_date("+2024-01-01").is_err());
    assert!(normalize_date("12024-01-01").is_err());
    assert!(normalize_date("2024-001-01").is_err());
    assert!(normalize_date("2024-01-01-").is_err());
    assert_eq!(normalize_date("0999/12/31").unwrap(), "0999-12-31");
  }

  #[test]
  fn offsets_parse_in_several_forms() {
    assert_eq!(parse_offset("+08:00").unwrap().local_minus_utc(), 28_800);
    assert_eq!(parse_offset("+0800").unwrap().local_minus_utc(), 28_800);
    assert_eq!(parse_offset("-05").unwrap().local_minus_utc(), -18_000);
    assert_eq!(parse_offset("+05:30").unwrap().local_minus_utc(), 19_800);
    assert_eq!(parse_offset("Asia/Taipei").unwrap(), taipei());
    assert!(parse_offset("08:00").is_err());
    assert!(parse_offset("+8:0").is_err());
    assert!(parse_offset("+30:00").is_err());
  }
}
