//! Sermon date handling.
//!
//! Dates are stored as ISO `YYYY-MM-DD`. Older notes used free-text dates
//! with `/`, `\` or `-` delimiters in whatever order the author preferred;
//! [`parse_legacy_date`] reads those on import, refusing to guess when the
//! components do not identify the year.

use crate::config::DateConfig;
use crate::error::{Result, SermonError};
use crate::schema::{Field, FieldKind, RecordDraft};
use chrono::NaiveDate;
use tracing::warn;

const DELIMITERS: [char; 3] = ['/', '\\', '-'];

/// Normalize a user-supplied date to the stored format.
///
/// Empty input stays empty. ISO dates pass through; anything else goes
/// through [`parse_legacy_date`].
pub fn normalize_date(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(String::new());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DateConfig::STORAGE_FORMAT) {
        // Only accept four-digit years here; "20-05-04" is a legacy date.
        if trimmed.split('-').next().map(str::len) == Some(4) {
            return Ok(format_date(date));
        }
    }

    parse_legacy_date(trimmed).map(format_date)
}

/// Normalize every date field of a draft without failing.
///
/// Dates that cannot be read are cleared and kept in research as
/// `Label: raw`. Returns the number of dates moved.
pub fn settle_dates(draft: &mut RecordDraft) -> usize {
    let mut moved = 0;
    for field in Field::ALL.iter().filter(|f| f.kind() == FieldKind::Date) {
        let raw = draft.get(*field).to_string();
        match normalize_date(&raw) {
            Ok(date) => draft.set(*field, date),
            Err(e) => {
                warn!("Keeping unreadable date '{}' in research: {}", raw, e);
                draft.set(*field, "");
                draft.append(Field::Research, &format!("{}: {}", field.label(), raw.trim()));
                moved += 1;
            }
        }
    }
    moved
}

/// Render a date in the stored format.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DateConfig::STORAGE_FORMAT).to_string()
}

/// Parse a legacy three-component date.
///
/// - first component > 31: year-month-day
/// - third component > 31: month-day-year
/// - neither: ambiguous, rejected
pub fn parse_legacy_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    let invalid = |reason: &str| SermonError::InvalidDate {
        input: trimmed.to_string(),
        reason: reason.to_string(),
    };

    let delimiter = DELIMITERS
        .iter()
        .copied()
        .find(|d| trimmed.contains(*d))
        .ok_or_else(|| invalid("expected '/', '\\' or '-' between components"))?;

    let parts: Vec<&str> = trimmed.split(delimiter).map(str::trim).collect();
    if parts.len() != 3 {
        return Err(invalid("expected three components"));
    }

    let mut nums = [0u32; 3];
    for (slot, part) in nums.iter_mut().zip(&parts) {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("components must be numeric"));
        }
        *slot = part
            .parse()
            .map_err(|_| invalid("component out of range"))?;
    }

    let (year, month, day) = if nums[0] > 31 {
        (expand_year(nums[0], parts[0].len()), nums[1], nums[2])
    } else if nums[2] > 31 {
        (expand_year(nums[2], parts[2].len()), nums[0], nums[1])
    } else {
        return Err(SermonError::AmbiguousDate {
            input: trimmed.to_string(),
        });
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid("not a calendar date"))
}

/// Two-digit years are pinned to a century by [`DateConfig::TWO_DIGIT_YEAR_PIVOT`].
fn expand_year(value: u32, digits: usize) -> i32 {
    let value = value as i32;
    if digits > 2 {
        value
    } else if value < DateConfig::TWO_DIGIT_YEAR_PIVOT {
        2000 + value
    } else {
        1900 + value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_passthrough() {
        assert_eq!(normalize_date("2024-03-31").unwrap(), "2024-03-31");
        assert_eq!(normalize_date("  ").unwrap(), "");
    }

    #[test]
    fn test_year_first() {
        assert_eq!(parse_legacy_date("2023/12/25").unwrap(), ymd(2023, 12, 25));
        assert_eq!(parse_legacy_date("2023\\4\\9").unwrap(), ymd(2023, 4, 9));
        assert_eq!(parse_legacy_date("98-05-04").unwrap(), ymd(1998, 5, 4));
    }

    #[test]
    fn test_year_last_is_month_first() {
        assert_eq!(parse_legacy_date("12/25/2023").unwrap(), ymd(2023, 12, 25));
        assert_eq!(parse_legacy_date("4-9-2023").unwrap(), ymd(2023, 4, 9));
        assert_eq!(normalize_date("3\\31\\99").unwrap(), "1999-03-31");
    }

    #[test]
    fn test_ambiguous_rejected() {
        assert!(matches!(
            parse_legacy_date("05-04-20"),
            Err(SermonError::AmbiguousDate { .. })
        ));
        assert!(matches!(
            normalize_date("1/2/3"),
            Err(SermonError::AmbiguousDate { .. })
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            parse_legacy_date("Easter 2023"),
            Err(SermonError::InvalidDate { .. })
        ));
        assert!(matches!(
            parse_legacy_date("2023/13/01"),
            Err(SermonError::InvalidDate { .. })
        ));
        assert!(matches!(
            parse_legacy_date("2023/1"),
            Err(SermonError::InvalidDate { .. })
        ));
        assert!(matches!(
            parse_legacy_date("2023/x/1"),
            Err(SermonError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_settle_dates() {
        let mut draft = RecordDraft::new().with(Field::SermonDate, "12/25/2023");
        assert_eq!(settle_dates(&mut draft), 0);
        assert_eq!(draft.get(Field::SermonDate), "2023-12-25");

        let mut draft = RecordDraft::new()
            .with(Field::SermonDate, "05-04-20")
            .with(Field::Research, "Calvin on Eph 2");
        assert_eq!(settle_dates(&mut draft), 1);
        assert_eq!(draft.get(Field::SermonDate), "");
        assert_eq!(draft.get(Field::Research), "Calvin on Eph 2\n\nDate: 05-04-20");
    }
}
