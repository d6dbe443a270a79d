/// Utilities for date formatting
///
/// Даты приходят кортежем `[y, m, d]`; в таблицах показываем их одинаково
use chrono::NaiveDate;
use contracts::shared::date_tuple::DateTuple;

const DISPLAY_FORMAT: &str = "%d %b %Y";

/// Example: `[2024, 3, 5]` -> "05 Mar 2024"
pub fn format_date(date: &DateTuple) -> String {
    date.as_naive().format(DISPLAY_FORMAT).to_string()
}

/// Same as [`format_date`] for an ISO date or datetime string.
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "15 Mar 2024"
///
/// Unparsable input is returned unchanged.
pub fn format_iso_date(value: &str) -> String {
    let date_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(date_part.trim(), "%Y-%m-%d")
        .map(|d| d.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        let date = DateTuple::from_parts(2024, 3, 5).unwrap();
        assert_eq!(format_date(&date), "05 Mar 2024");
    }

    #[test]
    fn test_format_iso_date() {
        assert_eq!(format_iso_date("2024-12-31"), "31 Dec 2024");
        assert_eq!(format_iso_date("2024-03-15T14:02:26.123Z"), "15 Mar 2024");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_iso_date("invalid"), "invalid");
        assert_eq!(format_iso_date(""), "");
        assert_eq!(format_iso_date("2024-02-30"), "2024-02-30");
    }
}
