use chrono::NaiveDate;
use log::warn;
use regex::Regex;

use crate::error::InputError;

const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// The text must match the pattern exactly, name a real calendar day, and format
/// back to the identical string, so `2024-02-30` and `2024-2-01` are both rejected.
pub fn parse_date(text: &str) -> Result<NaiveDate, InputError> {
    let text = text.trim();
    let invalid = || InputError::InvalidDate(text.to_string());

    if !Regex::new(DATE_PATTERN).is_ok_and(|re| re.is_match(text)) {
        return Err(invalid());
    }

    let date = NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| invalid())?;
    if date.format(DATE_FORMAT).to_string() != text {
        return Err(invalid());
    }
    Ok(date)
}

/// Checks that `end` does not fall before `start`.
pub fn check_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), InputError> {
    if end < start {
        return Err(InputError::EndBeforeStart { start, end });
    }
    Ok(())
}

/// Parses a finite decimal number. Zero and negative values are accepted.
pub fn parse_amount(field: &'static str, text: &str) -> Result<f64, InputError> {
    let text = text.trim();
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if value <= 0. {
                warn!("{} {} is not positive", field, value);
            }
            Ok(value)
        }
        _ => Err(InputError::NotANumber {
            field,
            value: text.to_string(),
        }),
    }
}

/// Parses a percentage (`5` for 5%) into an annual fraction (`0.05`).
pub fn parse_percentage(field: &'static str, text: &str) -> Result<f64, InputError> {
    let text = text.trim();
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if value < 0. {
                warn!("{} {}% is negative", field, value);
            }
            Ok(value / 100.)
        }
        _ => Err(InputError::NotANumber {
            field,
            value: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{check_date_range, parse_amount, parse_date, parse_percentage, DATE_FORMAT};
    use crate::error::InputError;
    use chrono::{Days, NaiveDate};
    use test_log::test;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-31"),
            Ok(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
        );
        assert_eq!(
            parse_date(" 2024-02-29\n"),
            Ok(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        );

        for bad in [
            "2024-13-40",
            "not-a-date",
            "2023-02-29",
            "2024-04-31",
            "2024-1-01",
            "24-01-01",
            "2024/01/01",
            "2024-01-01T00:00:00",
            "+2024-01-01",
            "",
        ] {
            assert_eq!(
                parse_date(bad),
                Err(InputError::InvalidDate(bad.to_string())),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_date_round_trip() {
        // leap February plus the US and EU daylight saving changes of 2024
        let starts = [
            NaiveDate::from_ymd_opt(2024, 2, 27).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 30).unwrap(),
            NaiveDate::from_ymd_opt(2024, 10, 26).unwrap(),
            NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(),
        ];

        for start in starts {
            for offset in 0..5 {
                let date = start.checked_add_days(Days::new(offset)).unwrap();
                let text = date.format(DATE_FORMAT).to_string();
                assert_eq!(parse_date(&text), Ok(date));
            }
        }
    }

    #[test]
    fn test_check_date_range() {
        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let second = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        assert_eq!(check_date_range(first, first), Ok(()));
        assert_eq!(check_date_range(first, second), Ok(()));
        assert_eq!(
            check_date_range(second, first),
            Err(InputError::EndBeforeStart {
                start: second,
                end: first
            })
        );
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("amount", "100000"), Ok(100000.));
        assert_eq!(parse_amount("amount", " 2500.50 "), Ok(2500.5));
        assert_eq!(parse_amount("amount", "0"), Ok(0.));
        assert_eq!(parse_amount("amount", "-10"), Ok(-10.));

        for bad in ["", "abc", "12abc", "NaN", "inf"] {
            assert_eq!(
                parse_amount("amount", bad),
                Err(InputError::NotANumber {
                    field: "amount",
                    value: bad.to_string()
                })
            );
        }
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("base rate", "5"), Ok(0.05));
        assert_eq!(parse_percentage("margin", "0"), Ok(0.));
        assert!(parse_percentage("margin", "two").is_err());
        assert!(parse_percentage("margin", "-inf").is_err());
    }
}
