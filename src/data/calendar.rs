//! Month labels in calendar order.

use chrono::{Datelike, Month, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar month of a date.
pub fn month_of(date: NaiveDate) -> Month {
    // month() is always 1..=12
    Month::try_from(date.month() as u8).unwrap_or(Month::January)
}

/// Three-letter label, e.g. "Jan".
pub fn abbreviation(month: Month) -> &'static str {
    MONTH_ABBREVIATIONS[month.number_from_month() as usize - 1]
}

/// Index 0..12 of a month in calendar order.
pub fn calendar_index(month: Month) -> usize {
    month.number_from_month() as usize - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_match_chrono() {
        for (i, name) in MONTH_NAMES.iter().enumerate() {
            let month = Month::try_from(i as u8 + 1).unwrap();
            assert_eq!(month.name(), *name);
            assert_eq!(calendar_index(month), i);
        }
    }

    #[test]
    fn test_abbreviation_matches_strftime() {
        let date = NaiveDate::from_ymd_opt(2017, 9, 14).unwrap();
        assert_eq!(abbreviation(month_of(date)), date.format("%b").to_string());
        assert_eq!(abbreviation(month_of(date)), "Sep");
    }
}
