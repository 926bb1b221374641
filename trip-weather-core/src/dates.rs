//! Calendar-date expansion for trip spans and historical years.

use chrono::NaiveDate;
use std::ops::Range;

/// Every calendar date from `start` through `end`, inclusive, ascending.
///
/// Contract: if `start > end` the result is empty — not an error — so an
/// inverted range propagates safely into "no historical data" downstream.
pub fn expand_trip_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|day| *day <= end).collect()
}

/// `target` with its year replaced by each year in `years`, month and day
/// preserved, ascending.
///
/// Leap-day policy: if `target` is February 29 and a substituted year is not
/// a leap year, that year is skipped (`with_year` yields no valid date) and
/// the expansion continues with the remaining years.
pub fn expand_historical_years(target: NaiveDate, years: Range<i32>) -> Vec<NaiveDate> {
    use chrono::Datelike;

    years.filter_map(|year| target.with_year(year)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn trip_range_is_inclusive_sorted_and_duplicate_free() {
        let dates = expand_trip_range(date(2024, 6, 10), date(2024, 6, 14));

        assert_eq!(dates.len(), 5);
        assert_eq!(dates.first(), Some(&date(2024, 6, 10)));
        assert_eq!(dates.last(), Some(&date(2024, 6, 14)));
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn trip_range_crosses_month_boundary() {
        let dates = expand_trip_range(date(2024, 1, 30), date(2024, 2, 2));
        assert_eq!(
            dates,
            vec![date(2024, 1, 30), date(2024, 1, 31), date(2024, 2, 1), date(2024, 2, 2)]
        );
    }

    #[test]
    fn single_day_trip_yields_one_date() {
        let dates = expand_trip_range(date(2024, 6, 10), date(2024, 6, 10));
        assert_eq!(dates, vec![date(2024, 6, 10)]);
    }

    #[test]
    fn inverted_range_yields_empty() {
        let dates = expand_trip_range(date(2024, 6, 14), date(2024, 6, 10));
        assert!(dates.is_empty());
    }

    #[test]
    fn historical_years_preserve_month_and_day() {
        let dates = expand_historical_years(date(2024, 6, 10), 2015..2024);

        assert_eq!(dates.len(), 9);
        for (offset, historical) in dates.iter().enumerate() {
            assert_eq!(historical.year(), 2015 + offset as i32);
            assert_eq!(historical.month(), 6);
            assert_eq!(historical.day(), 10);
        }
    }

    #[test]
    fn historical_years_are_strictly_increasing() {
        let dates = expand_historical_years(date(2024, 3, 1), 2015..2024);
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn leap_day_skips_non_leap_years() {
        let dates = expand_historical_years(date(2024, 2, 29), 2015..2023);

        // Only 2016 and 2020 have a February 29 in that window.
        assert_eq!(dates, vec![date(2016, 2, 29), date(2020, 2, 29)]);
    }

    #[test]
    fn empty_year_range_yields_empty() {
        let dates = expand_historical_years(date(2024, 6, 10), 2024..2024);
        assert!(dates.is_empty());
    }
}
