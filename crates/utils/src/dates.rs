//! Calendar helpers shared by booking validation, the dashboard and reports.

use chrono::{Datelike, Months, NaiveDate};

/// Number of nights between check-in and check-out.
pub fn calculate_nights(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Whether two stays overlap. Stays are half-open, so a guest checking out
/// on the day another checks in does not conflict.
pub fn check_date_overlap(
    check_in_1: NaiveDate,
    check_out_1: NaiveDate,
    check_in_2: NaiveDate,
    check_out_2: NaiveDate,
) -> bool {
    check_in_1 < check_out_2 && check_in_2 < check_out_1
}

pub fn calculate_total(nights: i64, price_per_night: f64) -> f64 {
    nights as f64 * price_per_night
}

/// First and last day of a calendar month, `None` for an invalid month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = first.checked_add_months(Months::new(1))?.pred_opt()?;
    Some((first, last))
}

/// The `count` calendar months ending with the month of `today`, oldest first.
pub fn trailing_months(today: NaiveDate, count: u32) -> Vec<(i32, u32)> {
    let Some(current) = today.with_day(1) else {
        return Vec::new();
    };
    (0..count)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .map(|d| (d.year(), d.month()))
        .collect()
}

/// Short label such as `Mar 2025`.
pub fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_default()
}

/// Full month name such as `March`.
pub fn month_name(month: u32) -> String {
    NaiveDate::from_ymd_opt(2000, month, 1)
        .map(|d| d.format("%B").to_string())
        .unwrap_or_default()
}

/// Long date in the resort's locale, e.g. `5 March 2025`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%-d %B %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calculate_nights() {
        assert_eq!(calculate_nights(date(2025, 3, 5), date(2025, 3, 7)), 2);
        assert_eq!(calculate_nights(date(2025, 2, 27), date(2025, 3, 2)), 3);
    }

    #[test]
    fn test_overlap_detects_shared_nights() {
        assert!(check_date_overlap(
            date(2025, 3, 5),
            date(2025, 3, 8),
            date(2025, 3, 7),
            date(2025, 3, 10)
        ));
        // One stay fully inside the other
        assert!(check_date_overlap(
            date(2025, 3, 1),
            date(2025, 3, 10),
            date(2025, 3, 4),
            date(2025, 3, 5)
        ));
    }

    #[test]
    fn test_back_to_back_stays_do_not_overlap() {
        assert!(!check_date_overlap(
            date(2025, 3, 5),
            date(2025, 3, 7),
            date(2025, 3, 7),
            date(2025, 3, 9)
        ));
        assert!(!check_date_overlap(
            date(2025, 3, 7),
            date(2025, 3, 9),
            date(2025, 3, 5),
            date(2025, 3, 7)
        ));
    }

    #[test]
    fn test_calculate_total() {
        assert_eq!(calculate_total(2, 3500.0), 7000.0);
        assert_eq!(calculate_total(0, 3500.0), 0.0);
    }

    #[test]
    fn test_month_bounds_handles_leap_years() {
        assert_eq!(
            month_bounds(2024, 2),
            Some((date(2024, 2, 1), date(2024, 2, 29)))
        );
        assert_eq!(
            month_bounds(2025, 12),
            Some((date(2025, 12, 1), date(2025, 12, 31)))
        );
        assert_eq!(month_bounds(2025, 13), None);
    }

    #[test]
    fn test_trailing_months_crosses_year_boundary() {
        let months = trailing_months(date(2025, 2, 14), 4);
        assert_eq!(months, vec![(2024, 11), (2024, 12), (2025, 1), (2025, 2)]);
        assert_eq!(trailing_months(date(2025, 2, 14), 12).len(), 12);
    }

    #[test]
    fn test_labels() {
        assert_eq!(month_label(2025, 3), "Mar 2025");
        assert_eq!(month_name(11), "November");
        assert_eq!(format_long_date(date(2025, 3, 5)), "5 March 2025");
    }
}
