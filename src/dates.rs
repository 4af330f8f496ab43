//! Calendar-month date range helper.
//!
//! Both the arrears reconciliation queries and the monthly balance use the
//! same inclusive [first day, last day] range for a (year, month) pair;
//! keeping the construction in one place keeps their conventions identical.

use chrono::NaiveDate;

use crate::error::AppError;

/// Inclusive calendar-month range for a (year, month) pair.
///
/// Returns `(first_day, last_day)`. A payment dated exactly on either bound
/// belongs to the month.
///
/// # Errors
///
/// Returns `InvalidRequest` if the month is outside 1-12 or the year is out
/// of chrono's representable range.
pub fn month_range(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), AppError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::InvalidRequest(format!("invalid year/month: {year}-{month}")))?;

    // Last day = first day of the following month minus one day.
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| AppError::InvalidRequest(format!("invalid year/month: {year}-{month}")))?
        .pred_opt()
        .ok_or_else(|| AppError::InvalidRequest(format!("invalid year/month: {year}-{month}")))?;

    Ok((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn thirty_one_day_month() {
        let (first, last) = month_range(2025, 3).unwrap();
        assert_eq!(first, ymd(2025, 3, 1));
        assert_eq!(last, ymd(2025, 3, 31));
    }

    #[test]
    fn thirty_day_month() {
        let (first, last) = month_range(2025, 4).unwrap();
        assert_eq!(first, ymd(2025, 4, 1));
        assert_eq!(last, ymd(2025, 4, 30));
    }

    #[test]
    fn leap_february() {
        let (_, last) = month_range(2024, 2).unwrap();
        assert_eq!(last, ymd(2024, 2, 29));

        let (_, last) = month_range(2025, 2).unwrap();
        assert_eq!(last, ymd(2025, 2, 28));
    }

    #[test]
    fn december_wraps_into_next_year() {
        let (first, last) = month_range(2025, 12).unwrap();
        assert_eq!(first, ymd(2025, 12, 1));
        assert_eq!(last, ymd(2025, 12, 31));
    }

    #[test]
    fn invalid_month_rejected() {
        assert!(month_range(2025, 0).is_err());
        assert!(month_range(2025, 13).is_err());
    }
}
