//! Derived experience duration ("2 years 3 months").

use chrono::NaiveDate;

const DAYS_PER_YEAR: i64 = 365;
const DAYS_PER_MONTH: i64 = 30;

/// Parses `YYYY-MM-DD`, or `YYYY-MM` as the first of that month.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok())
}

/// Computes the display duration of an experience entry.
///
/// Returns an empty string when the start date is missing, when there is no
/// end date and the job is not current, or when a date cannot be parsed.
/// The day span is converted with 365-day years and 30-day months.
pub fn calculate_duration(
    start_date: &str,
    end_date: &str,
    is_current_job: bool,
    today: NaiveDate,
) -> String {
    if start_date.trim().is_empty() {
        return String::new();
    }
    if end_date.trim().is_empty() && !is_current_job {
        return String::new();
    }

    let Some(start) = parse_date(start_date) else {
        return String::new();
    };
    let end = if is_current_job {
        today
    } else {
        match parse_date(end_date) {
            Some(d) => d,
            None => return String::new(),
        }
    };

    let days = (end - start).num_days().abs();
    let years = days / DAYS_PER_YEAR;
    let months = (days % DAYS_PER_YEAR) / DAYS_PER_MONTH;

    match (years, months) {
        (0, 0) => "Less than a month".to_string(),
        (y, 0) => plural(y, "year"),
        (0, m) => plural(m, "month"),
        (y, m) => format!("{} {}", plural(y, "year"), plural(m, "month")),
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_missing_start_is_empty() {
        assert_eq!(calculate_duration("", "2024-01-01", false, today()), "");
    }

    #[test]
    fn test_missing_end_without_current_is_empty() {
        assert_eq!(calculate_duration("2020-01-01", "", false, today()), "");
    }

    #[test]
    fn test_unparseable_date_is_empty() {
        assert_eq!(calculate_duration("last spring", "2024-01-01", false, today()), "");
    }

    #[test]
    fn test_years_and_months() {
        // 2020-01-01 → 2022-04-01 is 821 days: 2 years, 91 days → 3 months
        assert_eq!(
            calculate_duration("2020-01-01", "2022-04-01", false, today()),
            "2 years 3 months"
        );
    }

    #[test]
    fn test_single_year_is_singular() {
        assert_eq!(
            calculate_duration("2021-01-01", "2022-01-01", false, today()),
            "1 year"
        );
    }

    #[test]
    fn test_months_only() {
        assert_eq!(
            calculate_duration("2024-01-01", "2024-03-05", false, today()),
            "2 months"
        );
        assert_eq!(
            calculate_duration("2024-01-01", "2024-02-05", false, today()),
            "1 month"
        );
    }

    #[test]
    fn test_less_than_a_month() {
        assert_eq!(
            calculate_duration("2024-01-01", "2024-01-20", false, today()),
            "Less than a month"
        );
    }

    #[test]
    fn test_current_job_runs_until_today() {
        // 2023-06-01 → 2024-06-01 is 366 days (leap year)
        assert_eq!(calculate_duration("2023-06-01", "", true, today()), "1 year");
    }

    #[test]
    fn test_current_job_ignores_end_date() {
        assert_eq!(
            calculate_duration("2023-06-01", "2023-07-01", true, today()),
            "1 year"
        );
    }

    #[test]
    fn test_reversed_dates_use_absolute_span() {
        assert_eq!(
            calculate_duration("2022-01-01", "2021-01-01", false, today()),
            "1 year"
        );
    }

    #[test]
    fn test_month_precision_dates() {
        assert_eq!(parse_date("2022-03"), NaiveDate::from_ymd_opt(2022, 3, 1));
        assert_eq!(
            calculate_duration("2022-01", "2022-07", false, today()),
            "6 months"
        );
    }
}
