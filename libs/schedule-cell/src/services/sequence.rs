use chrono::{Days, NaiveDate};

use crate::models::ScheduleError;

/// `count` dates starting at `anchor`, each `interval_days` after the last.
/// Day arithmetic goes through chrono so month and year rollover are exact.
pub fn generate_sequence(
    anchor: NaiveDate,
    interval_days: u32,
    count: usize,
) -> Result<Vec<NaiveDate>, ScheduleError> {
    (0..count)
        .map(|i| {
            (i as u64)
                .checked_mul(u64::from(interval_days))
                .and_then(|offset| anchor.checked_add_days(Days::new(offset)))
                .ok_or(ScheduleError::OutOfRange { anchor })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn generates_default_cadence() {
        let dates = generate_sequence(date("2025-10-25"), 28, 6).unwrap();
        let rendered: Vec<String> = dates.iter().map(|d| d.to_string()).collect();

        assert_eq!(
            rendered,
            vec!["2025-10-25", "2025-11-22", "2025-12-20", "2026-01-17", "2026-02-14", "2026-03-14"]
        );
    }

    #[test]
    fn every_entry_is_anchor_plus_multiple_of_interval() {
        for anchor in ["2024-01-31", "2024-02-29", "2023-12-31", "2025-03-01"] {
            let anchor = date(anchor);
            let dates = generate_sequence(anchor, 28, 6).unwrap();
            for (i, d) in dates.iter().enumerate() {
                assert_eq!((*d - anchor).num_days(), 28 * i as i64);
            }
        }
    }

    #[test]
    fn handles_leap_day_rollover() {
        let dates = generate_sequence(date("2024-02-01"), 28, 2).unwrap();
        assert_eq!(dates[1], date("2024-02-29"));
    }

    #[test]
    fn zero_count_is_empty() {
        assert!(generate_sequence(date("2025-10-25"), 28, 0).unwrap().is_empty());
    }

    #[test]
    fn reports_dates_past_calendar_range() {
        assert_matches!(
            generate_sequence(NaiveDate::MAX, 28, 2),
            Err(ScheduleError::OutOfRange { .. })
        );
    }
}
