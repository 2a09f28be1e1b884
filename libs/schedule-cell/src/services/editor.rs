use chrono::NaiveDate;

use shared_models::schedule::{Cadence, InfusionSchedule};

use crate::models::ScheduleError;
use crate::services::sequence::generate_sequence;

pub fn parse_date(input: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| ScheduleError::InvalidDate {
        input: input.to_string(),
    })
}

pub fn build_schedule(anchor: NaiveDate, cadence: Cadence) -> Result<InfusionSchedule, ScheduleError> {
    Ok(InfusionSchedule {
        entries: generate_sequence(anchor, cadence.interval_days, cadence.count)?,
        cadence,
        custom_date: None,
    })
}

/// Make `new_date` the anchor and regenerate the whole sequence from it.
/// `index` must name an existing entry.
pub fn replace_anchor(
    schedule: &InfusionSchedule,
    index: usize,
    new_date: NaiveDate,
) -> Result<InfusionSchedule, ScheduleError> {
    if index >= schedule.len() {
        return Err(ScheduleError::IndexOutOfRange { index, len: schedule.len() });
    }

    let cadence = Cadence { count: schedule.len(), ..schedule.cadence };
    build_schedule(new_date, cadence)
}

/// Keep the entries strictly before `custom_date`, insert it, then resume the
/// cadence from it until the schedule is full again.
pub fn insert_custom(
    schedule: &InfusionSchedule,
    custom_date: NaiveDate,
) -> Result<InfusionSchedule, ScheduleError> {
    let count = schedule.cadence.count;
    if count == 0 {
        return Ok(schedule.clone());
    }

    // At most count - 1 kept so the custom date always survives truncation.
    let kept: Vec<NaiveDate> = schedule
        .entries
        .iter()
        .copied()
        .filter(|d| *d < custom_date)
        .take(count - 1)
        .collect();

    let tail = generate_sequence(custom_date, schedule.cadence.interval_days, count - kept.len())?;

    let mut entries = kept;
    entries.extend(tail);

    Ok(InfusionSchedule {
        entries,
        cadence: schedule.cadence,
        custom_date: Some(custom_date),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn default_schedule() -> InfusionSchedule {
        build_schedule(date("2025-10-25"), Cadence::default()).unwrap()
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_matches!(parse_date("25/10/2025"), Err(ScheduleError::InvalidDate { .. }));
        assert_matches!(parse_date("2025-02-30"), Err(ScheduleError::InvalidDate { .. }));
        assert_eq!(parse_date(" 2025-10-25 ").unwrap(), date("2025-10-25"));
    }

    #[test]
    fn replace_anchor_regenerates_from_new_date() {
        let updated = replace_anchor(&default_schedule(), 3, date("2025-12-01")).unwrap();

        assert_eq!(updated.len(), 6);
        assert_eq!(updated.anchor(), Some(date("2025-12-01")));
        assert!(updated.entries.iter().all(|d| *d >= date("2025-12-01")));
        assert_eq!(updated.custom_date, None);
    }

    #[test]
    fn replace_anchor_validates_index() {
        assert_matches!(
            replace_anchor(&default_schedule(), 6, date("2025-12-01")),
            Err(ScheduleError::IndexOutOfRange { index: 6, len: 6 })
        );
    }

    #[test]
    fn insert_custom_before_everything_restarts_cadence() {
        let updated = insert_custom(&default_schedule(), date("2025-10-01")).unwrap();
        let expected = build_schedule(date("2025-10-01"), Cadence::default()).unwrap();

        assert_eq!(updated.entries, expected.entries);
        assert_eq!(updated.custom_date, Some(date("2025-10-01")));
    }

    #[test]
    fn insert_custom_after_everything_keeps_custom_date() {
        let updated = insert_custom(&default_schedule(), date("2026-06-01")).unwrap();

        assert_eq!(updated.len(), 6);
        assert_eq!(updated.entries[5], date("2026-06-01"));
        assert_eq!(updated.entries[..5], default_schedule().entries[..5]);
    }

    #[test]
    fn insert_custom_on_existing_date_is_not_duplicated() {
        let updated = insert_custom(&default_schedule(), date("2025-12-20")).unwrap();

        assert_eq!(updated.entries.iter().filter(|d| **d == date("2025-12-20")).count(), 1);
        assert_eq!(updated.entries, default_schedule().entries);
    }
}
