use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::context::long_date;
use shared_models::error::AppError;
use shared_models::schedule::InfusionSchedule;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("Appointment index {index} is out of range (schedule has {len} entries)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Schedule starting {anchor} runs past the supported calendar range")]
    OutOfRange { anchor: NaiveDate },

    #[error("Requested {requested} appointments, at most {max} are supported")]
    HorizonTooLong { requested: usize, max: usize },
}

impl From<ScheduleError> for AppError {
    fn from(e: ScheduleError) -> Self {
        AppError::ValidationError(e.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceAnchorRequest {
    pub index: usize,
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsertCustomRequest {
    pub date: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnnualScheduleQuery {
    pub count: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleEntry {
    pub index: usize,
    pub date: NaiveDate,
    pub label: String,
    pub is_custom: bool,
    pub days_since_previous: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleView {
    pub anchor: Option<NaiveDate>,
    pub interval_days: u32,
    pub custom_date: Option<NaiveDate>,
    pub next_infusion: Option<NaiveDate>,
    pub entries: Vec<ScheduleEntry>,
}

impl ScheduleView {
    pub fn new(schedule: &InfusionSchedule, today: NaiveDate) -> Self {
        let entries = schedule
            .entries
            .iter()
            .enumerate()
            .map(|(index, date)| ScheduleEntry {
                index,
                date: *date,
                label: long_date(*date),
                is_custom: schedule.custom_date == Some(*date),
                days_since_previous: index
                    .checked_sub(1)
                    .map(|prev| (*date - schedule.entries[prev]).num_days()),
            })
            .collect();

        Self {
            anchor: schedule.anchor(),
            interval_days: schedule.cadence.interval_days,
            custom_date: schedule.custom_date,
            next_infusion: schedule.next_after(today),
            entries,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnnualSchedule {
    pub anchor: NaiveDate,
    pub interval_days: u32,
    pub dates: Vec<NaiveDate>,
}
