use chrono::NaiveDate;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_models::schedule::{Cadence, InfusionSchedule};
use shared_session::Session;

use crate::models::{AnnualSchedule, ScheduleError};
use crate::services::editor::{build_schedule, insert_custom, parse_date, replace_anchor};
use crate::services::sequence::generate_sequence;

pub const DEFAULT_ANNUAL_COUNT: usize = 14;
pub const MAX_ANNUAL_COUNT: usize = 26;

/// A user edit to the stored schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleEdit {
    ReplaceAnchor { index: usize, date: String },
    InsertCustom { date: String },
    Reset,
}

pub struct ScheduleService {
    cadence: Cadence,
    default_anchor: NaiveDate,
}

impl ScheduleService {
    pub fn new(config: &AppConfig) -> Self {
        if config.schedule_count == 0 || config.schedule_interval_days == 0 {
            warn!(
                "Schedule cadence {} x {} days is invalid, clamping to at least 1",
                config.schedule_count, config.schedule_interval_days
            );
        }

        Self {
            cadence: Cadence {
                interval_days: config.schedule_interval_days.max(1),
                count: config.schedule_count.max(1),
            },
            default_anchor: config.schedule_default_anchor,
        }
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    pub fn default_schedule(&self) -> Result<InfusionSchedule, ScheduleError> {
        build_schedule(self.default_anchor, self.cadence)
    }

    /// The session's schedule, created from the default anchor on first view.
    pub fn current(&self, session: &mut Session) -> Result<InfusionSchedule, ScheduleError> {
        if let Some(schedule) = &session.schedule {
            return Ok(schedule.clone());
        }

        let schedule = self.default_schedule()?;
        debug!("Created default schedule for session {}", session.id);
        session.schedule = Some(schedule.clone());
        Ok(schedule)
    }

    /// Apply `edit` to the session's schedule. On error the stored schedule is
    /// left exactly as it was.
    pub fn apply(&self, session: &mut Session, edit: ScheduleEdit) -> Result<InfusionSchedule, ScheduleError> {
        let current = self.current(session)?;

        let updated = match &edit {
            ScheduleEdit::ReplaceAnchor { index, date } => replace_anchor(&current, *index, parse_date(date)?)?,
            ScheduleEdit::InsertCustom { date } => insert_custom(&current, parse_date(date)?)?,
            ScheduleEdit::Reset => self.default_schedule()?,
        };

        info!("Session {} schedule updated: {:?}", session.id, edit);
        session.schedule = Some(updated.clone());
        Ok(updated)
    }

    pub fn annual(&self, count: Option<usize>) -> Result<AnnualSchedule, ScheduleError> {
        let count = count.unwrap_or(DEFAULT_ANNUAL_COUNT);
        if count > MAX_ANNUAL_COUNT {
            return Err(ScheduleError::HorizonTooLong { requested: count, max: MAX_ANNUAL_COUNT });
        }

        Ok(AnnualSchedule {
            anchor: self.default_anchor,
            interval_days: self.cadence.interval_days,
            dates: generate_sequence(self.default_anchor, self.cadence.interval_days, count)?,
        })
    }
}
