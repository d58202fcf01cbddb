use crate::schedule::Schedule;
use serde_json::Error as SerdeJsonError;
use std::io;
use thiserror::Error;

pub mod file;
mod validation;

pub use file::{load_schedule_from_json, save_schedule_to_json};
pub use validation::ScheduleValidationError;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("serialization error: {0}")]
    Serialization(#[from] SerdeJsonError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<ScheduleValidationError> for PersistenceError {
    fn from(value: ScheduleValidationError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Structural checks a snapshot has to pass before it is written or handed to the report.
pub fn validate_schedule(schedule: &Schedule) -> PersistenceResult<()> {
    validation::validate_schedule_parts(schedule.resources(), schedule.tasks())?;
    Ok(())
}
