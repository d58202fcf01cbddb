use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    pub project_name: String,
    #[serde(default)]
    pub project_id: String,
    /// Status date of the snapshot; printed in rendered report headers.
    pub now: NaiveDate,
}

impl Default for ScheduleMetadata {
    fn default() -> Self {
        Self {
            project_name: "New Project".to_string(),
            project_id: String::new(),
            now: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
        }
    }
}
