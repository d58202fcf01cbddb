use crate::calendar::WorkCalendar;
use crate::interval::ReportInterval;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A person, team or piece of equipment that can be booked onto tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Schedule-local identifier.
    pub id: String,
    pub name: String,
    /// Enclosing resource group, if any. Groups never carry bookings themselves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// User-defined attributes, e.g. the identifier of the resource in an external system.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, String>,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
            custom: BTreeMap::new(),
        }
    }

    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(name.into(), value.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Custom attribute lookup. `None` means the tag is not set, which is not the same as set to "".
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.custom.get(name).map(String::as_str)
    }
}

/// Booking of a resource onto a task for an inclusive date range in one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub resource_id: String,
    #[serde(default)]
    pub scenario: usize,
    pub start: NaiveDate,
    /// Last booked day, inclusive.
    pub end: NaiveDate,
    /// Fraction of each working day booked. 1.0 is a full day, 0.5 half a day.
    #[serde(default = "default_load")]
    pub load: f64,
}

fn default_load() -> f64 {
    1.0
}

impl Assignment {
    pub fn new(resource_id: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            resource_id: resource_id.into(),
            scenario: 0,
            start,
            end,
            load: default_load(),
        }
    }

    pub fn with_load(mut self, load: f64) -> Self {
        self.load = load;
        self
    }

    pub fn in_scenario(mut self, scenario: usize) -> Self {
        self.scenario = scenario;
        self
    }

    /// Effort in days booked inside `interval`.
    pub fn effort_within(&self, calendar: &WorkCalendar, interval: &ReportInterval) -> f64 {
        match interval.clamp(self.start, self.end) {
            Some((from, to)) => self.load * calendar.count_working_days(from, to) as f64,
            None => 0.0,
        }
    }
}
