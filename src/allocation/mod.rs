//! Allocation aggregation: turns per-task, per-resource effort into the fraction of each
//! resource's capacity spent on every external project.
//!
//! The passes run strictly in order and hand immutable results forward:
//!
//! 1. [`CapacityPass`] computes the capacity of every tagged resource.
//! 2. [`ProjectGrouping`] buckets tasks by external project and seeds the idle bucket.
//! 3. [`AllocationPass`] sums booked effort into the buckets.
//!
//! [`AllocationTable`] is the read-only result handed to the renderers.

pub mod accumulate;
pub mod capacity;
pub mod frame;
pub mod grouping;
pub mod table;

pub use accumulate::AllocationPass;
pub use capacity::{CapacityPass, CapacityPlan};
pub use grouping::{ProjectGrouping, ProjectGroups};
pub use table::AllocationTable;

use serde::Serialize;
use std::collections::BTreeMap;

/// Capacity of one resource over the reporting interval, keyed by its external id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceCapacity {
    pub external_id: String,
    /// Schedule-local id of the resource.
    pub resource_id: String,
    pub name: String,
    /// Effort actually booked in the interval, in days.
    pub allocated_effort: f64,
    /// Denominator for fractions: the larger of booked effort and working days.
    pub total_effort_capacity: f64,
    /// Working days not covered by bookings; zero for overtime.
    pub idle_remainder: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    /// Filled from the bookings of its member tasks.
    Ordinary,
    /// Seeded from the idle remainder of every resource; has no member tasks.
    Idle,
}

/// One external project and the effort each resource spent on it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectBucket {
    pub id: String,
    pub name: String,
    pub kind: BucketKind,
    /// Ids of the tasks grouped into this bucket, in task list order.
    pub member_tasks: Vec<String>,
    /// External resource id to accumulated effort in days.
    pub resource_sums: BTreeMap<String, f64>,
}

impl ProjectBucket {
    pub fn ordinary(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: BucketKind::Ordinary,
            member_tasks: Vec::new(),
            resource_sums: BTreeMap::new(),
        }
    }

    pub fn idle(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: BucketKind::Idle,
            ..Self::ordinary(id, name)
        }
    }

    pub fn is_idle(&self) -> bool {
        self.kind == BucketKind::Idle
    }

    pub fn sum(&self, external_resource_id: &str) -> Option<f64> {
        self.resource_sums.get(external_resource_id).copied()
    }
}
