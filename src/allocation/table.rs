use super::{ProjectBucket, ResourceCapacity};
use crate::interval::ReportInterval;
use std::collections::BTreeMap;

/// Result of a report run: fractions of resource capacity per external project.
///
/// Only the capacities and the bucket sums are stored; every fraction and total is derived on
/// request. Bucket and resource ids iterate in lexicographic order.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationTable {
    interval: ReportInterval,
    working_days: f64,
    capacities: BTreeMap<String, ResourceCapacity>,
    buckets: BTreeMap<String, ProjectBucket>,
}

impl AllocationTable {
    pub fn new(
        interval: ReportInterval,
        working_days: f64,
        capacities: BTreeMap<String, ResourceCapacity>,
        buckets: BTreeMap<String, ProjectBucket>,
    ) -> Self {
        Self {
            interval,
            working_days,
            capacities,
            buckets,
        }
    }

    pub fn interval(&self) -> &ReportInterval {
        &self.interval
    }

    pub fn working_days(&self) -> f64 {
        self.working_days
    }

    pub fn bucket_ids(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub fn buckets(&self) -> impl Iterator<Item = &ProjectBucket> {
        self.buckets.values()
    }

    pub fn bucket(&self, id: &str) -> Option<&ProjectBucket> {
        self.buckets.get(id)
    }

    pub fn resource_ids(&self) -> impl Iterator<Item = &str> {
        self.capacities.keys().map(String::as_str)
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourceCapacity> {
        self.capacities.values()
    }

    pub fn capacity(&self, resource_id: &str) -> Option<&ResourceCapacity> {
        self.capacities.get(resource_id)
    }

    /// Share of `resource_id`'s capacity spent on `bucket_id`; 0.0 for unknown pairs.
    pub fn fraction(&self, bucket_id: &str, resource_id: &str) -> f64 {
        let Some(sum) = self.buckets.get(bucket_id).and_then(|b| b.sum(resource_id)) else {
            return 0.0;
        };
        match self.capacities.get(resource_id) {
            Some(capacity) if capacity.total_effort_capacity > 0.0 => {
                sum / capacity.total_effort_capacity
            }
            _ => 0.0,
        }
    }

    pub fn resource_total(&self, resource_id: &str) -> f64 {
        self.buckets
            .keys()
            .map(|bucket_id| self.fraction(bucket_id, resource_id))
            .sum()
    }

    pub fn bucket_total(&self, bucket_id: &str) -> f64 {
        self.capacities
            .keys()
            .map(|resource_id| self.fraction(bucket_id, resource_id))
            .sum()
    }

    pub fn grand_total(&self) -> f64 {
        self.buckets
            .keys()
            .map(|bucket_id| self.bucket_total(bucket_id))
            .sum()
    }
}
