use super::ResourceCapacity;
use crate::config::ReportConfig;
use crate::error::AllocationError;
use crate::interval::ReportInterval;
use crate::source::ScheduleSource;
use std::collections::{BTreeMap, HashMap};

impl ResourceCapacity {
    /// A fully booked resource has one day of effort per working day. More than that is
    /// treated as overtime and becomes the denominator; less leaves an idle remainder and the
    /// denominator stays at the nominal working days.
    pub fn normalize(
        external_id: impl Into<String>,
        resource_id: impl Into<String>,
        name: impl Into<String>,
        allocated_effort: f64,
        working_days: f64,
    ) -> Self {
        let (total_effort_capacity, idle_remainder) = if allocated_effort >= working_days {
            (allocated_effort, 0.0)
        } else {
            (working_days, working_days - allocated_effort)
        };
        Self {
            external_id: external_id.into(),
            resource_id: resource_id.into(),
            name: name.into(),
            allocated_effort,
            total_effort_capacity,
            idle_remainder,
        }
    }
}

/// Result of the capacity pass: one record per tagged resource.
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityPlan {
    working_days: f64,
    records: BTreeMap<String, ResourceCapacity>,
    /// Schedule resource id to external resource id of every accepted resource.
    accepted: HashMap<String, String>,
}

impl CapacityPlan {
    pub fn new(working_days: f64) -> Self {
        Self {
            working_days,
            records: BTreeMap::new(),
            accepted: HashMap::new(),
        }
    }

    /// Record a resource; a later record with the same external id replaces the earlier one.
    pub fn insert(&mut self, record: ResourceCapacity) -> Option<ResourceCapacity> {
        self.accepted
            .insert(record.resource_id.clone(), record.external_id.clone());
        self.records.insert(record.external_id.clone(), record)
    }

    pub fn working_days(&self) -> f64 {
        self.working_days
    }

    pub fn records(&self) -> &BTreeMap<String, ResourceCapacity> {
        &self.records
    }

    pub fn get(&self, external_id: &str) -> Option<&ResourceCapacity> {
        self.records.get(external_id)
    }

    /// External id of an accepted schedule resource, `None` if the pass skipped it.
    pub fn external_id_of(&self, resource_id: &str) -> Option<&str> {
        self.accepted.get(resource_id).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn into_records(self) -> BTreeMap<String, ResourceCapacity> {
        self.records
    }
}

pub struct CapacityPass<'a, S: ScheduleSource + ?Sized> {
    source: &'a S,
    config: &'a ReportConfig,
    interval: ReportInterval,
}

impl<'a, S: ScheduleSource + ?Sized> CapacityPass<'a, S> {
    pub fn new(source: &'a S, config: &'a ReportConfig, interval: ReportInterval) -> Self {
        Self {
            source,
            config,
            interval,
        }
    }

    pub fn execute(&self) -> Result<CapacityPlan, AllocationError> {
        let tag = self.config.tags.resource.as_str();
        let working_days = self.source.working_days(&self.interval);
        let mut plan = CapacityPlan::new(working_days);

        for resource in self.source.resource_list(&self.config.resources) {
            let external_id = match resource.tag(tag) {
                Some(id) if !id.is_empty() => id,
                _ => {
                    tracing::trace!(resource = %resource.id, tag, "resource not tagged, skipped");
                    continue;
                }
            };

            let effort = self
                .source
                .resource_effort(resource, self.config.scenario, &self.interval);
            let record = ResourceCapacity::normalize(
                external_id,
                &resource.id,
                &resource.name,
                effort,
                working_days,
            );
            if let Some(previous) = plan.insert(record) {
                tracing::warn!(
                    external_id,
                    resource = %resource.id,
                    replaced = %previous.resource_id,
                    "two resources share the same external id"
                );
            }
        }

        if plan.is_empty() {
            return Err(AllocationError::NoEligibleResources {
                tag: tag.to_string(),
            });
        }

        tracing::debug!(
            resources = plan.len(),
            working_days,
            interval = %self.interval,
            "resource capacities computed"
        );
        Ok(plan)
    }
}
