use super::{BucketKind, CapacityPlan, ProjectBucket, ProjectGroups};
use crate::interval::ReportInterval;
use crate::source::ScheduleSource;
use std::collections::BTreeMap;

pub struct AllocationPass<'a, S: ScheduleSource + ?Sized> {
    source: &'a S,
    capacities: &'a CapacityPlan,
    interval: ReportInterval,
    scenario: usize,
}

impl<'a, S: ScheduleSource + ?Sized> AllocationPass<'a, S> {
    pub fn new(
        source: &'a S,
        capacities: &'a CapacityPlan,
        interval: ReportInterval,
        scenario: usize,
    ) -> Self {
        Self {
            source,
            capacities,
            interval,
            scenario,
        }
    }

    /// Sum the effort of every accepted resource into the buckets of the tasks it works on.
    pub fn execute(&self, groups: ProjectGroups<'_>) -> BTreeMap<String, ProjectBucket> {
        let (mut buckets, members) = groups.into_parts();

        for bucket in buckets.values_mut() {
            match bucket.kind {
                BucketKind::Idle => continue,
                BucketKind::Ordinary => {}
            }
            let Some(tasks) = members.get(&bucket.id) else {
                continue;
            };

            for task in tasks {
                for resource in self.source.assigned_resources(task, self.scenario) {
                    let Some(external_id) = self.capacities.external_id_of(&resource.id) else {
                        tracing::trace!(
                            task = %task.id,
                            resource = %resource.id,
                            "resource not part of the report, skipped"
                        );
                        continue;
                    };

                    let work =
                        self.source
                            .task_effort(task, resource, self.scenario, &self.interval);
                    // No record for resources that did not work on the task in the interval.
                    if work <= 0.0 {
                        continue;
                    }
                    *bucket
                        .resource_sums
                        .entry(external_id.to_string())
                        .or_insert(0.0) += work;
                }
            }
        }

        tracing::debug!(
            entries = buckets.values().map(|b| b.resource_sums.len()).sum::<usize>(),
            "project allocations accumulated"
        );
        buckets
    }
}
