use super::{CapacityPlan, ProjectBucket};
use crate::config::ReportConfig;
use crate::error::AllocationError;
use crate::source::ScheduleSource;
use crate::task::Task;
use std::collections::BTreeMap;

/// Buckets produced by [`ProjectGrouping`]; ordinary buckets keep references to their tasks
/// so the allocation pass can query effort per task.
#[derive(Debug)]
pub struct ProjectGroups<'a> {
    buckets: BTreeMap<String, ProjectBucket>,
    members: BTreeMap<String, Vec<&'a Task>>,
}

impl<'a> ProjectGroups<'a> {
    pub fn buckets(&self) -> &BTreeMap<String, ProjectBucket> {
        &self.buckets
    }

    pub fn get(&self, id: &str) -> Option<&ProjectBucket> {
        self.buckets.get(id)
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        BTreeMap<String, ProjectBucket>,
        BTreeMap<String, Vec<&'a Task>>,
    ) {
        (self.buckets, self.members)
    }
}

pub struct ProjectGrouping<'a, S: ScheduleSource + ?Sized> {
    source: &'a S,
    config: &'a ReportConfig,
    capacities: &'a CapacityPlan,
}

impl<'a, S: ScheduleSource + ?Sized> ProjectGrouping<'a, S> {
    pub fn new(source: &'a S, config: &'a ReportConfig, capacities: &'a CapacityPlan) -> Self {
        Self {
            source,
            config,
            capacities,
        }
    }

    pub fn execute(&self) -> Result<ProjectGroups<'a>, AllocationError> {
        let id_tag = self.config.tags.project_id.as_str();
        let name_tag = self.config.tags.project_name.as_str();
        let mut buckets: BTreeMap<String, ProjectBucket> = BTreeMap::new();
        let mut members: BTreeMap<String, Vec<&'a Task>> = BTreeMap::new();
        let source: &'a S = self.source;

        for task in source.task_list(&self.config.tasks) {
            if !self.is_eligible(task) {
                continue;
            }

            // Not every task belongs to an exported project.
            let Some(project_id) = task.tag(id_tag) else {
                tracing::trace!(task = %task.id, "task has no project id, skipped");
                continue;
            };
            if project_id.is_empty() {
                return Err(AllocationError::InvalidProjectTag {
                    task: task.id.clone(),
                    tag: id_tag.to_string(),
                });
            }

            let name = match task.tag(name_tag) {
                Some(name) if !name.is_empty() => name,
                _ => {
                    return Err(AllocationError::MissingProjectName {
                        task: task.id.clone(),
                        tag: name_tag.to_string(),
                    });
                }
            };

            // External projects are identified by an id/name pair, so every task of a
            // project has to agree on the name.
            let bucket = buckets
                .entry(project_id.to_string())
                .or_insert_with(|| ProjectBucket::ordinary(project_id, name));
            if bucket.name != name {
                let first_task = bucket.member_tasks.first().cloned().unwrap_or_default();
                return Err(AllocationError::InconsistentProjectName {
                    project_id: project_id.to_string(),
                    task: task.id.clone(),
                    name: name.to_string(),
                    first_task,
                    first_name: bucket.name.clone(),
                    id_tag: id_tag.to_string(),
                    name_tag: name_tag.to_string(),
                });
            }
            bucket.member_tasks.push(task.id.clone());
            members.entry(project_id.to_string()).or_default().push(task);
        }

        if buckets.is_empty() {
            return Err(AllocationError::NoEligibleTasks {
                id_tag: id_tag.to_string(),
                name_tag: name_tag.to_string(),
            });
        }
        tracing::debug!(projects = buckets.len(), "tasks grouped into projects");

        if let Some(idle) = self.config.idle_bucket() {
            if buckets.contains_key(idle.id) {
                return Err(AllocationError::IdleBucketConflict {
                    id: idle.id.to_string(),
                });
            }
            let bucket = self.idle_bucket(idle.id, idle.name);
            tracing::debug!(
                id = idle.id,
                resources = bucket.resource_sums.len(),
                "idle bucket seeded"
            );
            buckets.insert(idle.id.to_string(), bucket);
        }

        Ok(ProjectGroups { buckets, members })
    }

    /// Only leaf tasks with at least one booking in the active scenario can contribute.
    fn is_eligible(&self, task: &Task) -> bool {
        self.source.is_leaf_task(task)
            && !self
                .source
                .assigned_resources(task, self.config.scenario)
                .is_empty()
    }

    /// Overtime resources get an explicit zero entry.
    fn idle_bucket(&self, id: &str, name: &str) -> ProjectBucket {
        let mut bucket = ProjectBucket::idle(id, name);
        bucket.resource_sums = self
            .capacities
            .records()
            .iter()
            .map(|(external_id, record)| (external_id.clone(), record.idle_remainder))
            .collect();
        bucket
    }
}
