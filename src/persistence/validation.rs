use crate::resource::Resource;
use crate::task::Task;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ScheduleValidationError {
    message: String,
}

impl ScheduleValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn validate_resources(resources: &[Resource]) -> Result<(), ScheduleValidationError> {
    let mut seen_ids = HashSet::with_capacity(resources.len());
    for resource in resources {
        if resource.id.trim().is_empty() {
            return Err(ScheduleValidationError::new("resource id may not be empty"));
        }
        if !seen_ids.insert(resource.id.as_str()) {
            return Err(ScheduleValidationError::new(format!(
                "duplicate resource id {}",
                resource.id
            )));
        }
    }
    for resource in resources {
        if let Some(parent) = resource.parent_id.as_deref() {
            if !seen_ids.contains(parent) {
                return Err(ScheduleValidationError::new(format!(
                    "resource {} has unknown parent {}",
                    resource.id, parent
                )));
            }
        }
    }
    Ok(())
}

fn validate_task(
    task: &Task,
    resource_ids: &HashSet<&str>,
) -> Result<(), ScheduleValidationError> {
    for (idx, assignment) in task.assignments.iter().enumerate() {
        if !resource_ids.contains(assignment.resource_id.as_str()) {
            return Err(ScheduleValidationError::new(format!(
                "task {} assignment #{} references unknown resource '{}'",
                task.id, idx, assignment.resource_id
            )));
        }
        if assignment.end < assignment.start {
            return Err(ScheduleValidationError::new(format!(
                "task {} assignment #{} ends {} before it starts {}",
                task.id, idx, assignment.end, assignment.start
            )));
        }
        if !assignment.load.is_finite() || assignment.load < 0.0 {
            return Err(ScheduleValidationError::new(format!(
                "task {} assignment for '{}' has invalid load {}",
                task.id, assignment.resource_id, assignment.load
            )));
        }
    }
    Ok(())
}

pub(super) fn validate_schedule_parts(
    resources: &[Resource],
    tasks: &[Task],
) -> Result<(), ScheduleValidationError> {
    validate_resources(resources)?;
    let resource_ids: HashSet<&str> = resources.iter().map(|r| r.id.as_str()).collect();

    let mut task_ids = HashSet::with_capacity(tasks.len());
    for task in tasks {
        if task.id.trim().is_empty() {
            return Err(ScheduleValidationError::new("task id may not be empty"));
        }
        if !task_ids.insert(task.id.as_str()) {
            return Err(ScheduleValidationError::new(format!(
                "duplicate task id {}",
                task.id
            )));
        }
        validate_task(task, &resource_ids)?;
    }

    let parents: HashSet<&str> = tasks.iter().filter_map(|t| t.parent_id.as_deref()).collect();
    for parent in &parents {
        if !task_ids.contains(parent) {
            return Err(ScheduleValidationError::new(format!(
                "unknown parent task {parent}"
            )));
        }
    }
    // Only leaf tasks carry bookings; container tasks roll up their children.
    for task in tasks {
        if parents.contains(task.id.as_str()) && !task.assignments.is_empty() {
            return Err(ScheduleValidationError::new(format!(
                "task {} has sub tasks and may not have assignments",
                task.id
            )));
        }
    }
    Ok(())
}
