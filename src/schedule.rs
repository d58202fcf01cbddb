use crate::calendar::WorkCalendar;
use crate::interval::ReportInterval;
use crate::metadata::ScheduleMetadata;
use crate::resource::Resource;
use crate::source::{ListFilter, ScheduleSource};
use crate::task::Task;
use std::collections::HashMap;

/// In-memory snapshot of an already scheduled project: resources, tasks with their bookings,
/// and the calendar the bookings are measured against.
///
/// Id lookups and leaf tests are answered from indexes maintained by the `upsert_*` methods.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    metadata: ScheduleMetadata,
    calendar: WorkCalendar,
    resources: Vec<Resource>,
    tasks: Vec<Task>,
    resource_index: HashMap<String, usize>,
    task_index: HashMap<String, usize>,
    /// Number of direct children per parent id.
    resource_children: HashMap<String, usize>,
    task_children: HashMap<String, usize>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_with_metadata(metadata: ScheduleMetadata) -> Self {
        Self {
            metadata,
            ..Self::default()
        }
    }

    pub fn new_with_metadata_and_calendar(
        metadata: ScheduleMetadata,
        calendar: WorkCalendar,
    ) -> Self {
        Self {
            metadata,
            calendar,
            ..Self::default()
        }
    }

    pub fn set_metadata(&mut self, metadata: ScheduleMetadata) {
        self.metadata = metadata;
    }

    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    pub fn set_calendar(&mut self, calendar: WorkCalendar) {
        self.calendar = calendar;
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Insert or replace a resource by id, keeping declaration order.
    pub fn upsert_resource(&mut self, resource: Resource) {
        link_parent(&mut self.resource_children, resource.parent_id.as_deref());
        match self.resource_index.get(&resource.id) {
            Some(&idx) => {
                let previous = std::mem::replace(&mut self.resources[idx], resource);
                unlink_parent(&mut self.resource_children, previous.parent_id.as_deref());
            }
            None => {
                self.resource_index
                    .insert(resource.id.clone(), self.resources.len());
                self.resources.push(resource);
            }
        }
    }

    /// Insert or replace a task by id, keeping declaration order.
    pub fn upsert_task(&mut self, task: Task) {
        link_parent(&mut self.task_children, task.parent_id.as_deref());
        match self.task_index.get(&task.id) {
            Some(&idx) => {
                let previous = std::mem::replace(&mut self.tasks[idx], task);
                unlink_parent(&mut self.task_children, previous.parent_id.as_deref());
            }
            None => {
                self.task_index.insert(task.id.clone(), self.tasks.len());
                self.tasks.push(task);
            }
        }
    }

    pub fn find_resource(&self, id: &str) -> Option<&Resource> {
        self.resource_index.get(id).map(|&idx| &self.resources[idx])
    }

    pub fn find_task(&self, id: &str) -> Option<&Task> {
        self.task_index.get(id).map(|&idx| &self.tasks[idx])
    }

    pub fn is_leaf_resource(&self, resource: &Resource) -> bool {
        !self.resource_children.contains_key(&resource.id)
    }
}

fn link_parent(children: &mut HashMap<String, usize>, parent: Option<&str>) {
    if let Some(parent) = parent {
        *children.entry(parent.to_string()).or_insert(0) += 1;
    }
}

fn unlink_parent(children: &mut HashMap<String, usize>, parent: Option<&str>) {
    let Some(parent) = parent else {
        return;
    };
    if let Some(count) = children.get_mut(parent) {
        *count -= 1;
        if *count == 0 {
            children.remove(parent);
        }
    }
}

impl ScheduleSource for Schedule {
    fn metadata(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    fn resource_list(&self, filter: &ListFilter) -> Vec<&Resource> {
        let leaves = self.resources.iter().filter(|r| self.is_leaf_resource(r));
        filter.apply(leaves, |r| (r.id.as_str(), r.name.as_str()))
    }

    fn task_list(&self, filter: &ListFilter) -> Vec<&Task> {
        filter.apply(&self.tasks, |t| (t.id.as_str(), t.name.as_str()))
    }

    fn is_leaf_task(&self, task: &Task) -> bool {
        !self.task_children.contains_key(&task.id)
    }

    fn assigned_resources(&self, task: &Task, scenario: usize) -> Vec<&Resource> {
        let mut assigned: Vec<&Resource> = Vec::new();
        for assignment in task.assignments_in(scenario) {
            if assigned.iter().any(|r| r.id == assignment.resource_id) {
                continue;
            }
            if let Some(resource) = self.find_resource(&assignment.resource_id) {
                assigned.push(resource);
            }
        }
        assigned
    }

    fn resource_effort(
        &self,
        resource: &Resource,
        scenario: usize,
        interval: &ReportInterval,
    ) -> f64 {
        self.tasks
            .iter()
            .filter(|task| self.is_leaf_task(task))
            .map(|task| self.task_effort(task, resource, scenario, interval))
            .sum()
    }

    fn task_effort(
        &self,
        task: &Task,
        resource: &Resource,
        scenario: usize,
        interval: &ReportInterval,
    ) -> f64 {
        task.assignments_in(scenario)
            .filter(|assignment| assignment.resource_id == resource.id)
            .map(|assignment| assignment.effort_within(&self.calendar, interval))
            .sum()
    }

    fn working_days(&self, interval: &ReportInterval) -> f64 {
        self.calendar.working_days(interval)
    }
}
