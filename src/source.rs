//! Read-only query surface the allocation engine consumes.
//!
//! The engine never walks schedule internals directly; it asks a [`ScheduleSource`] for
//! pre-filtered resource and task lists and for effort figures over a reporting interval.

use crate::interval::ReportInterval;
use crate::metadata::ScheduleMetadata;
use crate::resource::Resource;
use crate::task::Task;
use serde::{Deserialize, Serialize};

pub trait ScheduleSource {
    fn metadata(&self) -> &ScheduleMetadata;

    /// Leaf resources admitted by `filter`, in the filter's sort order.
    fn resource_list(&self, filter: &ListFilter) -> Vec<&Resource>;

    /// Tasks admitted by `filter`, in the filter's sort order.
    fn task_list(&self, filter: &ListFilter) -> Vec<&Task>;

    fn is_leaf_task(&self, task: &Task) -> bool;

    /// Distinct resources booked on `task` in `scenario`, in booking order.
    fn assigned_resources(&self, task: &Task, scenario: usize) -> Vec<&Resource>;

    /// Total effort in days `resource` is booked for during `interval`.
    fn resource_effort(&self, resource: &Resource, scenario: usize, interval: &ReportInterval)
    -> f64;

    /// Effort in days `resource` contributes to `task` during `interval`.
    fn task_effort(
        &self,
        task: &Task,
        resource: &Resource,
        scenario: usize,
        interval: &ReportInterval,
    ) -> f64;

    /// Nominal working days in `interval`.
    fn working_days(&self, interval: &ReportInterval) -> f64;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Keep the order in which entities were declared in the schedule.
    #[default]
    Declared,
    Id,
    Name,
}

/// Include/exclude lists plus ordering for resource or task lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListFilter {
    /// When non-empty, only these ids are admitted.
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub sort: SortOrder,
}

impl ListFilter {
    pub fn admits(&self, id: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|i| i == id);
        included && !self.exclude.iter().any(|e| e == id)
    }

    /// Filter and sort `items`; `key` yields `(id, name)` of an item.
    pub fn apply<'a, T, I, F>(&self, items: I, key: F) -> Vec<&'a T>
    where
        I: IntoIterator<Item = &'a T>,
        F: Fn(&T) -> (&str, &str),
    {
        let mut admitted: Vec<&'a T> = items
            .into_iter()
            .filter(|item| self.admits(key(item).0))
            .collect();
        match self.sort {
            SortOrder::Declared => {}
            SortOrder::Id => admitted.sort_by(|a, b| key(a).0.cmp(key(b).0)),
            SortOrder::Name => admitted.sort_by(|a, b| key(a).1.cmp(key(b).1)),
        }
        admitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resources() -> Vec<Resource> {
        vec![
            Resource::new("r3", "Carol"),
            Resource::new("r1", "Bob"),
            Resource::new("r2", "Alice"),
        ]
    }

    fn ids(list: &[&Resource]) -> Vec<String> {
        list.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn default_filter_admits_everything_in_declared_order() {
        let all = resources();
        let filter = ListFilter::default();
        let out = filter.apply(&all, |r| (r.id.as_str(), r.name.as_str()));
        assert_eq!(ids(&out), vec!["r3", "r1", "r2"]);
    }

    #[test]
    fn include_exclude_and_sorting() {
        let all = resources();
        let filter = ListFilter {
            include: vec!["r1".into(), "r2".into(), "r3".into()],
            exclude: vec!["r3".into()],
            sort: SortOrder::Id,
        };
        let out = filter.apply(&all, |r| (r.id.as_str(), r.name.as_str()));
        assert_eq!(ids(&out), vec!["r1", "r2"]);

        let by_name = ListFilter {
            sort: SortOrder::Name,
            ..ListFilter::default()
        };
        let out = by_name.apply(&all, |r| (r.id.as_str(), r.name.as_str()));
        assert_eq!(ids(&out), vec!["r2", "r1", "r3"]);
    }
}
