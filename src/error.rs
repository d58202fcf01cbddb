//! Error types of the allocation report.
//!
//! Every concern owns its error enum; [`ReportError`] composes them so a report run can
//! propagate any failure with `?` and hand a single diagnostic to the caller.

use crate::calendar::CalendarError;
use crate::config::ConfigError;
use crate::persistence::PersistenceError;
use crate::render::RenderError;
use thiserror::Error;

/// Fatal conditions raised while aggregating allocations. They describe malformed schedule
/// data, so none of them is retried or downgraded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("no resources with the custom attribute {tag} were found")]
    NoEligibleResources { tag: String },

    #[error("{tag} of task {task} may not be empty")]
    InvalidProjectTag { task: String, tag: String },

    #[error("{tag} of task {task} has not been set or is empty")]
    MissingProjectName { task: String, tag: String },

    #[error(
        "task {task} and task {first_task} have same {id_tag} ({project_id}) but different \
         {name_tag} ({name}/{first_name})"
    )]
    InconsistentProjectName {
        project_id: String,
        task: String,
        name: String,
        first_task: String,
        first_name: String,
        id_tag: String,
        name_tag: String,
    },

    #[error("no tasks with the custom attributes {id_tag} and {name_tag} were found")]
    NoEligibleTasks { id_tag: String, name_tag: String },

    #[error("idle bucket id {id} is already used by a project")]
    IdleBucketConflict { id: String },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type ReportResult<T> = Result<T, ReportError>;
