pub mod allocation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod interval;
pub mod metadata;
pub mod persistence;
pub mod render;
pub mod report;
pub mod resource;
pub mod schedule;
pub mod source;
pub mod task;

pub use allocation::{AllocationTable, BucketKind, ProjectBucket, ResourceCapacity};
pub use calendar::{CalendarError, WorkCalendar, WorkCalendarConfig};
pub use config::{ConfigError, OutputFormat, OutputOptions, ReportConfig, TagNames};
pub use error::{AllocationError, ReportError, ReportResult};
pub use interval::{EmptyIntervalError, ReportInterval};
pub use metadata::ScheduleMetadata;
pub use render::{NumberFormat, RenderError, render};
pub use report::AllocationReport;
pub use resource::{Assignment, Resource};
pub use schedule::Schedule;
pub use source::{ListFilter, ScheduleSource, SortOrder};
pub use task::Task;
