use super::{PersistenceResult, validation};
use crate::calendar::WorkCalendar;
use crate::metadata::ScheduleMetadata;
use crate::resource::Resource;
use crate::schedule::Schedule;
use crate::source::ScheduleSource;
use crate::task::Task;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct ScheduleSnapshot {
    metadata: ScheduleMetadata,
    #[serde(default)]
    calendar: WorkCalendar,
    #[serde(default)]
    resources: Vec<Resource>,
    #[serde(default)]
    tasks: Vec<Task>,
}

impl ScheduleSnapshot {
    fn from_schedule(schedule: &Schedule) -> PersistenceResult<Self> {
        validation::validate_schedule_parts(schedule.resources(), schedule.tasks())?;
        Ok(Self {
            metadata: schedule.metadata().clone(),
            calendar: schedule.calendar().clone(),
            resources: schedule.resources().to_vec(),
            tasks: schedule.tasks().to_vec(),
        })
    }

    fn into_schedule(self) -> PersistenceResult<Schedule> {
        validation::validate_schedule_parts(&self.resources, &self.tasks)?;
        let mut schedule = Schedule::new_with_metadata_and_calendar(self.metadata, self.calendar);
        for resource in self.resources {
            schedule.upsert_resource(resource);
        }
        for task in self.tasks {
            schedule.upsert_task(task);
        }
        Ok(schedule)
    }
}

pub fn save_schedule_to_json<P: AsRef<Path>>(
    schedule: &Schedule,
    path: P,
) -> PersistenceResult<()> {
    let snapshot = ScheduleSnapshot::from_schedule(schedule)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_schedule_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<Schedule> {
    let file = File::open(path)?;
    let snapshot: ScheduleSnapshot = serde_json::from_reader(BufReader::new(file))?;
    snapshot.into_schedule()
}
