use crate::allocation::{AllocationPass, AllocationTable, CapacityPass, ProjectGrouping};
use crate::config::ReportConfig;
use crate::error::ReportResult;
use crate::source::ScheduleSource;

/// One report generation over a schedule source. Nothing is shared between runs; every call
/// to [`AllocationReport::generate`] builds its capacities and buckets from scratch.
pub struct AllocationReport<'a, S: ScheduleSource + ?Sized> {
    source: &'a S,
    config: &'a ReportConfig,
}

impl<'a, S: ScheduleSource + ?Sized> AllocationReport<'a, S> {
    pub fn new(source: &'a S, config: &'a ReportConfig) -> Self {
        Self { source, config }
    }

    pub fn generate(&self) -> ReportResult<AllocationTable> {
        self.config.validate()?;
        let interval = self.config.interval()?;
        tracing::info!(
            project = %self.source.metadata().project_name,
            %interval,
            scenario = self.config.scenario,
            "generating allocation report"
        );

        let capacities = CapacityPass::new(self.source, self.config, interval).execute()?;
        let groups = ProjectGrouping::new(self.source, self.config, &capacities).execute()?;
        let buckets = AllocationPass::new(self.source, &capacities, interval, self.config.scenario)
            .execute(groups);

        let working_days = capacities.working_days();
        let table = AllocationTable::new(interval, working_days, capacities.into_records(), buckets);
        tracing::info!(
            resources = table.resource_ids().count(),
            projects = table.bucket_ids().count(),
            "allocation report ready"
        );
        Ok(table)
    }
}
