use super::AllocationTable;
use polars::prelude::*;

/// Bucket columns are named `bucket:<id>` so no project id can clash with the fixed columns.
pub const BUCKET_COLUMN_PREFIX: &str = "bucket:";

impl AllocationTable {
    /// One row per resource: `resource_id`, `resource_name`, a fraction column per bucket
    /// and the resource `total`.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let resource_ids: Vec<&str> = self.resource_ids().collect();
        let names: Vec<&str> = self.resources().map(|r| r.name.as_str()).collect();

        let mut columns: Vec<Column> = Vec::with_capacity(self.bucket_ids().count() + 3);
        columns.push(
            Series::new(PlSmallStr::from_static("resource_id"), &resource_ids).into_column(),
        );
        columns.push(Series::new(PlSmallStr::from_static("resource_name"), &names).into_column());

        for bucket_id in self.bucket_ids() {
            let fractions: Vec<f64> = resource_ids
                .iter()
                .map(|resource_id| self.fraction(bucket_id, resource_id))
                .collect();
            let name = format!("{BUCKET_COLUMN_PREFIX}{bucket_id}");
            columns.push(Series::new(name.into(), fractions).into_column());
        }

        let totals: Vec<f64> = resource_ids
            .iter()
            .map(|resource_id| self.resource_total(resource_id))
            .collect();
        columns.push(Series::new(PlSmallStr::from_static("total"), totals).into_column());

        DataFrame::new(columns)
    }
}
