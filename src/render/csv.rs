use super::{NumberFormat, RenderError, RenderResult};
use crate::allocation::AllocationTable;

/// Two header rows (project names, then project ids) followed by one row of fractions per
/// resource. Unlike the HTML table, projects without allocations are kept.
pub fn render_csv(table: &AllocationTable, format: NumberFormat) -> RenderResult<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    let project_ids: Vec<&str> = table.bucket_ids().collect();

    let mut names = vec![String::new()];
    names.extend(table.buckets().map(|b| b.name.clone()));
    writer.write_record(&names)?;

    let mut ids = vec!["Resource".to_string()];
    ids.extend(project_ids.iter().map(|id| id.to_string()));
    writer.write_record(&ids)?;

    for resource in table.resources() {
        let mut row = Vec::with_capacity(project_ids.len() + 1);
        row.push(format!("{} ({})", resource.name, resource.external_id));
        for project_id in &project_ids {
            row.push(format.format(table.fraction(project_id, &resource.external_id)));
        }
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| RenderError::Io(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
