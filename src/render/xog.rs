use super::{NumberFormat, RenderResult, close, empty, open};
use crate::allocation::AllocationTable;
use crate::metadata::ScheduleMetadata;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};
use std::io::Write;

/// Project allocation document in the XOG (XML Open Gateway) format of the external
/// resource-management system.
///
/// Every bucket becomes a `Project`, every resource with a recorded sum in that bucket a
/// `Resource` with a single allocation curve segment spanning the reporting interval.
pub fn render_xog(
    table: &AllocationTable,
    metadata: &ScheduleMetadata,
    format: NumberFormat,
    custom_info: Option<&str>,
) -> RenderResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let interval = table.interval();
    let segment_start = format!("{}T00:00:00", interval.start());
    let segment_finish = format!("{}T23:59:59", interval.last_day());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    let comment = format!(
        "\nGenerated by {} v{}\nProject: {}\nDate:    {}\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        comment_safe(&metadata.project_name),
        metadata.now,
    );
    writer.write_event(Event::Comment(BytesText::from_escaped(comment)))?;

    open(
        &mut writer,
        "NikuDataBus",
        &[
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
            ("xsi:noNamespaceSchemaLocation", "../xsd/nikuxog_project.xsd"),
        ],
    )?;
    empty(
        &mut writer,
        "Header",
        &[
            ("action", "write"),
            ("externalSource", "NIKU"),
            ("objectType", "project"),
            ("version", "7.5.0"),
        ],
    )?;
    open(&mut writer, "Projects", &[])?;

    for bucket in table.buckets() {
        open(
            &mut writer,
            "Project",
            &[("name", bucket.name.as_str()), ("projectID", bucket.id.as_str())],
        )?;
        open(&mut writer, "Resources", &[])?;
        for resource_id in bucket.resource_sums.keys() {
            let sum = format.format(table.fraction(&bucket.id, resource_id));
            open(
                &mut writer,
                "Resource",
                &[("resourceID", resource_id.as_str()), ("defaultAllocation", "0")],
            )?;
            open(&mut writer, "AllocCurve", &[])?;
            empty(
                &mut writer,
                "Segment",
                &[
                    ("start", segment_start.as_str()),
                    ("finish", segment_finish.as_str()),
                    ("sum", sum.as_str()),
                ],
            )?;
            close(&mut writer, "AllocCurve")?;
            close(&mut writer, "Resource")?;
        }
        close(&mut writer, "Resources")?;

        // Installation specific settings, identical for every project, passed through as is.
        if let Some(blob) = custom_info.filter(|b| !b.trim().is_empty()) {
            writer.get_mut().write_all(b"\n")?;
            writer.get_mut().write_all(blob.trim().as_bytes())?;
        }
        close(&mut writer, "Project")?;
    }

    close(&mut writer, "Projects")?;
    close(&mut writer, "NikuDataBus")?;
    writer.get_mut().write_all(b"\n")?;

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Comments are not entity-decoded and may not contain `--`; a space is put between
/// consecutive dashes.
fn comment_safe(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_dash = false;
    for c in text.chars() {
        if c == '-' && previous_dash {
            out.push(' ');
        }
        previous_dash = c == '-';
        out.push(c);
    }
    out
}
