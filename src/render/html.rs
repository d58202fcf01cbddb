use super::{NumberFormat, RenderResult, close, open, text};
use crate::allocation::AllocationTable;
use crate::metadata::ScheduleMetadata;
use quick_xml::Writer;
use quick_xml::events::{BytesText, Event};
use std::borrow::Cow;
use std::io;

/// Long project names are cut to their last characters, which tend to be the distinctive part.
const MAX_NAME_CHARS: usize = 15;

#[derive(Clone, Copy)]
enum Cell {
    Head,
    Data,
}

/// Resource by project table with a total column per resource and a totals row. Projects
/// without any allocation are left out.
pub fn render_html(
    table: &AllocationTable,
    metadata: &ScheduleMetadata,
    format: NumberFormat,
) -> RenderResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 1);
    let projects: Vec<&str> = table
        .bucket_ids()
        .filter(|id| table.bucket_total(id) > 0.0)
        .collect();

    writer.write_event(Event::DocType(BytesText::from_escaped("html")))?;
    open(&mut writer, "html", &[])?;
    open(&mut writer, "head", &[])?;
    open(&mut writer, "title", &[])?;
    text(&mut writer, &metadata.project_name)?;
    close(&mut writer, "title")?;
    close(&mut writer, "head")?;
    open(&mut writer, "body", &[])?;
    open(
        &mut writer,
        "table",
        &[("class", "tj_table"), ("cellspacing", "1")],
    )?;

    // Two header lines: project names, then project ids.
    open(&mut writer, "thead", &[])?;
    open(&mut writer, "tr", &[("class", "tabline")])?;
    cell(&mut writer, Cell::Head, "Project", "right")?;
    for id in &projects {
        let name = table.bucket(id).map(|b| b.name.as_str()).unwrap_or_default();
        cell(&mut writer, Cell::Head, &shorten(name), "center")?;
    }
    cell(&mut writer, Cell::Head, "", "right")?;
    close(&mut writer, "tr")?;
    open(&mut writer, "tr", &[("class", "tabline")])?;
    cell(&mut writer, Cell::Head, "Resource", "left")?;
    for id in &projects {
        cell(&mut writer, Cell::Head, id, "center")?;
    }
    cell(&mut writer, Cell::Head, "Total", "center")?;
    close(&mut writer, "tr")?;
    close(&mut writer, "thead")?;

    open(&mut writer, "tbody", &[])?;
    for resource in table.resources() {
        let resource_id = resource.external_id.as_str();
        open(&mut writer, "tr", &[("class", "tabline")])?;
        let label = format!("{} ({})", resource.name, resource_id);
        cell(&mut writer, Cell::Head, &label, "left")?;
        for id in &projects {
            let value = format.format(table.fraction(id, resource_id));
            let shown = if is_zero(&value) { "" } else { value.as_str() };
            cell(&mut writer, Cell::Data, shown, "right")?;
        }
        let total = format.format(table.resource_total(resource_id));
        cell(&mut writer, Cell::Head, &total, "right")?;
        close(&mut writer, "tr")?;
    }

    open(&mut writer, "tr", &[("class", "tabline")])?;
    cell(&mut writer, Cell::Head, "Total", "left")?;
    for id in &projects {
        cell(&mut writer, Cell::Head, &format.format(table.bucket_total(id)), "right")?;
    }
    cell(&mut writer, Cell::Head, &format.format(table.grand_total()), "right")?;
    close(&mut writer, "tr")?;
    close(&mut writer, "tbody")?;

    close(&mut writer, "table")?;
    close(&mut writer, "body")?;
    close(&mut writer, "html")?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn cell<W: io::Write>(
    writer: &mut Writer<W>,
    kind: Cell,
    content: &str,
    align: &str,
) -> RenderResult<()> {
    let (td_class, div_class) = match kind {
        Cell::Head => ("tabhead", "headercelldiv"),
        Cell::Data => ("taskcell1", "celldiv"),
    };
    let style = format!("text-align:{align}");
    open(writer, "td", &[("class", td_class)])?;
    open(writer, "div", &[("class", div_class), ("style", style.as_str())])?;
    text(writer, content)?;
    close(writer, "div")?;
    close(writer, "td")
}

fn shorten(name: &str) -> Cow<'_, str> {
    let count = name.chars().count();
    if count <= MAX_NAME_CHARS {
        return Cow::Borrowed(name);
    }
    let tail: String = name.chars().skip(count - MAX_NAME_CHARS).collect();
    Cow::Owned(format!("...{tail}"))
}

fn is_zero(formatted: &str) -> bool {
    formatted.parse::<f64>().is_ok_and(|v| v == 0.0)
}
