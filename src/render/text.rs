use super::{NumberFormat, RenderResult};
use crate::allocation::AllocationTable;
use crate::allocation::frame::BUCKET_COLUMN_PREFIX;
use polars::prelude::{AnyValue, DataFrame};

/// Boxed plain-text table of the allocation frame, for terminals.
pub fn render_text(table: &AllocationTable, format: NumberFormat) -> RenderResult<String> {
    let df = table.to_dataframe()?;
    Ok(frame_as_text(&df, format))
}

fn frame_as_text(df: &DataFrame, format: NumberFormat) -> String {
    let columns = df.get_columns();
    let headers: Vec<String> = columns
        .iter()
        .map(|c| {
            let name = c.name().as_str();
            name.strip_prefix(BUCKET_COLUMN_PREFIX)
                .unwrap_or(name)
                .to_string()
        })
        .collect();

    let rows: Vec<Vec<String>> = (0..df.height())
        .map(|row_idx| {
            columns
                .iter()
                .map(|col| match col.get(row_idx) {
                    Ok(AnyValue::Null) | Err(_) => String::new(),
                    Ok(AnyValue::Float64(v)) => format.format(v),
                    Ok(AnyValue::String(s)) => s.to_string(),
                    Ok(other) => other.to_string(),
                })
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (ci, cell) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(cell.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_line(&mut out, &headers, &widths);
    out.push_str(&sep);
    out.push('\n');
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    out.push('|');
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width - cell.chars().count();
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(pad));
        out.push_str(" |");
    }
    out.push('\n');
}
