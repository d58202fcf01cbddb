//! Output formats of the allocation table. Renderers only read the table; bucket and resource
//! ids are always visited in sorted order so the same schedule renders byte-identical output.

pub mod csv;
pub mod html;
pub mod text;
pub mod xog;

pub use self::csv::render_csv;
pub use html::render_html;
pub use text::render_text;
pub use xog::render_xog;

use crate::allocation::AllocationTable;
use crate::config::{OutputFormat, OutputOptions};
use crate::metadata::ScheduleMetadata;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::io;
use std::string::FromUtf8Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("dataframe error: {0}")]
    Frame(#[from] polars::prelude::PolarsError),

    #[error("rendered output is not valid utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Fixed-point formatting of allocation fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    precision: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self { precision: 2 }
    }
}

impl NumberFormat {
    pub fn new(precision: usize) -> Self {
        Self { precision }
    }

    pub fn format(&self, value: f64) -> String {
        let formatted = format!("{:.*}", self.precision, value);
        // "-0.00" for tiny negative rounding noise
        if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
            formatted[1..].to_string()
        } else {
            formatted
        }
    }
}

pub fn render(
    table: &AllocationTable,
    metadata: &ScheduleMetadata,
    options: &OutputOptions,
) -> RenderResult<String> {
    let format = NumberFormat::new(options.precision);
    match options.format {
        OutputFormat::Html => render_html(table, metadata, format),
        OutputFormat::Xog => render_xog(table, metadata, format, options.custom_info.as_deref()),
        OutputFormat::Csv => render_csv(table, format),
        OutputFormat::Text => render_text(table, format),
    }
}

fn open<W: io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> RenderResult<()> {
    let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
    writer.write_event(Event::Start(element))?;
    Ok(())
}

fn empty<W: io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    attrs: &[(&str, &str)],
) -> RenderResult<()> {
    let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

fn close<W: io::Write>(writer: &mut Writer<W>, name: &str) -> RenderResult<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn text<W: io::Write>(writer: &mut Writer<W>, content: &str) -> RenderResult<()> {
    writer.write_event(Event::Text(BytesText::new(content)))?;
    Ok(())
}
