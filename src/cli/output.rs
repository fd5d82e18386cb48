//! Output formatting utilities

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;

/// Determine the effective output format based on context
pub fn effective_format(format: OutputFormat, is_list: bool) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if is_list {
                OutputFormat::Tsv
            } else {
                OutputFormat::Text
            }
        }
        other => other,
    }
}

/// Serialize as YAML or JSON; `None` for the other formats
pub fn to_structured<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    match format {
        OutputFormat::Yaml => Ok(Some(serde_yml::to_string(value).into_diagnostic()?)),
        OutputFormat::Json => Ok(Some(serde_json::to_string_pretty(value).into_diagnostic()?)),
        _ => Ok(None),
    }
}

/// Serialize records as delimited text with a header row
pub fn to_delimited<T: Serialize>(rows: &[T], delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for row in rows {
        writer.serialize(row).into_diagnostic()?;
    }
    let bytes = writer.into_inner().into_diagnostic()?;
    String::from_utf8(bytes).into_diagnostic()
}

/// Delimiter byte for the delimited formats
pub fn delimiter_for(format: OutputFormat) -> Option<u8> {
    match format {
        OutputFormat::Tsv => Some(b'\t'),
        OutputFormat::Csv => Some(b','),
        _ => None,
    }
}

/// Render rows of cells as a rounded box table
pub fn render_table<I, R>(header: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut builder = Builder::default();
    builder.push_record(header.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}

/// Print a single record in any non-text format
///
/// Returns `false` when the format is text, leaving rendering to the caller.
pub fn print_record<T: Serialize>(
    record: &T,
    format: OutputFormat,
    table_rows: impl FnOnce() -> Vec<(String, String)>,
) -> Result<bool> {
    if let Some(structured) = to_structured(record, format)? {
        println!("{}", structured.trim_end());
        return Ok(true);
    }
    if let Some(delimiter) = delimiter_for(format) {
        print!("{}", to_delimited(std::slice::from_ref(record), delimiter)?);
        return Ok(true);
    }
    if format == OutputFormat::Table {
        let rows = table_rows().into_iter().map(|(k, v)| [k, v]);
        println!("{}", render_table(&["METRIC", "VALUE"], rows));
        return Ok(true);
    }
    Ok(false)
}
