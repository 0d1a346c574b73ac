/*!
 * Rendering of parsed entries for the command line.
 *
 * - `table`: fixed-width columns for reading in a terminal
 * - `csv`: one row per entry with quoted text fields
 * - `json`: pretty-printed array of entries
 */

use anyhow::{Context, Result};

use crate::app_config::OutputFormat;
use crate::subtitle_processor::SubtitleEntry;

/// Column header for CSV reports
const CSV_HEADER: &str = "id,start,end,text,text_only,text_line_count,words_count";

/// Render entries in the requested format
pub fn render(entries: &[SubtitleEntry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(entries)),
        OutputFormat::Csv => Ok(render_csv(entries)),
        OutputFormat::Json => render_json(entries),
    }
}

/// Render a fixed-width table
pub fn render_table(entries: &[SubtitleEntry]) -> String {
    let mut out = format!(
        "{:>6}  {:<12}  {:<12}  {:>5}  {:>5}  {}\n",
        "ID", "START", "END", "LINES", "WORDS", "TEXT"
    );

    for entry in entries {
        out.push_str(&format!(
            "{:>6}  {:<12}  {:<12}  {:>5}  {:>5}  {}\n",
            entry.id,
            entry.format_start_time(),
            entry.format_end_time(),
            entry.text_line_count,
            entry.words_count,
            entry.text
        ));
    }

    out
}

/// Render CSV with a header row; times are in milliseconds
pub fn render_csv(entries: &[SubtitleEntry]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');

    for entry in entries {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            entry.id,
            entry.start_ms,
            entry.end_ms,
            csv_field(&entry.text),
            csv_field(&entry.text_only),
            entry.text_line_count,
            entry.words_count
        ));
    }

    out
}

/// Render a pretty JSON array
pub fn render_json(entries: &[SubtitleEntry]) -> Result<String> {
    serde_json::to_string_pretty(entries).context("Failed to serialize entries to JSON")
}

// Quote when the field holds a delimiter, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
