mod json;
mod markdown;
mod text;

pub use json::*;
pub use markdown::*;
pub use text::*;

use crate::error::Result;
use crate::types::Timetable;
use std::fs;
use std::path::Path;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Text,
}

/// Generate all reports and write to output directory
pub fn generate_reports(
    timetable: &Timetable,
    output_dir: &Path,
    formats: &[OutputFormat],
) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    for format in formats {
        match format {
            OutputFormat::Json => {
                let json = generate_json_report(timetable)?;
                fs::write(output_dir.join("timetable.json"), json)?;
            }
            OutputFormat::Markdown => {
                let md = generate_markdown_report(timetable);
                fs::write(output_dir.join("timetable.md"), md)?;
            }
            OutputFormat::Text => {
                let txt = generate_text_report(timetable);
                fs::write(output_dir.join("timetable.txt"), txt)?;
            }
        }
    }

    Ok(())
}
