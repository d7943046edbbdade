use crate::types::{SectionId, Timetable};
use std::collections::BTreeMap;

/// Generate a markdown report grouped by cohort section
pub fn generate_markdown_report(timetable: &Timetable) -> String {
    let mut lines = Vec::new();

    lines.push("# Weekly Timetable".to_string());
    lines.push(String::new());
    lines.push(format!("Generated: {}", timetable.metadata.generated_at));
    lines.push(format!(
        "Model: {}",
        if timetable.metadata.used_fallback {
            "fallback (best effort)"
        } else {
            "primary"
        }
    ));
    lines.push(String::new());

    if timetable.schedule.is_empty() {
        lines.push("_No meetings scheduled._".to_string());
    } else {
        let mut by_section: BTreeMap<&SectionId, Vec<&crate::types::MeetingRecord>> =
            BTreeMap::new();
        for record in &timetable.schedule {
            by_section.entry(&record.section_id).or_default().push(record);
        }

        for (section_id, records) in &by_section {
            lines.push(format!("## {}", section_id));
            lines.push(String::new());
            lines.push("| Day | Time | Subject | Type | Teacher | Room |".to_string());
            lines.push("|-----|------|---------|------|---------|------|".to_string());

            for record in records {
                lines.push(format!(
                    "| {} | {} | {} | {} | {} | {} |",
                    record.day,
                    record.start_time_slot,
                    record.subject_code,
                    record.kind,
                    record.teacher_name,
                    record.room_name
                ));
            }
            lines.push(String::new());
        }
    }

    let warnings: Vec<&String> = timetable
        .logs
        .iter()
        .filter(|l| l.starts_with("Warning") || l.contains("conflict:"))
        .collect();
    if !warnings.is_empty() {
        lines.push("## Diagnostics".to_string());
        lines.push(String::new());
        for warning in warnings {
            lines.push(format!("- {}", warning));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
