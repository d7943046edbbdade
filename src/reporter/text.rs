use crate::types::{SectionId, Timetable};
use colored::Colorize;
use std::collections::BTreeMap;

/// Generate a plain text report (with colors for terminal)
pub fn generate_text_report(timetable: &Timetable) -> String {
    let mut lines = Vec::new();

    lines.push("═".repeat(60));
    lines.push("               WEEKLY TIMETABLE".to_string());
    lines.push("═".repeat(60));
    lines.push(String::new());

    lines.push(format!("Generated: {}", timetable.metadata.generated_at));
    lines.push(format!("Solve Time: {}ms", timetable.metadata.solve_time_ms));
    if timetable.metadata.used_fallback {
        lines.push("Model: FALLBACK (best effort, conflicts possible)".to_string());
    } else {
        lines.push("Model: primary".to_string());
    }
    lines.push(String::new());

    if timetable.schedule.is_empty() {
        lines.push("No meetings scheduled.".red().to_string());
    } else {
        let mut by_section: BTreeMap<&SectionId, Vec<&crate::types::MeetingRecord>> =
            BTreeMap::new();
        for record in &timetable.schedule {
            by_section.entry(&record.section_id).or_default().push(record);
        }

        for (section_id, records) in &by_section {
            lines.push("─".repeat(40));
            lines.push(format!("{} ({} meetings)", section_id.0.bold(), records.len()));
            lines.push("─".repeat(40));

            for record in records {
                lines.push(format!(
                    "  {} {} | {} {} | {} | {}",
                    record.day,
                    record.start_time_slot,
                    record.subject_code,
                    format!("({})", record.kind).dimmed(),
                    record.teacher_name,
                    record.room_name
                ));
            }
            lines.push(String::new());
        }
    }

    // Conflict lines surface near the end where operators look first
    let conflicts: Vec<&String> = timetable
        .logs
        .iter()
        .filter(|l| l.contains("conflict:"))
        .collect();
    if !conflicts.is_empty() {
        lines.push("RESIDUAL CONFLICTS".red().bold().to_string());
        for conflict in conflicts {
            lines.push(format!("  ! {}", conflict));
        }
        lines.push(String::new());
    }

    lines.push("═".repeat(60));

    lines.join("\n")
}

/// Print a quick summary to stdout
pub fn print_summary(timetable: &Timetable) {
    println!();
    if timetable.schedule.is_empty() {
        println!("{}", "✗ No schedule produced".red().bold());
    } else if timetable.metadata.used_fallback {
        println!(
            "{}",
            "! Timetable generated by the fallback model (best effort)"
                .yellow()
                .bold()
        );
    } else {
        println!("{}", "✓ Timetable generated successfully".green().bold());
    }
    println!();
    println!("  Meetings:  {}", timetable.schedule.len());
    println!("  Log lines: {}", timetable.logs.len());
    println!("  Time:      {}ms", timetable.metadata.solve_time_ms);
    println!();
}
