use crate::error::Result;
use crate::types::Timetable;
use std::collections::BTreeSet;

/// Generate JSON report of the timetable
pub fn generate_json_report(timetable: &Timetable) -> Result<String> {
    Ok(serde_json::to_string_pretty(timetable)?)
}

/// Summary statistics as JSON
#[derive(serde::Serialize)]
pub struct JsonSummary {
    pub total_meetings: usize,
    pub total_sections: usize,
    pub log_entries: usize,
    pub solve_time_ms: u64,
    pub used_fallback: bool,
}

pub fn generate_json_summary(timetable: &Timetable) -> Result<String> {
    let sections: BTreeSet<_> = timetable.schedule.iter().map(|r| &r.section_id).collect();

    let summary = JsonSummary {
        total_meetings: timetable.schedule.len(),
        total_sections: sections.len(),
        log_entries: timetable.logs.len(),
        solve_time_ms: timetable.metadata.solve_time_ms,
        used_fallback: timetable.metadata.used_fallback,
    };

    Ok(serde_json::to_string_pretty(&summary)?)
}
