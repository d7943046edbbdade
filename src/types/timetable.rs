use super::{
    slot_index, MeetingKind, Program, Room, SectionId, Subject, SubjectCode, Teacher, Weekday,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One scheduled meeting in the emitted timetable. Every field is fully
/// populated; partial records are never produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub section_id: SectionId,
    pub subject_code: SubjectCode,
    pub subject_name: String,
    #[serde(rename = "type")]
    pub kind: MeetingKind,
    pub teacher_name: String,
    pub room_name: String,
    pub day: Weekday,
    /// Label of the first occupied slot, e.g. "07:30-08:00"
    pub start_time_slot: String,
    pub duration_slots: usize,
}

impl MeetingRecord {
    /// Index of the first occupied slot, when the label parses
    pub fn start_slot(&self) -> Option<usize> {
        slot_index(&self.start_time_slot)
    }

    /// Half-open occupied interval `[start, start + duration)`
    pub fn interval(&self) -> Option<(usize, usize)> {
        self.start_slot().map(|s| (s, s + self.duration_slots))
    }
}

/// Metadata about a generated timetable
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimetableMetadata {
    pub generated_at: String,
    pub algorithm_version: String,
    pub solve_time_ms: u64,
    /// True when the reduced fallback model produced the schedule
    pub used_fallback: bool,
}

impl TimetableMetadata {
    pub fn stamped() -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            algorithm_version: env!("CARGO_PKG_VERSION").to_string(),
            solve_time_ms: 0,
            used_fallback: false,
        }
    }
}

/// The engine's result envelope: a (possibly empty) schedule plus the
/// diagnostic log trail of the solve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Timetable {
    pub schedule: Vec<MeetingRecord>,
    pub logs: Vec<String>,
    #[serde(default)]
    pub metadata: TimetableMetadata,
}

impl Timetable {
    /// The canonical no-solution reply: empty schedule, explanatory logs
    pub fn empty(logs: Vec<String>) -> Self {
        Self {
            schedule: Vec::new(),
            logs,
            metadata: TimetableMetadata::stamped(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }

    /// Records belonging to one cohort section, in emission order
    pub fn records_for_section(&self, section_id: &SectionId) -> Vec<&MeetingRecord> {
        self.schedule
            .iter()
            .filter(|r| &r.section_id == section_id)
            .collect()
    }
}

/// A request to schedule one term's demand against the catalog snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveRequest {
    pub subjects: Vec<Subject>,
    pub teachers: Vec<Teacher>,
    pub rooms: Vec<Room>,
    /// Restrict subject selection to one semester; None selects all
    #[serde(default)]
    pub semester_filter: Option<u8>,
    /// program -> year level -> requested section count
    pub program_sections: BTreeMap<Program, BTreeMap<u8, u32>>,
    /// Programs to schedule; defaults to CS only
    #[serde(default = "default_programs")]
    pub programs: Vec<Program>,
}

fn default_programs() -> Vec<Program> {
    vec![Program::CS]
}
