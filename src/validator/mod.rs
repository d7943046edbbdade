use crate::types::MeetingRecord;
use itertools::Itertools;
use std::fmt;

/// Kind of residual overlap found by re-inspecting an emitted schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Section,
    Teacher,
}

/// A residual overlap between two emitted records.
///
/// Conflicts are informational: fallback schedules intentionally omit
/// constraints, so their conflicts are expected and are logged, not raised.
#[derive(Debug, Clone)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub subject: String,
    pub day: String,
    pub first: String,
    pub second: String,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ConflictKind::Section => write!(
                f,
                "Section conflict: {} on {} - {} vs {}",
                self.subject, self.day, self.first, self.second
            ),
            ConflictKind::Teacher => write!(
                f,
                "Teacher conflict: {} on {} - {} vs {}",
                self.subject, self.day, self.first, self.second
            ),
        }
    }
}

/// Half-open interval overlap on slot indices
fn overlaps(a: &MeetingRecord, b: &MeetingRecord) -> bool {
    match (a.interval(), b.interval()) {
        (Some((start_a, end_a)), Some((start_b, end_b))) => start_a < end_b && start_b < end_a,
        _ => false,
    }
}

fn describe(record: &MeetingRecord) -> String {
    format!("{} ({})", record.subject_code, record.start_time_slot)
}

/// Same section, same day, overlapping intervals
pub fn check_section_conflicts(schedule: &[MeetingRecord]) -> Vec<Conflict> {
    schedule
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.section_id == b.section_id && a.day == b.day && overlaps(a, b))
        .map(|(a, b)| Conflict {
            kind: ConflictKind::Section,
            subject: a.section_id.0.clone(),
            day: a.day.label().to_string(),
            first: describe(a),
            second: describe(b),
        })
        .collect()
}

/// Same teacher, same day, overlapping intervals
pub fn check_teacher_conflicts(schedule: &[MeetingRecord]) -> Vec<Conflict> {
    schedule
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.teacher_name == b.teacher_name && a.day == b.day && overlaps(a, b))
        .map(|(a, b)| Conflict {
            kind: ConflictKind::Teacher,
            subject: a.teacher_name.clone(),
            day: a.day.label().to_string(),
            first: describe(a),
            second: describe(b),
        })
        .collect()
}

/// Re-verify an emitted schedule in O(n^2) over its records
pub fn find_conflicts(schedule: &[MeetingRecord]) -> Vec<Conflict> {
    let mut conflicts = check_section_conflicts(schedule);
    conflicts.extend(check_teacher_conflicts(schedule));
    conflicts
}
