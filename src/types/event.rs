use super::{latest_start, RoomId, SectionId, SubjectCode, TeacherId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of session a meeting event represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingKind {
    Lecture,
    Lab,
    NonLab,
}

impl MeetingKind {
    pub fn label(self) -> &'static str {
        match self {
            MeetingKind::Lecture => "lecture",
            MeetingKind::Lab => "lab",
            MeetingKind::NonLab => "non_lab",
        }
    }
}

impl fmt::Display for MeetingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One schedulable session of a subject within a cohort section.
///
/// The demand expander produces these; the constraint model binds each to a
/// day, start slot, teacher, and room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingEvent {
    pub section_id: SectionId,
    pub subject_code: SubjectCode,
    pub kind: MeetingKind,
    /// Duration in 30-minute slots
    pub duration_slots: usize,
    /// 0 or 1; the second index exists only for split non-lab meetings
    pub meeting_idx: u8,
    /// Eligible teachers; never empty for an emitted event
    pub valid_teachers: Vec<TeacherId>,
    /// Eligible rooms after exclusivity rules; never empty for an emitted event
    pub valid_rooms: Vec<RoomId>,
}

impl MeetingEvent {
    /// Latest start slot that keeps the whole meeting inside the day horizon
    pub fn latest_start(&self) -> usize {
        latest_start(self.duration_slots)
    }
}
