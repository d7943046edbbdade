use super::{Program, SubjectCode};
use serde::{Deserialize, Serialize};

/// A curriculum subject offering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub code: SubjectCode,
    pub name: String,
    pub program: Program,
    /// Extra programs a cross-listed subject is open to (e.g. GE subjects)
    #[serde(default)]
    pub available_programs: Vec<Program>,
    /// Year level 1-4
    pub year_level: u8,
    /// Semester 1, 2, or 3 (summer)
    pub semester: u8,
    #[serde(default)]
    pub lecture_hours_per_week: f32,
    #[serde(default)]
    pub lab_hours_per_week: f32,
}

impl Subject {
    pub fn is_lab_subject(&self) -> bool {
        self.lab_hours_per_week > 0.0
    }

    /// Whether a cohort of the given program takes this subject
    pub fn offered_to(&self, program: Program) -> bool {
        self.program == program || self.available_programs.contains(&program)
    }

    /// Weekly lecture load in 30-minute slots
    pub fn lecture_slots(&self) -> usize {
        (self.lecture_hours_per_week * 2.0) as usize
    }

    /// Weekly lab load in 30-minute slots
    pub fn lab_slots(&self) -> usize {
        (self.lab_hours_per_week * 2.0) as usize
    }
}
