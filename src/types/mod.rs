mod config;
mod event;
mod room;
mod section;
mod subject;
mod teacher;
mod timeslot;
mod timetable;

pub use config::*;
pub use event::*;
pub use room::*;
pub use section::*;
pub use subject::*;
pub use teacher::*;
pub use timeslot::*;
pub use timetable::*;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Newtype for subject codes (short identifier, unique per program)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectCode(pub String);

impl SubjectCode {
    /// Case-insensitive comparison against a bare code string
    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for SubjectCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for teacher identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeacherId(pub String);

impl fmt::Display for TeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for room identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub String);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for cohort section identifiers (e.g. "CS1A")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionId(pub String);

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Degree program a subject or cohort belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Program {
    CS,
    IT,
}

impl Program {
    pub fn from_label(label: &str) -> Option<Program> {
        match label.trim().to_ascii_uppercase().as_str() {
            "CS" => Some(Program::CS),
            "IT" => Some(Program::IT),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Program::CS => "CS",
            Program::IT => "IT",
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_labels_round_trip() {
        for program in [Program::CS, Program::IT] {
            assert_eq!(Program::from_label(program.label()), Some(program));
        }
        assert_eq!(Program::from_label(" cs "), Some(Program::CS));
        assert_eq!(Program::from_label("EE"), None);
    }

    #[test]
    fn test_subject_code_matches_case_insensitively() {
        let code = SubjectCode("CS14".to_string());
        assert!(code.matches("cs14"));
        assert!(!code.matches("CS1"));
    }
}
