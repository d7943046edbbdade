use super::{Program, SectionId};
use serde::{Deserialize, Serialize};

/// A cohort class group (e.g. CS1A), constructed per request and discarded
/// after the solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CohortSection {
    pub id: SectionId,
    pub program: Program,
    pub year_level: u8,
    pub semester: Option<u8>,
}

impl CohortSection {
    /// Build the nth section of a (program, year) cohort; letters run A, B, ...
    pub fn new(program: Program, year_level: u8, letter_idx: u32, semester: Option<u8>) -> Self {
        let letter = char::from_u32('A' as u32 + letter_idx).unwrap_or('?');
        Self {
            id: SectionId(format!("{}{}{}", program, year_level, letter)),
            program,
            year_level,
            semester,
        }
    }
}
