use crate::error::Result;
use crate::types::{SolveRequest, SubjectCode};
use std::collections::HashSet;

/// Validation result with collected errors
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

/// Validate a loaded request before handing it to the engine.
///
/// Errors mean the request cannot produce anything useful (e.g. no rooms at
/// all). Warnings flag rows the engine will skip or coerce on its own.
pub fn validate_request(request: &SolveRequest) -> Result<ValidationResult> {
    let mut result = ValidationResult::default();

    check_duplicate_subjects(request, &mut result);
    check_duplicate_teacher_ids(request, &mut result);
    check_duplicate_room_ids(request, &mut result);

    if request.rooms.is_empty() {
        result.add_error("Room inventory is empty");
    }

    // Teachers with an empty teach-set can never be assigned
    for teacher in &request.teachers {
        if teacher.can_teach.is_empty() {
            result.add_warning(format!(
                "Teacher '{}' has an empty can_teach list",
                teacher.name
            ));
        }
    }

    // Subjects nobody can teach will be dropped by the expander
    for subject in &request.subjects {
        if !request.teachers.iter().any(|t| t.teaches(&subject.code)) {
            result.add_warning(format!(
                "Subject '{}' has no qualified teachers",
                subject.code
            ));
        }
    }

    // Demand for years absent from the curriculum is silently unschedulable
    for (program, years) in &request.program_sections {
        for (year, count) in years {
            if *count == 0 {
                continue;
            }
            let has_curriculum = request
                .subjects
                .iter()
                .any(|s| s.year_level == *year && s.offered_to(*program));
            if !has_curriculum {
                result.add_warning(format!(
                    "No {} curriculum for year {}; requested sections will be skipped",
                    program, year
                ));
            }
        }
    }

    if !result.is_valid() {
        return Err(anyhow::anyhow!(
            "Validation failed with {} errors:\n{}",
            result.errors.len(),
            result.errors.join("\n")
        ));
    }

    Ok(result)
}

fn check_duplicate_subjects(request: &SolveRequest, result: &mut ValidationResult) {
    let mut seen: HashSet<(&SubjectCode, _)> = HashSet::new();
    for subject in &request.subjects {
        if !seen.insert((&subject.code, subject.program)) {
            result.add_error(format!(
                "Duplicate subject code '{}' for program {}",
                subject.code, subject.program
            ));
        }
    }
}

fn check_duplicate_teacher_ids(request: &SolveRequest, result: &mut ValidationResult) {
    let mut seen = HashSet::new();
    for teacher in &request.teachers {
        if !seen.insert(&teacher.id) {
            result.add_error(format!("Duplicate teacher ID: '{}'", teacher.id));
        }
    }
}

fn check_duplicate_room_ids(request: &SolveRequest, result: &mut ValidationResult) {
    let mut seen = HashSet::new();
    for room in &request.rooms {
        if !seen.insert(&room.id) {
            result.add_error(format!("Duplicate room ID: '{}'", room.id));
        }
    }
}
