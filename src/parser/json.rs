use crate::error::{Result, TimetableError};
use crate::types::{
    Program, Room, RoomId, SolveRequest, SolverConfig, Subject, SubjectCode, Teacher, TeacherId,
    Weekday,
};
use log::warn;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Load a complete solve request from a data directory.
///
/// Expects `subjects.json`, `teachers.json`, `rooms.json`, and
/// `demand.json`. Catalog rows are coerced defensively: malformed rows are
/// skipped with a warning rather than failing the load.
pub fn load_request_from_dir(dir: &Path) -> Result<SolveRequest> {
    let raw_subjects: Vec<RawSubject> = load_json_file(&dir.join("subjects.json"))?;
    let raw_teachers: Vec<RawTeacher> = load_json_file(&dir.join("teachers.json"))?;
    let raw_rooms: Vec<RawRoom> = load_json_file(&dir.join("rooms.json"))?;
    let raw_demand: RawDemand = load_json_file(&dir.join("demand.json"))?;

    let (subjects, warnings) = convert_subjects(raw_subjects);
    log_warnings(&warnings);
    let (teachers, warnings) = convert_teachers(raw_teachers);
    log_warnings(&warnings);
    let (rooms, warnings) = convert_rooms(raw_rooms);
    log_warnings(&warnings);
    let (request, warnings) = build_request(subjects, teachers, rooms, raw_demand);
    log_warnings(&warnings);

    Ok(request)
}

/// Load solver config from a TOML file, or use defaults
pub fn load_config_or_default(path: &Path) -> SolverConfig {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => SolverConfig::default(),
        }
    } else {
        SolverConfig::default()
    }
}

/// Generic JSON file loader
fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| TimetableError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| {
        TimetableError::JsonParse {
            file: path_str,
            message: e.to_string(),
        }
        .into()
    })
}

fn log_warnings(warnings: &[String]) {
    for warning in warnings {
        warn!("{warning}");
    }
}

/// Coerce a loosely-typed value to an integer; accepts numbers and numeric
/// strings, truncating fractions
pub(crate) fn safe_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_f64().map(|f| f as i64),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    }
}

/// Coerce a loosely-typed value to a float, falling back to 0.0
pub(crate) fn safe_float(value: &Value) -> f32 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0) as f32,
        Value::String(s) => s.trim().parse::<f32>().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSubject {
    subject_code: Option<String>,
    subject_name: Option<String>,
    program: Option<String>,
    #[serde(default)]
    available_programs: Vec<String>,
    year_level: Option<Value>,
    semester: Option<Value>,
    lecture_hours_per_week: Option<Value>,
    lab_hours_per_week: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTeacher {
    teacher_id: Option<Value>,
    teacher_name: Option<String>,
    can_teach: Option<Value>,
    availability_days: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawRoom {
    room_id: Option<Value>,
    room_name: Option<String>,
    #[serde(default)]
    is_laboratory: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDemand {
    semester: Option<Value>,
    programs: Option<Vec<String>>,
    #[serde(default)]
    sections: BTreeMap<String, BTreeMap<String, Value>>,
}

pub(crate) fn convert_subjects(rows: Vec<RawSubject>) -> (Vec<Subject>, Vec<String>) {
    let mut subjects = Vec::new();
    let mut warnings = Vec::new();

    for row in rows {
        let code = match row.subject_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => {
                warnings.push("Skipping subject row with missing subject_code".to_string());
                continue;
            }
        };

        let Some(program) = row
            .program
            .as_deref()
            .and_then(Program::from_label)
        else {
            warnings.push(format!(
                "Skipping subject '{}' with unknown program {:?}",
                code, row.program
            ));
            continue;
        };

        let Some(year_level) = row.year_level.as_ref().and_then(safe_int) else {
            warnings.push(format!(
                "Skipping subject '{}' with invalid year_level {:?}",
                code, row.year_level
            ));
            continue;
        };

        let semester = row.semester.as_ref().and_then(safe_int).unwrap_or_else(|| {
            warnings.push(format!(
                "Subject '{}' has invalid semester {:?}; coerced to 0",
                code, row.semester
            ));
            0
        });

        let available_programs = row
            .available_programs
            .iter()
            .filter_map(|label| {
                let parsed = Program::from_label(label);
                if parsed.is_none() {
                    warnings.push(format!(
                        "Subject '{}' lists unknown program '{}' in available_programs",
                        code, label
                    ));
                }
                parsed
            })
            .collect();

        subjects.push(Subject {
            name: row.subject_name.unwrap_or_else(|| code.clone()),
            code: SubjectCode(code),
            program,
            available_programs,
            year_level: year_level.clamp(0, u8::MAX as i64) as u8,
            semester: semester.clamp(0, u8::MAX as i64) as u8,
            lecture_hours_per_week: row
                .lecture_hours_per_week
                .as_ref()
                .map(safe_float)
                .unwrap_or(0.0),
            lab_hours_per_week: row
                .lab_hours_per_week
                .as_ref()
                .map(safe_float)
                .unwrap_or(0.0),
        });
    }

    (subjects, warnings)
}

pub(crate) fn convert_teachers(rows: Vec<RawTeacher>) -> (Vec<Teacher>, Vec<String>) {
    let mut teachers = Vec::new();
    let mut warnings = Vec::new();

    for row in rows {
        let id = row.teacher_id.as_ref().map(value_to_id);
        let name = row
            .teacher_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let (Some(id), Some(name)) = (id.flatten(), name) else {
            warnings.push(format!(
                "Skipping teacher row due to missing ID or name: {:?}/{:?}",
                row.teacher_id, row.teacher_name
            ));
            continue;
        };

        teachers.push(Teacher {
            id: TeacherId(id),
            name: name.to_string(),
            can_teach: parse_can_teach(row.can_teach.as_ref()),
            availability_days: parse_availability(row.availability_days, &mut warnings),
        });
    }

    (teachers, warnings)
}

/// The teach-set arrives as a comma-separated string; whitespace inside
/// codes is stripped before comparison
fn parse_can_teach(value: Option<&Value>) -> Vec<SubjectCode> {
    let raw = match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str())
            .collect::<Vec<_>>()
            .join(","),
        Some(other) => other.to_string(),
        None => String::new(),
    };

    raw.split(',')
        .map(|code| code.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|code| !code.is_empty())
        .map(SubjectCode)
        .collect()
}

/// Missing or empty availability defaults to the full six-day week
fn parse_availability(days: Option<Vec<String>>, warnings: &mut Vec<String>) -> Vec<Weekday> {
    let Some(labels) = days.filter(|d| !d.is_empty()) else {
        return Weekday::ALL.to_vec();
    };

    let mut parsed: Vec<Weekday> = Vec::new();
    for label in &labels {
        match Weekday::from_label(label) {
            Some(day) if !parsed.contains(&day) => parsed.push(day),
            Some(_) => {}
            None => warnings.push(format!("Ignoring unknown availability day '{}'", label)),
        }
    }

    if parsed.is_empty() {
        Weekday::ALL.to_vec()
    } else {
        parsed
    }
}

pub(crate) fn convert_rooms(rows: Vec<RawRoom>) -> (Vec<Room>, Vec<String>) {
    let mut rooms = Vec::new();
    let mut warnings = Vec::new();

    for row in rows {
        let id = row.room_id.as_ref().and_then(value_to_id);
        let name = row
            .room_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());

        let (Some(id), Some(name)) = (id, name) else {
            warnings.push(format!(
                "Skipping room row due to missing ID or name: {:?}/{:?}",
                row.room_id, row.room_name
            ));
            continue;
        };

        rooms.push(Room {
            id: RoomId(id),
            name: name.to_string(),
            is_laboratory: row.is_laboratory,
        });
    }

    (rooms, warnings)
}

pub(crate) fn build_request(
    subjects: Vec<Subject>,
    teachers: Vec<Teacher>,
    rooms: Vec<Room>,
    demand: RawDemand,
) -> (SolveRequest, Vec<String>) {
    let mut warnings = Vec::new();

    // Semester arrives as a string or integer; compare via safe-int coercion
    let semester_filter = demand
        .semester
        .as_ref()
        .and_then(safe_int)
        .filter(|s| *s > 0)
        .map(|s| s.clamp(0, u8::MAX as i64) as u8);

    let programs = match demand.programs {
        Some(labels) => {
            let parsed: Vec<Program> = labels
                .iter()
                .filter_map(|label| {
                    let program = Program::from_label(label);
                    if program.is_none() {
                        warnings.push(format!("Ignoring unknown program '{}' in demand", label));
                    }
                    program
                })
                .collect();
            if parsed.is_empty() {
                vec![Program::CS]
            } else {
                parsed
            }
        }
        None => vec![Program::CS],
    };

    let mut program_sections: BTreeMap<Program, BTreeMap<u8, u32>> = BTreeMap::new();
    for (program_label, years) in demand.sections {
        let Some(program) = Program::from_label(&program_label) else {
            warnings.push(format!(
                "Ignoring section counts for unknown program '{}'",
                program_label
            ));
            continue;
        };

        let entry = program_sections.entry(program).or_default();
        for (year_label, count) in years {
            let year = serde_json::Value::String(year_label.clone());
            let (Some(year), Some(count)) = (safe_int(&year), safe_int(&count)) else {
                warnings.push(format!(
                    "Ignoring malformed section count for {} year '{}'",
                    program_label, year_label
                ));
                continue;
            };
            entry.insert(
                year.clamp(0, u8::MAX as i64) as u8,
                count.max(0) as u32,
            );
        }
    }

    let request = SolveRequest {
        subjects,
        teachers,
        rooms,
        semester_filter,
        program_sections,
        programs,
    };

    (request, warnings)
}

fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_int_coercions() {
        assert_eq!(safe_int(&json!(2)), Some(2));
        assert_eq!(safe_int(&json!("2")), Some(2));
        assert_eq!(safe_int(&json!("2.0")), Some(2));
        assert_eq!(safe_int(&json!(2.7)), Some(2));
        assert_eq!(safe_int(&json!("summer")), None);
        assert_eq!(safe_int(&json!(null)), None);
    }

    #[test]
    fn test_safe_float_falls_back_to_zero() {
        assert_eq!(safe_float(&json!(1.5)), 1.5);
        assert_eq!(safe_float(&json!("1.5")), 1.5);
        assert_eq!(safe_float(&json!("n/a")), 0.0);
        assert_eq!(safe_float(&json!([])), 0.0);
    }

    #[test]
    fn test_teacher_rows_without_id_or_name_are_dropped() {
        let rows: Vec<RawTeacher> = serde_json::from_value(json!([
            {"teacher_id": 1, "teacher_name": "Ms. Reyes", "can_teach": "CS1, CS2"},
            {"teacher_name": "No Id", "can_teach": "CS1"},
            {"teacher_id": 3, "teacher_name": "   ", "can_teach": "CS1"}
        ]))
        .unwrap();

        let (teachers, warnings) = convert_teachers(rows);
        assert_eq!(teachers.len(), 1);
        assert_eq!(teachers[0].id, TeacherId("1".to_string()));
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_can_teach_whitespace_is_stripped() {
        let rows: Vec<RawTeacher> = serde_json::from_value(json!([
            {"teacher_id": "t1", "teacher_name": "Ms. Reyes", "can_teach": " CS1 , CS 2 ,, IT6"}
        ]))
        .unwrap();

        let (teachers, _) = convert_teachers(rows);
        let codes: Vec<&str> = teachers[0].can_teach.iter().map(|c| c.0.as_str()).collect();
        assert_eq!(codes, vec!["CS1", "CS2", "IT6"]);
    }

    #[test]
    fn test_missing_availability_defaults_to_full_week() {
        let rows: Vec<RawTeacher> = serde_json::from_value(json!([
            {"teacher_id": "t1", "teacher_name": "A", "can_teach": "CS1"},
            {"teacher_id": "t2", "teacher_name": "B", "can_teach": "CS1", "availability_days": []},
            {"teacher_id": "t3", "teacher_name": "C", "can_teach": "CS1",
             "availability_days": ["Tue", "Sun"]}
        ]))
        .unwrap();

        let (teachers, warnings) = convert_teachers(rows);
        assert_eq!(teachers[0].availability_days.len(), 6);
        assert_eq!(teachers[1].availability_days.len(), 6);
        assert_eq!(teachers[2].availability_days, vec![Weekday::Tue]);
        assert!(warnings.iter().any(|w| w.contains("Sun")));
    }

    #[test]
    fn test_subject_numeric_coercion() {
        let rows: Vec<RawSubject> = serde_json::from_value(json!([
            {"subject_code": "CS1", "subject_name": "Intro", "program": "CS",
             "year_level": "1", "semester": "1.0",
             "lecture_hours_per_week": "3", "lab_hours_per_week": null},
            {"subject_code": "BAD", "subject_name": "No Year", "program": "CS",
             "year_level": "first", "semester": 1}
        ]))
        .unwrap();

        let (subjects, warnings) = convert_subjects(rows);
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].year_level, 1);
        assert_eq!(subjects[0].semester, 1);
        assert_eq!(subjects[0].lecture_hours_per_week, 3.0);
        assert_eq!(subjects[0].lab_hours_per_week, 0.0);
        assert!(warnings.iter().any(|w| w.contains("BAD")));
    }

    #[test]
    fn test_demand_accepts_string_or_int_semester() {
        let demand: RawDemand = serde_json::from_value(json!({
            "semester": "2",
            "programs": ["CS", "IT"],
            "sections": {"CS": {"1": 2}, "IT": {"1": "1"}}
        }))
        .unwrap();

        let (request, warnings) = build_request(vec![], vec![], vec![], demand);
        assert!(warnings.is_empty());
        assert_eq!(request.semester_filter, Some(2));
        assert_eq!(request.programs, vec![Program::CS, Program::IT]);
        assert_eq!(request.program_sections[&Program::CS][&1], 2);
        assert_eq!(request.program_sections[&Program::IT][&1], 1);
    }
}
