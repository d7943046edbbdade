mod eligibility;
mod expander;
mod model;
mod solver;

pub use eligibility::*;
pub use expander::*;
pub use model::*;
pub use solver::*;

use crate::types::{SolveRequest, SolverConfig, Timetable, TimetableMetadata};
use crate::validator::find_conflicts;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Main entry point for timetable generation.
///
/// Expands the demand, solves the constraint model (with the reduced
/// fallback on failure), decodes, and re-validates. Infeasibility never
/// errors; the no-solution reply is an empty schedule with explanatory logs.
pub fn generate_timetable(request: &SolveRequest, config: &SolverConfig, quiet: bool) -> Timetable {
    let start_time = Instant::now();

    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };

    // Phase 1: Expand demand into meeting events
    progress.set_message("Expanding demand...");
    progress.set_position(10);
    let expansion = expand_demand(request);
    let mut logs = expansion.logs;

    if expansion.events.is_empty() {
        progress.finish_with_message("Nothing to schedule");
        logs.push("Scheduler: no meeting events to schedule".to_string());
        let mut timetable = Timetable::empty(logs);
        timetable.metadata.solve_time_ms = start_time.elapsed().as_millis() as u64;
        return timetable;
    }

    // Phases 2-3: Build the constraint model and solve (primary + fallback)
    progress.set_message("Solving timetable (MIP)...");
    progress.set_position(30);
    let outcome = solve_events(
        &expansion.events,
        &request.subjects,
        &request.teachers,
        &request.rooms,
        config,
        &mut logs,
    );

    let Some(outcome) = outcome else {
        progress.finish_with_message("No feasible schedule");
        let mut timetable = Timetable::empty(logs);
        timetable.metadata.solve_time_ms = start_time.elapsed().as_millis() as u64;
        return timetable;
    };

    // Phase 4: Re-validate the emitted schedule
    progress.set_message("Validating schedule...");
    progress.set_position(90);
    logs.push("Scheduler: Validating schedule for conflicts...".to_string());
    let conflicts = find_conflicts(&outcome.records);
    if conflicts.is_empty() {
        logs.push("Scheduler: No conflicts found in generated schedule".to_string());
    } else {
        logs.push(format!(
            "Scheduler: Found {} conflicts in generated schedule!",
            conflicts.len()
        ));
        for conflict in &conflicts {
            logs.push(format!("Scheduler: {conflict}"));
        }
    }

    progress.set_position(100);
    progress.finish_with_message("Timetable generated");

    let mut metadata = TimetableMetadata::stamped();
    metadata.solve_time_ms = start_time.elapsed().as_millis() as u64;
    metadata.used_fallback = outcome.used_fallback;

    Timetable {
        schedule: outcome.records,
        logs,
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        DayPair, MeetingKind, Program, Room, RoomId, SectionId, Subject, SubjectCode, Teacher,
        TeacherId, Weekday,
    };
    use std::collections::BTreeMap;

    fn subject(code: &str, program: Program, year: u8, lecture: f32, lab: f32) -> Subject {
        Subject {
            code: SubjectCode(code.to_string()),
            name: format!("{code} name"),
            program,
            available_programs: vec![],
            year_level: year,
            semester: 1,
            lecture_hours_per_week: lecture,
            lab_hours_per_week: lab,
        }
    }

    fn teacher(id: &str, codes: &[&str], days: &[Weekday]) -> Teacher {
        Teacher {
            id: TeacherId(id.to_string()),
            name: format!("Teacher {id}"),
            can_teach: codes.iter().map(|c| SubjectCode(c.to_string())).collect(),
            availability_days: days.to_vec(),
        }
    }

    fn room(id: &str, name: &str, is_laboratory: bool) -> Room {
        Room {
            id: RoomId(id.to_string()),
            name: name.to_string(),
            is_laboratory,
        }
    }

    fn request_with(
        subjects: Vec<Subject>,
        teachers: Vec<Teacher>,
        rooms: Vec<Room>,
        counts: &[(Program, u8, u32)],
    ) -> SolveRequest {
        let mut program_sections: BTreeMap<Program, BTreeMap<u8, u32>> = BTreeMap::new();
        let mut programs = Vec::new();
        for &(program, year, count) in counts {
            program_sections
                .entry(program)
                .or_default()
                .insert(year, count);
            if !programs.contains(&program) {
                programs.push(program);
            }
        }
        SolveRequest {
            subjects,
            teachers,
            rooms,
            semester_filter: Some(1),
            program_sections,
            programs,
        }
    }

    fn assert_no_conflicts(timetable: &Timetable) {
        assert!(
            timetable
                .logs
                .iter()
                .any(|l| l.contains("No conflicts found")),
            "expected a clean validation pass, logs: {:?}",
            timetable.logs
        );
    }

    fn is_day_pair(first: Weekday, second: Weekday) -> bool {
        DayPair::ALL
            .iter()
            .any(|p| p.first() == first && p.second() == second)
    }

    #[test]
    fn test_minimal_feasible_schedule() {
        let request = request_with(
            vec![subject("CS1", Program::CS, 1, 3.0, 0.0)],
            vec![teacher("t1", &["CS1"], &Weekday::ALL)],
            vec![room("r1", "Room 204", false)],
            &[(Program::CS, 1, 1)],
        );

        let timetable = generate_timetable(&request, &SolverConfig::default(), true);

        assert_eq!(timetable.schedule.len(), 2);
        assert!(!timetable.metadata.used_fallback);
        for record in &timetable.schedule {
            assert_eq!(record.section_id, SectionId("CS1A".to_string()));
            assert_eq!(record.kind, MeetingKind::NonLab);
            assert_eq!(record.duration_slots, 3);
            assert_eq!(record.teacher_name, "Teacher t1");
            assert_eq!(record.room_name, "Room 204");
        }
        assert!(is_day_pair(
            timetable.schedule[0].day,
            timetable.schedule[1].day
        ));
        assert_no_conflicts(&timetable);
    }

    #[test]
    fn test_lecture_and_lab_land_on_one_day_pair() {
        let request = request_with(
            vec![subject("CS3", Program::CS, 2, 2.0, 3.0)],
            vec![teacher("t1", &["CS3"], &Weekday::ALL)],
            vec![
                room("r1", "Room 204", false),
                room("l1", "Computer Lab 1", true),
            ],
            &[(Program::CS, 2, 1)],
        );

        let timetable = generate_timetable(&request, &SolverConfig::default(), true);

        assert_eq!(timetable.schedule.len(), 2);
        let lecture = &timetable.schedule[0];
        let lab = &timetable.schedule[1];

        assert_eq!(lecture.kind, MeetingKind::Lecture);
        assert_eq!(lecture.duration_slots, 4);
        assert_eq!(lecture.room_name, "Room 204");
        assert_eq!(lab.kind, MeetingKind::Lab);
        assert_eq!(lab.duration_slots, 6);
        assert_eq!(lab.room_name, "Computer Lab 1");
        assert_eq!(lecture.teacher_name, lab.teacher_name);
        assert!(is_day_pair(lecture.day, lab.day));
        assert_no_conflicts(&timetable);
    }

    #[test]
    fn test_cisco_lab_is_exclusive_to_networking_subjects() {
        let request = request_with(
            vec![
                subject("CS14", Program::CS, 1, 2.0, 3.0),
                subject("CS2", Program::CS, 1, 3.0, 0.0),
            ],
            vec![teacher("t1", &["CS14", "CS2"], &Weekday::ALL)],
            vec![
                room("r1", "Room 204", false),
                room("r2", "Room 205", false),
                room("cisco", "Cisco Lab", true),
                room("l1", "Computer Lab 1", true),
            ],
            &[(Program::CS, 1, 1)],
        );

        let timetable = generate_timetable(&request, &SolverConfig::default(), true);
        assert_eq!(timetable.schedule.len(), 4);

        for record in &timetable.schedule {
            let in_cisco = record.room_name.to_lowercase().contains("cisco");
            if record.subject_code == SubjectCode("CS14".to_string()) {
                assert!(in_cisco, "networking subject must sit in the Cisco lab");
            } else {
                assert!(!in_cisco, "non-networking subject must stay out of the Cisco lab");
            }
        }
        assert_no_conflicts(&timetable);
    }

    #[test]
    fn test_gymnasium_is_shared_by_pe_sections() {
        let request = request_with(
            vec![subject("PE1", Program::CS, 1, 2.0, 0.0)],
            vec![
                teacher("t1", &["PE1"], &Weekday::ALL),
                teacher("t2", &["PE1"], &Weekday::ALL),
            ],
            vec![room("gym", "LPU_Gymnasium", false), room("r1", "Room 204", false)],
            &[(Program::CS, 1, 2)],
        );

        let timetable = generate_timetable(&request, &SolverConfig::default(), true);

        // PE1 is single-session: one meeting per section
        assert_eq!(timetable.schedule.len(), 2);
        for record in &timetable.schedule {
            assert_eq!(record.duration_slots, 4);
            assert!(record.room_name.to_lowercase().contains("gymnasium"));
        }
        assert_no_conflicts(&timetable);
    }

    #[test]
    fn test_restricted_teacher_pulls_lecture_and_lab_onto_one_day() {
        let request = request_with(
            vec![subject("CS3", Program::CS, 2, 1.0, 2.0)],
            vec![teacher("t1", &["CS3"], &[Weekday::Wed])],
            vec![
                room("r1", "Room 204", false),
                room("l1", "Computer Lab 1", true),
            ],
            &[(Program::CS, 2, 1)],
        );

        let timetable = generate_timetable(&request, &SolverConfig::default(), true);

        assert_eq!(timetable.schedule.len(), 2);
        assert!(!timetable.metadata.used_fallback);
        for record in &timetable.schedule {
            assert_eq!(record.day, Weekday::Wed);
        }
        assert_no_conflicts(&timetable);
    }

    #[test]
    fn test_programs_coexist_without_section_conflicts() {
        let request = request_with(
            vec![
                subject("CS1", Program::CS, 1, 1.5, 0.0),
                subject("IT1", Program::IT, 1, 1.5, 0.0),
            ],
            vec![
                teacher("t1", &["CS1"], &Weekday::ALL),
                teacher("t2", &["IT1"], &Weekday::ALL),
            ],
            vec![room("r1", "Room 204", false), room("r2", "Room 205", false)],
            &[(Program::CS, 1, 1), (Program::IT, 1, 1)],
        );

        let timetable = generate_timetable(&request, &SolverConfig::default(), true);

        assert_eq!(timetable.schedule.len(), 2);
        let sections: Vec<&str> = timetable
            .schedule
            .iter()
            .map(|r| r.section_id.0.as_str())
            .collect();
        assert!(sections.contains(&"CS1A"));
        assert!(sections.contains(&"IT1A"));
        assert_no_conflicts(&timetable);
    }

    #[test]
    fn test_zero_demand_returns_empty_schedule() {
        let request = request_with(
            vec![subject("CS1", Program::CS, 1, 3.0, 0.0)],
            vec![teacher("t1", &["CS1"], &Weekday::ALL)],
            vec![room("r1", "Room 204", false)],
            &[(Program::CS, 1, 0)],
        );

        let timetable = generate_timetable(&request, &SolverConfig::default(), true);
        assert!(timetable.is_empty());
        assert!(!timetable.logs.is_empty());
    }

    #[test]
    fn test_unsatisfiable_primary_model_falls_back() {
        // A teacher with no available day at all makes the primary model
        // infeasible; the fallback drops availability and pairing
        let request = request_with(
            vec![subject("CS3", Program::CS, 2, 2.0, 3.0)],
            vec![teacher("t1", &["CS3"], &[])],
            vec![
                room("r1", "Room 204", false),
                room("l1", "Computer Lab 1", true),
            ],
            &[(Program::CS, 2, 1)],
        );

        let timetable = generate_timetable(&request, &SolverConfig::default(), true);

        assert_eq!(timetable.schedule.len(), 2);
        assert!(timetable.metadata.used_fallback);
        assert!(timetable
            .logs
            .iter()
            .any(|l| l.contains("FALLBACK solver result")));
    }

    #[test]
    fn test_schedule_order_matches_expansion_order() {
        let request = request_with(
            vec![
                subject("CS1", Program::CS, 1, 1.5, 0.0),
                subject("CS2", Program::CS, 1, 1.5, 0.0),
            ],
            vec![teacher("t1", &["CS1", "CS2"], &Weekday::ALL)],
            vec![room("r1", "Room 204", false)],
            &[(Program::CS, 1, 1)],
        );

        let expansion = expand_demand(&request);
        let timetable = generate_timetable(&request, &SolverConfig::default(), true);

        let expanded: Vec<_> = expansion
            .events
            .iter()
            .map(|e| (e.section_id.clone(), e.subject_code.clone()))
            .collect();
        let emitted: Vec<_> = timetable
            .schedule
            .iter()
            .map(|r| (r.section_id.clone(), r.subject_code.clone()))
            .collect();
        assert_eq!(expanded, emitted);
    }
}
