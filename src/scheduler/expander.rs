use crate::scheduler::eligibility::{eligible_rooms, eligible_teachers};
use crate::types::{
    CohortSection, MeetingEvent, MeetingKind, SolveRequest, SubjectCode, SLOTS_PER_DAY,
};
use log::debug;
use std::collections::HashSet;

/// Subjects that must meet once per week even when their load would split
pub const SINGLE_SESSION_SUBJECTS: [&str; 6] = ["BSC1", "BSC2", "PE1", "PE2", "PE3", "PE4"];

fn is_single_session(code: &SubjectCode) -> bool {
    SINGLE_SESSION_SUBJECTS.iter().any(|c| code.matches(c))
}

/// Outcome of demand expansion: the cohorts that materialized and the
/// meeting events to be scheduled, in construction order
#[derive(Debug, Clone, Default)]
pub struct Expansion {
    pub cohorts: Vec<CohortSection>,
    pub events: Vec<MeetingEvent>,
    pub logs: Vec<String>,
}

/// Expand (programs x years x section counts) into cohort sections and
/// their per-subject meeting events.
///
/// Expansion is deterministic: identical requests yield the identical event
/// list in the same order.
pub fn expand_demand(request: &SolveRequest) -> Expansion {
    let mut expansion = Expansion::default();

    // Years that actually have curriculum for a requested program; demand
    // for other years is dropped rather than producing empty cohorts
    let available_years: HashSet<u8> = request
        .subjects
        .iter()
        .filter(|s| request.programs.iter().any(|p| s.offered_to(*p)))
        .map(|s| s.year_level)
        .collect();

    for program in &request.programs {
        let Some(section_counts) = request.program_sections.get(program) else {
            continue;
        };

        for (&year_level, &num_sections) in section_counts {
            if num_sections == 0 {
                debug!("Skipping {program} year {year_level} - no sections requested");
                continue;
            }
            if !available_years.contains(&year_level) {
                expansion.logs.push(format!(
                    "Skipping {} Year {} - no curriculum available",
                    program, year_level
                ));
                continue;
            }

            for section_idx in 0..num_sections {
                expansion.cohorts.push(CohortSection::new(
                    *program,
                    year_level,
                    section_idx,
                    request.semester_filter,
                ));
            }
        }
    }

    if expansion.cohorts.is_empty() {
        expansion.logs.push(
            "Scheduler: no cohort sections generated for the requested years and semester"
                .to_string(),
        );
        return expansion;
    }

    for cohort in expansion.cohorts.clone() {
        let relevant_subjects: Vec<_> = request
            .subjects
            .iter()
            .filter(|s| {
                s.year_level == cohort.year_level
                    && cohort.semester.map_or(true, |sem| s.semester == sem)
                    && s.offered_to(cohort.program)
            })
            .collect();

        if relevant_subjects.is_empty() {
            expansion.logs.push(format!(
                "Warning: no subjects for cohort {} (year {}, semester {}); demand adjusted to skip this cohort",
                cohort.id,
                cohort.year_level,
                cohort
                    .semester
                    .map_or_else(|| "all".to_string(), |s| s.to_string())
            ));
            continue;
        }

        for subject in relevant_subjects {
            let valid_teachers = eligible_teachers(subject, &request.teachers);
            if valid_teachers.is_empty() {
                expansion.logs.push(format!(
                    "Warning: Skipping {} for {} due to no qualified teachers",
                    subject.code, cohort.id
                ));
                continue;
            }

            let rooms = eligible_rooms(&subject.code, &request.rooms, &mut expansion.logs);
            let mut lecture_slots = subject.lecture_slots();
            let mut lab_slots = subject.lab_slots();

            // A component longer than the day horizon can never be placed
            if lecture_slots > SLOTS_PER_DAY {
                expansion.logs.push(format!(
                    "Warning: Skipping {} lecture for {}; {} slots exceed the day horizon",
                    subject.code, cohort.id, lecture_slots
                ));
                lecture_slots = 0;
            }
            if lab_slots > SLOTS_PER_DAY {
                expansion.logs.push(format!(
                    "Warning: Skipping {} lab for {}; {} slots exceed the day horizon",
                    subject.code, cohort.id, lab_slots
                ));
                lab_slots = 0;
            }
            if lecture_slots == 0 && lab_slots == 0 {
                continue;
            }

            if subject.is_lab_subject() {
                if lecture_slots > 0 && rooms.lecture.is_empty() {
                    expansion.logs.push(format!(
                        "Warning: Skipping {} lecture for {} due to no matching lecture rooms",
                        subject.code, cohort.id
                    ));
                    lecture_slots = 0;
                }
                if lab_slots > 0 && rooms.lab.is_empty() {
                    expansion.logs.push(format!(
                        "Warning: Skipping {} lab for {} due to no matching lab rooms",
                        subject.code, cohort.id
                    ));
                    lab_slots = 0;
                }
                if lecture_slots == 0 && lab_slots == 0 {
                    continue;
                }

                if lecture_slots > 0 {
                    expansion.events.push(MeetingEvent {
                        section_id: cohort.id.clone(),
                        subject_code: subject.code.clone(),
                        kind: MeetingKind::Lecture,
                        duration_slots: lecture_slots,
                        meeting_idx: 0,
                        valid_teachers: valid_teachers.clone(),
                        valid_rooms: rooms.lecture.clone(),
                    });
                }
                if lab_slots > 0 {
                    expansion.events.push(MeetingEvent {
                        section_id: cohort.id.clone(),
                        subject_code: subject.code.clone(),
                        kind: MeetingKind::Lab,
                        duration_slots: lab_slots,
                        meeting_idx: 1,
                        valid_teachers,
                        valid_rooms: rooms.lab,
                    });
                }
            } else {
                if lecture_slots == 0 {
                    continue;
                }
                if rooms.lecture.is_empty() {
                    expansion.logs.push(format!(
                        "Warning: Skipping {} for {} due to no matching lecture rooms",
                        subject.code, cohort.id
                    ));
                    continue;
                }

                // Even loads split into two meetings placed across a day
                // pair; single-session subjects always meet once
                if lecture_slots % 2 == 0 && lecture_slots >= 2 && !is_single_session(&subject.code)
                {
                    let half_slots = lecture_slots / 2;
                    for meeting_idx in 0..2u8 {
                        expansion.events.push(MeetingEvent {
                            section_id: cohort.id.clone(),
                            subject_code: subject.code.clone(),
                            kind: MeetingKind::NonLab,
                            duration_slots: half_slots,
                            meeting_idx,
                            valid_teachers: valid_teachers.clone(),
                            valid_rooms: rooms.lecture.clone(),
                        });
                    }
                } else {
                    expansion.events.push(MeetingEvent {
                        section_id: cohort.id.clone(),
                        subject_code: subject.code.clone(),
                        kind: MeetingKind::NonLab,
                        duration_slots: lecture_slots,
                        meeting_idx: 0,
                        valid_teachers,
                        valid_rooms: rooms.lecture,
                    });
                }
            }
        }
    }

    expansion
}
