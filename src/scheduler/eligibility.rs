use crate::types::{Room, RoomId, Subject, SubjectCode, Teacher, TeacherId};

/// Subjects bound to the Cisco laboratory for both lecture and lab sessions
pub const NETWORKING_SUBJECTS: [&str; 8] = [
    "CS6", "CS10", "CS14", "CS21", "IT6", "IT11", "IT15", "IT20",
];

/// Subjects bound to the gymnasium
pub const PE_SUBJECTS: [&str; 4] = ["PE1", "PE2", "PE3", "PE4"];

/// Subjects whose lab sessions run in regular rooms (no computers needed)
pub const PHYSICS_SUBJECTS: [&str; 2] = ["PHYS1", "PHYS2"];

fn code_in(code: &SubjectCode, list: &[&str]) -> bool {
    list.iter().any(|candidate| code.matches(candidate))
}

pub fn is_networking_subject(code: &SubjectCode) -> bool {
    code_in(code, &NETWORKING_SUBJECTS)
}

pub fn is_pe_subject(code: &SubjectCode) -> bool {
    code_in(code, &PE_SUBJECTS)
}

pub fn is_physics_subject(code: &SubjectCode) -> bool {
    code_in(code, &PHYSICS_SUBJECTS)
}

/// Teachers whose teach-set contains the subject code
pub fn eligible_teachers(subject: &Subject, teachers: &[Teacher]) -> Vec<TeacherId> {
    teachers
        .iter()
        .filter(|t| t.teaches(&subject.code))
        .map(|t| t.id.clone())
        .collect()
}

/// Admissible rooms for a subject's lecture and lab components
#[derive(Debug, Clone, Default)]
pub struct RoomSets {
    pub lecture: Vec<RoomId>,
    pub lab: Vec<RoomId>,
}

/// Apply the room exclusivity rules for one subject.
///
/// Networking subjects get the Cisco lab exclusively, PE subjects the
/// gymnasium; everything else is barred from both. Physics labs run in
/// regular rooms. When a ruled-in set does not exist in the inventory the
/// rule is logged and the default sets are kept.
pub fn eligible_rooms(code: &SubjectCode, rooms: &[Room], logs: &mut Vec<String>) -> RoomSets {
    let mut lecture: Vec<RoomId> = rooms
        .iter()
        .filter(|r| !r.is_laboratory)
        .map(|r| r.id.clone())
        .collect();
    let mut lab: Vec<RoomId> = rooms
        .iter()
        .filter(|r| r.is_laboratory)
        .map(|r| r.id.clone())
        .collect();

    let cisco_rooms: Vec<RoomId> = rooms
        .iter()
        .filter(|r| r.is_cisco_lab())
        .map(|r| r.id.clone())
        .collect();
    if is_networking_subject(code) {
        if cisco_rooms.is_empty() {
            logs.push(format!(
                "Warning: Cisco Lab not found for networking subject {}",
                code
            ));
        } else {
            lecture = cisco_rooms.clone();
            lab = cisco_rooms.clone();
        }
    } else {
        lecture.retain(|r| !cisco_rooms.contains(r));
        lab.retain(|r| !cisco_rooms.contains(r));
    }

    let gym_rooms: Vec<RoomId> = rooms
        .iter()
        .filter(|r| r.is_gymnasium())
        .map(|r| r.id.clone())
        .collect();
    if is_pe_subject(code) {
        if gym_rooms.is_empty() {
            logs.push(format!("Warning: Gymnasium not found for PE subject {}", code));
        } else {
            lecture = gym_rooms.clone();
            lab = gym_rooms;
        }
    } else {
        lecture.retain(|r| !gym_rooms.contains(r));
        lab.retain(|r| !gym_rooms.contains(r));
    }

    // Physics labs need no computers; any regular non-gym room will do
    if is_physics_subject(code) {
        lab = rooms
            .iter()
            .filter(|r| !r.is_laboratory && !r.is_gymnasium())
            .map(|r| r.id.clone())
            .collect();
    }

    RoomSets { lecture, lab }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Program;

    fn room(id: &str, name: &str, is_laboratory: bool) -> Room {
        Room {
            id: RoomId(id.to_string()),
            name: name.to_string(),
            is_laboratory,
        }
    }

    fn inventory() -> Vec<Room> {
        vec![
            room("r1", "Room 204", false),
            room("r2", "Room 205", false),
            room("l1", "Computer Lab 1", true),
            room("cisco", "Cisco Lab", true),
            room("gym", "LPU_Gymnasium", false),
        ]
    }

    fn code(s: &str) -> SubjectCode {
        SubjectCode(s.to_string())
    }

    #[test]
    fn test_networking_subject_is_cisco_exclusive() {
        let mut logs = Vec::new();
        let sets = eligible_rooms(&code("CS14"), &inventory(), &mut logs);

        assert_eq!(sets.lecture, vec![RoomId("cisco".to_string())]);
        assert_eq!(sets.lab, vec![RoomId("cisco".to_string())]);
        assert!(logs.is_empty());
    }

    #[test]
    fn test_other_subjects_are_barred_from_cisco_and_gym() {
        let mut logs = Vec::new();
        let sets = eligible_rooms(&code("CS1"), &inventory(), &mut logs);

        assert_eq!(
            sets.lecture,
            vec![RoomId("r1".to_string()), RoomId("r2".to_string())]
        );
        assert_eq!(sets.lab, vec![RoomId("l1".to_string())]);
    }

    #[test]
    fn test_missing_cisco_falls_back_to_defaults_with_log() {
        let rooms = vec![room("r1", "Room 204", false), room("l1", "Computer Lab 1", true)];
        let mut logs = Vec::new();
        let sets = eligible_rooms(&code("IT15"), &rooms, &mut logs);

        assert_eq!(sets.lecture, vec![RoomId("r1".to_string())]);
        assert_eq!(sets.lab, vec![RoomId("l1".to_string())]);
        assert!(logs.iter().any(|l| l.contains("Cisco Lab not found")));
    }

    #[test]
    fn test_pe_subject_is_gym_exclusive() {
        let mut logs = Vec::new();
        let sets = eligible_rooms(&code("PE1"), &inventory(), &mut logs);

        assert_eq!(sets.lecture, vec![RoomId("gym".to_string())]);
        assert_eq!(sets.lab, vec![RoomId("gym".to_string())]);
    }

    #[test]
    fn test_physics_labs_use_regular_rooms() {
        let mut logs = Vec::new();
        let sets = eligible_rooms(&code("PHYS1"), &inventory(), &mut logs);

        assert_eq!(
            sets.lab,
            vec![RoomId("r1".to_string()), RoomId("r2".to_string())]
        );
        assert_eq!(
            sets.lecture,
            vec![RoomId("r1".to_string()), RoomId("r2".to_string())]
        );
    }

    #[test]
    fn test_teacher_eligibility_by_teach_set() {
        let subject = Subject {
            code: code("CS14"),
            name: "Networking 2".to_string(),
            program: Program::CS,
            available_programs: vec![],
            year_level: 2,
            semester: 1,
            lecture_hours_per_week: 2.0,
            lab_hours_per_week: 3.0,
        };
        let teachers = vec![
            Teacher {
                id: TeacherId("t1".to_string()),
                name: "A".to_string(),
                can_teach: vec![code("CS14"), code("CS1")],
                availability_days: crate::types::Weekday::ALL.to_vec(),
            },
            Teacher {
                id: TeacherId("t2".to_string()),
                name: "B".to_string(),
                can_teach: vec![code("IT6")],
                availability_days: crate::types::Weekday::ALL.to_vec(),
            },
        ];

        assert_eq!(
            eligible_teachers(&subject, &teachers),
            vec![TeacherId("t1".to_string())]
        );
    }
}
