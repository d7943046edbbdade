use class_timetabler::scheduler::expand_demand;
use class_timetabler::types::{
    Program, Room, RoomId, SolveRequest, Subject, SubjectCode, Teacher, TeacherId, Weekday,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::BTreeMap;

fn demo_request() -> SolveRequest {
    let mut subjects = Vec::new();
    for year in 1..=4u8 {
        for n in 1..=6u8 {
            subjects.push(Subject {
                code: SubjectCode(format!("CS{}{}", year, n)),
                name: format!("CS subject {}-{}", year, n),
                program: Program::CS,
                available_programs: vec![],
                year_level: year,
                semester: 1,
                lecture_hours_per_week: 2.0,
                lab_hours_per_week: if n % 2 == 0 { 3.0 } else { 0.0 },
            });
        }
    }

    let teachers = (0..10)
        .map(|i| Teacher {
            id: TeacherId(format!("t{i}")),
            name: format!("Teacher {i}"),
            can_teach: subjects
                .iter()
                .skip(i % 4)
                .step_by(2)
                .map(|s| s.code.clone())
                .collect(),
            availability_days: Weekday::ALL.to_vec(),
        })
        .collect();

    let rooms = vec![
        Room {
            id: RoomId("r1".to_string()),
            name: "Room 201".to_string(),
            is_laboratory: false,
        },
        Room {
            id: RoomId("r2".to_string()),
            name: "Room 202".to_string(),
            is_laboratory: false,
        },
        Room {
            id: RoomId("l1".to_string()),
            name: "Computer Lab 1".to_string(),
            is_laboratory: true,
        },
    ];

    let mut program_sections = BTreeMap::new();
    program_sections.insert(
        Program::CS,
        BTreeMap::from([(1, 3), (2, 2), (3, 2), (4, 1)]),
    );

    SolveRequest {
        subjects,
        teachers,
        rooms,
        semester_filter: Some(1),
        program_sections,
        programs: vec![Program::CS],
    }
}

fn bench_expand_demand(c: &mut Criterion) {
    let request = demo_request();
    c.bench_function("expand_demand", |b| {
        b.iter(|| expand_demand(black_box(&request)))
    });
}

criterion_group!(benches, bench_expand_demand);
criterion_main!(benches);
