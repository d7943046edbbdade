use crate::scheduler::model::{
    add_availability_constraints, add_domain_constraints, add_group_constraints,
    add_preference_constraints, add_separation_constraints, declare_event_vars, declare_group_vars,
    declare_pair_vars, declare_preference_vars, room_preference_objective, EventVars, ModelContext,
};
use crate::types::{
    slot_label, MeetingEvent, MeetingRecord, Room, SolverConfig, Subject, SubjectCode, Teacher,
    Weekday,
};
use good_lp::{Expression, ProblemVariables, ResolutionError, Solution, SolverModel};
use log::info;
use std::collections::BTreeMap;

/// Result of the solve pipeline: decoded records plus which model produced
/// them
pub struct SolveOutcome {
    pub records: Vec<MeetingRecord>,
    pub used_fallback: bool,
}

/// Run the primary model, falling back to the reduced model on failure.
///
/// Returns None only when both models fail; infeasibility never raises.
pub fn solve_events(
    events: &[MeetingEvent],
    subjects: &[Subject],
    teachers: &[Teacher],
    rooms: &[Room],
    config: &SolverConfig,
    logs: &mut Vec<String>,
) -> Option<SolveOutcome> {
    let ctx = ModelContext::new(events, teachers, rooms);

    logs.push("Scheduler: Adding constraints...".to_string());
    info!("building primary model for {} meeting events", events.len());

    let mut vars = ProblemVariables::new();
    let event_vars = declare_event_vars(&ctx, &mut vars);
    let pairs = declare_pair_vars(&ctx, &mut vars, true);
    let groups = declare_group_vars(&ctx, &mut vars);
    let prefs = declare_preference_vars(&ctx, &mut vars);
    let objective = room_preference_objective(&prefs, config.room_preference_weight);

    let mut problem = vars
        .maximise(objective)
        .using(good_lp::solvers::highs::highs)
        .set_option("time_limit", config.primary_time_limit_secs)
        .set_option("parallel", "on")
        .set_option("threads", config.threads as i32)
        .set_option("presolve", "on");
    problem = add_domain_constraints(problem, &event_vars);
    problem = add_separation_constraints(problem, &ctx, &event_vars, &pairs);
    problem = add_availability_constraints(problem, &ctx, &event_vars);
    problem = add_group_constraints(problem, &event_vars, &groups);
    problem = add_preference_constraints(problem, &event_vars, &prefs);

    logs.push("Scheduler: Solving...".to_string());
    match problem.solve() {
        Ok(solution) => {
            logs.push("Scheduler: Using MAIN solver result".to_string());
            let records = decode(&ctx, subjects, &event_vars, &solution, logs);
            return Some(SolveOutcome {
                records,
                used_fallback: false,
            });
        }
        Err(ResolutionError::Infeasible) => {
            logs.push("Scheduler: Problem is infeasible - constraints are too strict".to_string());
        }
        Err(other) => {
            // Time-limit and other terminations count as infeasibility
            logs.push(format!("Scheduler: Primary solve failed: {other}"));
        }
    }

    logs.push(
        "Scheduler: No feasible solution found. Retrying without overlap constraints..."
            .to_string(),
    );
    info!("primary model failed; building reduced fallback model");

    // Fallback keeps only teacher and same-section no-overlap plus the
    // variable domains; room exclusivity stays encoded in the domains
    let mut vars = ProblemVariables::new();
    let event_vars = declare_event_vars(&ctx, &mut vars);
    let pairs = declare_pair_vars(&ctx, &mut vars, false);

    let mut problem = vars
        .maximise(Expression::from(0.0))
        .using(good_lp::solvers::highs::highs)
        .set_option("time_limit", config.fallback_time_limit_secs)
        .set_option("parallel", "on")
        .set_option("threads", config.threads as i32);
    problem = add_domain_constraints(problem, &event_vars);
    problem = add_separation_constraints(problem, &ctx, &event_vars, &pairs);

    match problem.solve() {
        Ok(solution) => {
            logs.push("Scheduler: Using FALLBACK solver result".to_string());
            let records = decode(&ctx, subjects, &event_vars, &solution, logs);
            Some(SolveOutcome {
                records,
                used_fallback: true,
            })
        }
        Err(e) => {
            logs.push(format!(
                "Scheduler: No feasible solution found even after fallback ({e})"
            ));
            None
        }
    }
}

/// Convert variable assignments into fully-populated meeting records, in
/// event construction order
fn decode(
    ctx: &ModelContext,
    subjects: &[Subject],
    event_vars: &[EventVars],
    solution: &impl Solution,
    logs: &mut Vec<String>,
) -> Vec<MeetingRecord> {
    let subject_names: BTreeMap<&SubjectCode, &str> = subjects
        .iter()
        .map(|s| (&s.code, s.name.as_str()))
        .collect();

    let mut records = Vec::new();
    for (event, vars) in ctx.events.iter().zip(event_vars) {
        let Some((day, start, teacher_idx, room_idx)) = decode_event(vars, solution) else {
            logs.push(format!(
                "Warning: dropping undecodable assignment for {} {}",
                event.section_id, event.subject_code
            ));
            continue;
        };

        records.push(MeetingRecord {
            section_id: event.section_id.clone(),
            subject_code: event.subject_code.clone(),
            subject_name: subject_names
                .get(&event.subject_code)
                .map(|n| n.to_string())
                .unwrap_or_else(|| event.subject_code.0.clone()),
            kind: event.kind,
            teacher_name: ctx.teachers[teacher_idx].name.clone(),
            room_name: ctx.rooms[room_idx].name.clone(),
            day,
            start_time_slot: slot_label(start),
            duration_slots: event.duration_slots,
        });
    }

    records
}

fn decode_event(vars: &EventVars, solution: &impl Solution) -> Option<(Weekday, usize, usize, usize)> {
    let day_idx = vars.day.iter().position(|v| solution.value(*v) > 0.5)?;
    let day = Weekday::from_index(day_idx)?;

    let start = solution.value(vars.start).round().max(0.0) as usize;

    let teacher_idx = vars
        .teacher
        .iter()
        .find(|(_, v)| solution.value(*v) > 0.5)
        .map(|(t, _)| *t)?;
    let room_idx = vars
        .room
        .iter()
        .find(|(_, v)| solution.value(*v) > 0.5)
        .map(|(r, _)| *r)?;

    Some((day, start, teacher_idx, room_idx))
}
