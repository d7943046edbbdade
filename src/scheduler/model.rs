use crate::types::{
    DayPair, MeetingEvent, MeetingKind, Room, RoomId, SectionId, SubjectCode, Teacher, TeacherId,
    Weekday, SLOTS_PER_DAY,
};
use good_lp::{constraint, variable, Expression, ProblemVariables, SolverModel, Variable};
use itertools::Itertools;
use std::collections::BTreeMap;

/// Big-M for start-time separation; starts and durations live in [0, 22]
const HORIZON: f64 = SLOTS_PER_DAY as f64;

/// Read-only lookup context shared by model construction and decoding
pub struct ModelContext<'a> {
    pub events: &'a [MeetingEvent],
    pub teachers: &'a [Teacher],
    pub rooms: &'a [Room],
    teacher_index: BTreeMap<&'a TeacherId, usize>,
    room_index: BTreeMap<&'a RoomId, usize>,
}

impl<'a> ModelContext<'a> {
    pub fn new(events: &'a [MeetingEvent], teachers: &'a [Teacher], rooms: &'a [Room]) -> Self {
        Self {
            events,
            teachers,
            rooms,
            teacher_index: teachers.iter().enumerate().map(|(i, t)| (&t.id, i)).collect(),
            room_index: rooms.iter().enumerate().map(|(i, r)| (&r.id, i)).collect(),
        }
    }

    pub fn teacher_index(&self, id: &TeacherId) -> Option<usize> {
        self.teacher_index.get(id).copied()
    }

    pub fn room_index(&self, id: &RoomId) -> Option<usize> {
        self.room_index.get(id).copied()
    }
}

/// Decision variables for one meeting event: an integer start slot plus
/// one-hot selectors for day, teacher, and room
pub struct EventVars {
    pub start: Variable,
    /// One binary per weekday, indexed by day index
    pub day: Vec<Variable>,
    /// (global teacher index, selector) over the event's valid teachers
    pub teacher: Vec<(usize, Variable)>,
    /// (global room index, selector) over the event's valid rooms
    pub room: Vec<(usize, Variable)>,
}

impl EventVars {
    fn teacher_var(&self, global_idx: usize) -> Option<Variable> {
        self.teacher
            .iter()
            .find(|(t, _)| *t == global_idx)
            .map(|(_, v)| *v)
    }

    fn room_var(&self, global_idx: usize) -> Option<Variable> {
        self.room
            .iter()
            .find(|(r, _)| *r == global_idx)
            .map(|(_, v)| *v)
    }
}

/// Indicator variables for one unordered event pair that may need time
/// separation. `before` means event i ends on or before j starts.
pub struct PairVars {
    pub same_day: Variable,
    pub same_teacher: Option<Variable>,
    pub before: Variable,
    pub after: Variable,
}

/// One event pair together with the conditions that can force separation
pub struct PairSeparation {
    pub i: usize,
    pub j: usize,
    /// Global teacher indices both events could be assigned
    pub shared_teachers: Vec<usize>,
    /// Global indices of non-gymnasium rooms both events could occupy
    pub shared_rooms: Vec<usize>,
    pub same_section: bool,
    pub vars: PairVars,
}

/// Day placement choice for a (section, subject) group of two meetings
pub enum GroupDayChoice {
    /// Full-availability teacher: pick exactly one day pair, first meeting
    /// on its first day, second meeting on its second day
    Paired(Vec<(DayPair, Variable)>),
    /// Restricted teacher: drop pairing, pick exactly one available day and
    /// put both meetings on it
    SingleDay(Vec<(Weekday, Variable)>),
}

/// Constraint material for one (section, subject) group with two meetings
pub struct GroupVars {
    pub first_idx: usize,
    pub second_idx: usize,
    pub members: Vec<usize>,
    pub choice: GroupDayChoice,
}

/// Soft room-distribution preference for one event
pub struct RoomPreference {
    pub event_idx: usize,
    pub room_global_idx: usize,
    pub var: Variable,
}

pub fn declare_event_vars(ctx: &ModelContext, vars: &mut ProblemVariables) -> Vec<EventVars> {
    ctx.events
        .iter()
        .map(|event| EventVars {
            start: vars.add(
                variable()
                    .integer()
                    .min(0)
                    .max(event.latest_start() as f64),
            ),
            day: (0..Weekday::ALL.len())
                .map(|_| vars.add(variable().binary()))
                .collect(),
            teacher: event
                .valid_teachers
                .iter()
                .filter_map(|id| ctx.teacher_index(id))
                .map(|t| (t, vars.add(variable().binary())))
                .collect(),
            room: event
                .valid_rooms
                .iter()
                .filter_map(|id| ctx.room_index(id))
                .map(|r| (r, vars.add(variable().binary())))
                .collect(),
        })
        .collect()
}

/// Declare indicators for every pair that any no-overlap rule can touch.
/// With `include_rooms` false (the fallback model) only shared teachers and
/// same-section membership bring a pair into scope.
pub fn declare_pair_vars(
    ctx: &ModelContext,
    vars: &mut ProblemVariables,
    include_rooms: bool,
) -> Vec<PairSeparation> {
    let mut pairs = Vec::new();

    for (i, j) in (0..ctx.events.len()).tuple_combinations() {
        let (a, b) = (&ctx.events[i], &ctx.events[j]);

        let shared_teachers: Vec<usize> = a
            .valid_teachers
            .iter()
            .filter(|t| b.valid_teachers.contains(t))
            .filter_map(|t| ctx.teacher_index(t))
            .collect();

        // The gymnasium hosts several PE classes at once, so it never
        // forces separation
        let shared_rooms: Vec<usize> = if include_rooms {
            a.valid_rooms
                .iter()
                .filter(|r| b.valid_rooms.contains(r))
                .filter_map(|r| ctx.room_index(r))
                .filter(|&r| !ctx.rooms[r].is_gymnasium())
                .collect()
        } else {
            Vec::new()
        };

        let same_section = a.section_id == b.section_id;

        if shared_teachers.is_empty() && shared_rooms.is_empty() && !same_section {
            continue;
        }

        let same_teacher = (!shared_teachers.is_empty()).then(|| vars.add(variable().binary()));
        pairs.push(PairSeparation {
            i,
            j,
            shared_teachers,
            shared_rooms,
            same_section,
            vars: PairVars {
                same_day: vars.add(variable().binary()),
                same_teacher,
                before: vars.add(variable().binary()),
                after: vars.add(variable().binary()),
            },
        });
    }

    pairs
}

/// Group events by (section, subject); multi-meeting groups share a teacher
/// and get day-placement constraints
pub fn group_by_subject_in_section(
    events: &[MeetingEvent],
) -> BTreeMap<(SectionId, SubjectCode), Vec<usize>> {
    let mut groups: BTreeMap<(SectionId, SubjectCode), Vec<usize>> = BTreeMap::new();
    for (idx, event) in events.iter().enumerate() {
        groups
            .entry((event.section_id.clone(), event.subject_code.clone()))
            .or_default()
            .push(idx);
    }
    groups
}

/// Declare the day-placement indicators for every two-meeting group.
///
/// Restriction detection inspects the group's first candidate teacher, as
/// the day-availability constraints on the chosen teacher still hold either
/// way.
pub fn declare_group_vars(ctx: &ModelContext, vars: &mut ProblemVariables) -> Vec<GroupVars> {
    let mut groups = Vec::new();

    for ((_, _), indices) in group_by_subject_in_section(ctx.events) {
        if indices.len() < 2 {
            continue;
        }

        let ordered = order_group_meetings(ctx.events, &indices);
        let Some((first_idx, second_idx)) = ordered else {
            continue;
        };

        let reference = ctx.events[first_idx]
            .valid_teachers
            .first()
            .and_then(|id| ctx.teacher_index(id))
            .map(|t| &ctx.teachers[t]);
        let Some(reference) = reference else {
            continue;
        };

        let choice = if reference.has_full_week() {
            let pairs = DayPair::ALL
                .iter()
                .filter(|p| p.is_available_to(&reference.availability_days))
                .map(|&p| (p, vars.add(variable().binary())))
                .collect();
            GroupDayChoice::Paired(pairs)
        } else {
            let days = reference
                .availability_days
                .iter()
                .map(|&d| (d, vars.add(variable().binary())))
                .collect();
            GroupDayChoice::SingleDay(days)
        };

        groups.push(GroupVars {
            first_idx,
            second_idx,
            members: indices,
            choice,
        });
    }

    groups
}

/// Lecture precedes lab; split meetings order by meeting_idx
fn order_group_meetings(events: &[MeetingEvent], indices: &[usize]) -> Option<(usize, usize)> {
    let lecture = indices
        .iter()
        .find(|&&i| events[i].kind == MeetingKind::Lecture);
    let lab = indices.iter().find(|&&i| events[i].kind == MeetingKind::Lab);
    if let (Some(&lecture), Some(&lab)) = (lecture, lab) {
        return Some((lecture, lab));
    }

    let non_lab: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&i| events[i].kind == MeetingKind::NonLab)
        .collect();
    if non_lab.len() == 2 {
        let first = *non_lab.iter().min_by_key(|&&i| events[i].meeting_idx)?;
        let second = *non_lab.iter().max_by_key(|&&i| events[i].meeting_idx)?;
        return Some((first, second));
    }

    None
}

/// Soft room distribution: prefer the room at index (event mod room count)
pub fn declare_preference_vars(
    ctx: &ModelContext,
    vars: &mut ProblemVariables,
) -> Vec<RoomPreference> {
    ctx.events
        .iter()
        .enumerate()
        .filter(|(_, event)| event.valid_rooms.len() > 1)
        .filter_map(|(i, event)| {
            let preferred = &event.valid_rooms[i % event.valid_rooms.len()];
            Some(RoomPreference {
                event_idx: i,
                room_global_idx: ctx.room_index(preferred)?,
                var: vars.add(variable().binary()),
            })
        })
        .collect()
}

pub fn room_preference_objective(prefs: &[RoomPreference], weight: f64) -> Expression {
    let mut objective = Expression::from(0.0);
    for pref in prefs {
        objective += weight * pref.var;
    }
    objective
}

/// Every event picks exactly one day, one teacher, and one room
pub fn add_domain_constraints<M: SolverModel>(mut model: M, event_vars: &[EventVars]) -> M {
    for ev in event_vars {
        let day_sum: Expression = ev.day.iter().copied().map(Expression::from).sum();
        model = model.with(day_sum.eq(1.0));

        let teacher_sum: Expression = ev.teacher.iter().map(|(_, v)| Expression::from(*v)).sum();
        model = model.with(teacher_sum.eq(1.0));

        let room_sum: Expression = ev.room.iter().map(|(_, v)| Expression::from(*v)).sum();
        model = model.with(room_sum.eq(1.0));
    }
    model
}

/// Channel the pair indicators and enforce the no-overlap disjunctions.
///
/// For each pair in scope: `same_day` is forced up whenever both events sit
/// on one day, `same_teacher` whenever both one-hots pick the same teacher,
/// and the big-M ordering binaries must cover every condition that demands
/// disjoint intervals.
pub fn add_separation_constraints<M: SolverModel>(
    mut model: M,
    ctx: &ModelContext,
    event_vars: &[EventVars],
    pairs: &[PairSeparation],
) -> M {
    for pair in pairs {
        let (ei, ej) = (&event_vars[pair.i], &event_vars[pair.j]);
        let di = ctx.events[pair.i].duration_slots as f64;
        let dj = ctx.events[pair.j].duration_slots as f64;

        for d in 0..Weekday::ALL.len() {
            model = model.with(constraint!(
                ei.day[d] + ej.day[d] - pair.vars.same_day <= 1.0
            ));
        }

        // before = 1 forces i to end on or before j starts (and vice versa)
        model = model.with(constraint!(
            ei.start - ej.start + HORIZON * pair.vars.before <= HORIZON - di
        ));
        model = model.with(constraint!(
            ej.start - ei.start + HORIZON * pair.vars.after <= HORIZON - dj
        ));

        if let Some(same_teacher) = pair.vars.same_teacher {
            for &t in &pair.shared_teachers {
                if let (Some(ti), Some(tj)) = (ei.teacher_var(t), ej.teacher_var(t)) {
                    model = model.with(constraint!(ti + tj - same_teacher <= 1.0));
                }
            }
            model = model.with(constraint!(
                same_teacher + pair.vars.same_day - pair.vars.before - pair.vars.after <= 1.0
            ));
        }

        if pair.same_section {
            model = model.with(constraint!(
                pair.vars.same_day - pair.vars.before - pair.vars.after <= 0.0
            ));
        }

        for &r in &pair.shared_rooms {
            if let (Some(ri), Some(rj)) = (ei.room_var(r), ej.room_var(r)) {
                model = model.with(constraint!(
                    ri + rj + pair.vars.same_day - pair.vars.before - pair.vars.after <= 2.0
                ));
            }
        }
    }

    model
}

/// A selected teacher rules out every day outside their availability
pub fn add_availability_constraints<M: SolverModel>(
    mut model: M,
    ctx: &ModelContext,
    event_vars: &[EventVars],
) -> M {
    for ev in event_vars {
        for &(t, teacher_var) in &ev.teacher {
            let teacher = &ctx.teachers[t];
            for day in Weekday::ALL {
                if !teacher.is_available_on(day) {
                    model = model.with(constraint!(teacher_var + ev.day[day.index()] <= 1.0));
                }
            }
        }
    }
    model
}

/// Same teacher across a group's meetings, plus the day-placement choice
pub fn add_group_constraints<M: SolverModel>(
    mut model: M,
    event_vars: &[EventVars],
    groups: &[GroupVars],
) -> M {
    for group in groups {
        let first = group.members[0];
        for &other in &group.members[1..] {
            for &(t, var) in &event_vars[first].teacher {
                if let Some(other_var) = event_vars[other].teacher_var(t) {
                    model = model.with((var - other_var).eq(0.0));
                }
            }
        }

        match &group.choice {
            GroupDayChoice::Paired(pairs) => {
                let sum: Expression = pairs.iter().map(|(_, v)| Expression::from(*v)).sum();
                model = model.with(sum.eq(1.0));

                for &(pair, indicator) in pairs {
                    let first_day = event_vars[group.first_idx].day[pair.first().index()];
                    let second_day = event_vars[group.second_idx].day[pair.second().index()];
                    model = model.with(constraint!(indicator - first_day <= 0.0));
                    model = model.with(constraint!(indicator - second_day <= 0.0));
                }
            }
            GroupDayChoice::SingleDay(days) => {
                let sum: Expression = days.iter().map(|(_, v)| Expression::from(*v)).sum();
                model = model.with(sum.eq(1.0));

                for &(day, indicator) in days {
                    let first_day = event_vars[group.first_idx].day[day.index()];
                    let second_day = event_vars[group.second_idx].day[day.index()];
                    model = model.with(constraint!(indicator - first_day <= 0.0));
                    model = model.with(constraint!(indicator - second_day <= 0.0));
                }
            }
        }
    }
    model
}

/// The preference boolean can only be earned by taking the preferred room
pub fn add_preference_constraints<M: SolverModel>(
    mut model: M,
    event_vars: &[EventVars],
    prefs: &[RoomPreference],
) -> M {
    for pref in prefs {
        if let Some(room_var) = event_vars[pref.event_idx].room_var(pref.room_global_idx) {
            model = model.with(constraint!(pref.var - room_var <= 0.0));
        }
    }
    model
}
