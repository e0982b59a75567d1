//! Automatic allocation of on-duty staff to aircraft.
//!
//! The allocator fills requirements in priority order over three passes:
//! senior engineers first, then regular licensed staff, then Cat-A and
//! helper slots. Ties inside a ranking are broken by shuffling with the
//! caller's random source before a stable sort, so a seeded source gives a
//! reproducible allocation.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CompatibilityTable, RosterConfig, ShiftCatalog};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Aircraft, AirframeType, AllocationResult, Employee, ScheduleSnapshot, Shortfall,
    SlotCandidates, TaskAssignment, TaskRole, WorkRequirement,
};

use super::compatibility::{can_fill, holds_combined};
use super::duty::on_duty_employees;

/// Everything the allocator needs for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationInput {
    /// The day to allocate.
    pub date: NaiveDate,
    /// The roster.
    pub employees: Vec<Employee>,
    /// The fleet.
    pub aircraft: Vec<Aircraft>,
    /// Work requirements; only those for `date` are used.
    pub requirements: Vec<WorkRequirement>,
    /// Operator-pinned assignments; those for `date` are kept verbatim.
    #[serde(default)]
    pub manual_assignments: Vec<TaskAssignment>,
    /// Ids of employees on duty on `date`.
    pub on_duty: BTreeSet<String>,
}

impl AllocationInput {
    /// Builds the input from a schedule snapshot, resolving who is on duty.
    pub fn from_snapshot(
        snapshot: &ScheduleSnapshot,
        date: NaiveDate,
        aircraft: Vec<Aircraft>,
        requirements: Vec<WorkRequirement>,
        manual_assignments: Vec<TaskAssignment>,
        catalog: &ShiftCatalog,
    ) -> Self {
        let on_duty = on_duty_employees(&snapshot.employees, &snapshot.assignments, date, catalog)
            .into_iter()
            .map(|e| e.id.clone())
            .collect();
        Self {
            date,
            employees: snapshot.employees.clone(),
            aircraft,
            requirements,
            manual_assignments,
            on_duty,
        }
    }
}

#[derive(Debug, Default)]
struct SeniorLoad {
    count: u32,
    airframes: Vec<AirframeType>,
}

/// Working state of one allocator run.
struct Board {
    date: NaiveDate,
    assignments: Vec<TaskAssignment>,
    placed: HashSet<String>,
    senior_load: HashMap<String, SeniorLoad>,
}

impl Board {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            assignments: Vec::new(),
            placed: HashSet::new(),
            senior_load: HashMap::new(),
        }
    }

    fn count(&self, aircraft_id: &str, role: TaskRole) -> u32 {
        self.assignments
            .iter()
            .filter(|a| a.aircraft_id == aircraft_id && a.role == role)
            .count() as u32
    }

    fn is_placed(&self, employee_id: &str) -> bool {
        self.placed.contains(employee_id)
    }

    fn is_on_aircraft(&self, employee_id: &str, aircraft_id: &str) -> bool {
        self.assignments
            .iter()
            .any(|a| a.employee_id == employee_id && a.aircraft_id == aircraft_id)
    }

    fn senior_count(&self, employee_id: &str) -> u32 {
        self.senior_load.get(employee_id).map_or(0, |l| l.count)
    }

    /// A senior takes up to `cap` aircraft a day; every aircraft after the
    /// first must share an airframe type already worked.
    fn senior_fits(&self, employee_id: &str, airframe: AirframeType, cap: u32) -> bool {
        match self.senior_load.get(employee_id) {
            None => cap > 0,
            Some(load) => {
                load.count < cap && (load.count == 0 || load.airframes.contains(&airframe))
            }
        }
    }

    fn record(&mut self, assignment: TaskAssignment, senior_airframe: Option<AirframeType>) {
        if let Some(airframe) = senior_airframe {
            let load = self
                .senior_load
                .entry(assignment.employee_id.clone())
                .or_default();
            load.count += 1;
            if !load.airframes.contains(&airframe) {
                load.airframes.push(airframe);
            }
        }
        self.placed.insert(assignment.employee_id.clone());
        self.assignments.push(assignment);
    }

    fn place(&mut self, employee: &Employee, aircraft: &Aircraft, role: TaskRole) {
        let task = TaskAssignment::automatic(self.date, &aircraft.id, &employee.id, role);
        debug!(
            employee = %employee.id,
            aircraft = %aircraft.id,
            role = %role,
            "Placed employee"
        );
        let senior = employee.is_senior().then_some(aircraft.airframe);
        self.record(task, senior);
    }
}

/// Allocates on-duty staff to the day's work requirements.
///
/// Manual overrides for the day are kept verbatim and counted first. The
/// run always completes; slots that cannot be staffed are reported through
/// [`AllocationResult::unfilled_count`] and its shortfalls.
pub fn run_auto_assignment<R: Rng + ?Sized>(
    input: &AllocationInput,
    config: &RosterConfig,
    rng: &mut R,
) -> AllocationResult {
    let compatibility = &config.compatibility;
    let senior_cap = config.policy.senior_aircraft_cap;
    let fleet: HashMap<&str, &Aircraft> =
        input.aircraft.iter().map(|a| (a.id.as_str(), a)).collect();

    let mut targets: Vec<(&WorkRequirement, &Aircraft)> = input
        .requirements
        .iter()
        .filter(|r| r.date == input.date)
        .filter_map(|r| match fleet.get(r.aircraft_id.as_str()) {
            Some(aircraft) => Some((r, *aircraft)),
            None => {
                debug!(requirement = %r.id, aircraft = %r.aircraft_id, "Skipping requirement for unknown aircraft");
                None
            }
        })
        .collect();
    targets.sort_by_key(|(r, _)| r.priority);

    let mut seen = HashSet::new();
    let on_duty: Vec<&Employee> = input
        .employees
        .iter()
        .filter(|e| input.on_duty.contains(&e.id) && !e.role.is_management())
        .filter(|e| seen.insert(e.id.as_str()))
        .collect();
    let seniors: Vec<&Employee> = on_duty.iter().copied().filter(|e| e.is_senior()).collect();
    let regulars: Vec<&Employee> = on_duty
        .iter()
        .copied()
        .filter(|e| !e.is_senior() && !e.is_cat_a_only())
        .collect();
    let cat_a_only: Vec<&Employee> = on_duty.iter().copied().filter(|e| e.is_cat_a_only()).collect();
    let roster: HashMap<&str, &Employee> = on_duty.iter().map(|e| (e.id.as_str(), *e)).collect();

    let mut board = Board::new(input.date);
    for manual in input.manual_assignments.iter().filter(|a| a.date == input.date) {
        let senior_airframe = roster
            .get(manual.employee_id.as_str())
            .filter(|e| e.is_senior())
            .and_then(|_| fleet.get(manual.aircraft_id.as_str()))
            .map(|a| a.airframe);
        board.record(manual.clone(), senior_airframe);
    }

    // Pass 1: seniors.
    for (requirement, aircraft) in &targets {
        for role in [TaskRole::B1, TaskRole::B2] {
            let need = requirement
                .required_for(role)
                .saturating_sub(board.count(&aircraft.id, role));
            if need == 0 {
                continue;
            }
            let mut candidates: Vec<&Employee> = seniors
                .iter()
                .copied()
                .filter(|e| can_fill(e, aircraft.airframe, role, compatibility))
                .filter(|e| !board.is_on_aircraft(&e.id, &aircraft.id))
                .filter(|e| board.senior_fits(&e.id, aircraft.airframe, senior_cap))
                .collect();
            candidates.shuffle(rng);
            let wanted = &requirement.special_skills_required;
            candidates.sort_by(|a, b| {
                b.matching_skill_count(wanted)
                    .cmp(&a.matching_skill_count(wanted))
                    .then(b.grade.cmp(&a.grade))
                    .then(board.senior_count(&a.id).cmp(&board.senior_count(&b.id)))
            });
            for employee in candidates.into_iter().take(need as usize) {
                board.place(employee, aircraft, role);
            }
        }
    }

    // Pass 2: regular licensed staff, one aircraft each.
    for (requirement, aircraft) in &targets {
        for role in [TaskRole::B1, TaskRole::B2] {
            let need = requirement
                .required_for(role)
                .saturating_sub(board.count(&aircraft.id, role));
            if need == 0 {
                continue;
            }
            let mut candidates: Vec<&Employee> = regulars
                .iter()
                .copied()
                .filter(|e| !board.is_placed(&e.id))
                .filter(|e| can_fill(e, aircraft.airframe, role, compatibility))
                .collect();
            candidates.shuffle(rng);
            let wanted = &requirement.special_skills_required;
            candidates.sort_by(|a, b| {
                holds_combined(b, aircraft.airframe, compatibility)
                    .cmp(&holds_combined(a, aircraft.airframe, compatibility))
                    .then(b.grade.cmp(&a.grade))
                    .then(b.matching_skill_count(wanted).cmp(&a.matching_skill_count(wanted)))
            });
            for employee in candidates.into_iter().take(need as usize) {
                board.place(employee, aircraft, role);
            }
        }
    }

    // Pass 3: Cat-A and helper slots.
    for (requirement, aircraft) in &targets {
        let mut need = requirement
            .cat_a_required
            .saturating_sub(board.count(&aircraft.id, TaskRole::CatAHelper));
        for pool in [&cat_a_only, &on_duty] {
            if need == 0 {
                break;
            }
            let mut candidates: Vec<&Employee> = pool
                .iter()
                .copied()
                .filter(|e| !board.is_placed(&e.id))
                .collect();
            candidates.shuffle(rng);
            for employee in candidates.into_iter().take(need as usize) {
                board.place(employee, aircraft, TaskRole::CatAHelper);
                need -= 1;
            }
        }
    }

    let mut shortfalls = Vec::new();
    let mut total_required = 0;
    for (requirement, aircraft) in &targets {
        total_required += requirement.total_required();
        for role in [TaskRole::B1, TaskRole::B2, TaskRole::CatAHelper] {
            let required = requirement.required_for(role);
            let filled = board.count(&aircraft.id, role).min(required);
            if filled < required {
                shortfalls.push(Shortfall {
                    requirement_id: requirement.id.clone(),
                    aircraft_id: aircraft.id.clone(),
                    role,
                    required,
                    filled,
                });
            }
        }
    }
    let unfilled_count = shortfalls.iter().map(Shortfall::missing).sum();

    debug!(
        date = %input.date,
        assignments = board.assignments.len(),
        total_required,
        unfilled_count,
        "Auto-assignment complete"
    );

    AllocationResult {
        date: input.date,
        assignments: board.assignments,
        total_required,
        unfilled_count,
        shortfalls,
    }
}

/// Pins an employee to an aircraft role.
///
/// # Errors
///
/// Returns [`EngineError::DuplicateAssignment`] when the same employee is
/// already bound to the same aircraft in the same role on that day.
pub fn add_manual_assignment(
    assignments: &mut Vec<TaskAssignment>,
    date: NaiveDate,
    aircraft_id: &str,
    employee_id: &str,
    role: TaskRole,
) -> EngineResult<TaskAssignment> {
    let duplicate = assignments.iter().any(|a| {
        a.date == date && a.aircraft_id == aircraft_id && a.employee_id == employee_id && a.role == role
    });
    if duplicate {
        return Err(EngineError::DuplicateAssignment {
            employee_id: employee_id.to_string(),
            aircraft_id: aircraft_id.to_string(),
            date,
        });
    }
    let task = TaskAssignment::manual(date, aircraft_id, employee_id, role);
    assignments.push(task.clone());
    Ok(task)
}

/// Lists staff available for one slot, split by license qualification.
///
/// Available means on duty, not management and not yet bound to any
/// aircraft on the day. Every available employee qualifies for the helper
/// role.
pub fn slot_candidates(
    aircraft: &Aircraft,
    role: TaskRole,
    employees: &[Employee],
    on_duty: &BTreeSet<String>,
    assignments: &[TaskAssignment],
    date: NaiveDate,
    compatibility: &CompatibilityTable,
) -> SlotCandidates {
    let taken: HashSet<&str> = assignments
        .iter()
        .filter(|a| a.date == date)
        .map(|a| a.employee_id.as_str())
        .collect();

    let mut candidates = SlotCandidates::default();
    for employee in employees {
        if !on_duty.contains(&employee.id)
            || employee.role.is_management()
            || taken.contains(employee.id.as_str())
        {
            continue;
        }
        if can_fill(employee, aircraft.airframe, role, compatibility) {
            candidates.qualified.push(employee.id.clone());
        } else {
            candidates.unqualified.push(employee.id.clone());
        }
    }
    candidates
}
