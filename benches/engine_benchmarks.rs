//! Performance benchmarks for the Roster Engine.
//!
//! Covers the hot paths a planning session hits on every edit:
//! - Day coverage analysis over a base-sized roster
//! - Off-day eligibility through the HTTP layer
//! - Auto-assignment scaling with fleet size
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use roster_engine::api::{AppState, create_router};
use roster_engine::calculation::{AllocationInput, analyze_day, run_auto_assignment};
use roster_engine::config::{ConfigLoader, RosterConfig};
use roster_engine::models::{
    Aircraft, AirframeType, Employee, License, Role, ScheduleSnapshot, ShiftAssignment, SkillEntry,
    WorkRequirement,
};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

const AIRFRAMES: [AirframeType; 4] = [
    AirframeType::A350,
    AirframeType::A320Neo,
    AirframeType::A321Rr,
    AirframeType::B777,
];

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()
}

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/roster").expect("Failed to load config");
    AppState::new(config)
}

/// Builds a roster of `size` people with a four-week rotation.
fn create_snapshot(size: usize) -> ScheduleSnapshot {
    let employees: Vec<Employee> = (0..size)
        .map(|i| {
            let role = match i % 20 {
                0 => Role::Supervisor,
                1..=4 => Role::SeniorEngineer,
                _ => Role::Engineer,
            };
            let license = match i % 4 {
                0 => License::B1B2,
                1 => License::B1,
                2 => License::B2,
                _ => License::CatA,
            };
            Employee {
                id: format!("emp_{:03}", i),
                name: format!("Employee {}", i),
                initials: format!("E{:03}", i),
                department: "S/TMBAA".to_string(),
                role,
                grade: if i % 7 == 0 { 50 } else { 100 },
                skills: vec![SkillEntry {
                    aircraft_type: AIRFRAMES[i % AIRFRAMES.len()],
                    license: Some(license),
                }],
                certifications: vec![],
                special_skills: Default::default(),
            }
        })
        .collect();

    let codes = ["Ea", "La", "e", "-", "V"];
    let assignments = employees
        .iter()
        .enumerate()
        .flat_map(|(i, employee)| {
            (0..28).map(move |day| {
                ShiftAssignment::new(
                    start_date() + Duration::days(day),
                    employee.id.clone(),
                    codes[(i + day as usize) % codes.len()],
                )
            })
        })
        .collect();

    ScheduleSnapshot::new(employees, assignments)
}

/// Benchmark: coverage analysis of one day.
fn bench_analyze_day(c: &mut Criterion) {
    let config = RosterConfig::standard();
    let snapshot = create_snapshot(120);

    c.bench_function("analyze_day_120", |b| {
        b.iter(|| black_box(analyze_day(&snapshot, start_date(), &config)))
    });
}

/// Benchmark: a two-week off-day request through the router.
fn bench_eligibility_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let mut request = serde_json::json!({
        "candidate_id": "emp_010",
        "start_date": "2026-01-12",
        "day_count": 14,
        "leave_code": "V"
    });
    request["snapshot"] = serde_json::to_value(create_snapshot(120)).unwrap();
    let body = request.to_string();

    c.bench_function("eligibility_14_days", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/eligibility")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: auto-assignment as the fleet grows.
fn bench_auto_assign_scaling(c: &mut Criterion) {
    let config = RosterConfig::standard();
    let snapshot = create_snapshot(120);

    let mut group = c.benchmark_group("auto_assign");

    for fleet_size in [1, 5, 10, 20].iter() {
        let aircraft: Vec<Aircraft> = (0..*fleet_size)
            .map(|i| Aircraft {
                id: format!("ac_{:02}", i),
                registration: format!("HB-J{:02}", i),
                airframe: AIRFRAMES[i % AIRFRAMES.len()],
                company: "LX".to_string(),
            })
            .collect();
        let requirements: Vec<WorkRequirement> = aircraft
            .iter()
            .map(|a| WorkRequirement::new(format!("wr_{}", a.id), start_date(), &a.id, 2, 1, 1))
            .collect();
        let input = AllocationInput::from_snapshot(
            &snapshot,
            start_date(),
            aircraft,
            requirements,
            vec![],
            &config.shifts,
        );

        group.throughput(Throughput::Elements(*fleet_size as u64));
        group.bench_with_input(BenchmarkId::new("aircraft", fleet_size), &input, |b, input| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(42);
                black_box(run_auto_assignment(input, &config, &mut rng))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_analyze_day,
    bench_eligibility_request,
    bench_auto_assign_scaling,
);
criterion_main!(benches);
