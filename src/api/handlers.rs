//! HTTP request handlers for the Roster Engine API.
//!
//! Handlers only decode, validate and log; the work is done by the
//! synchronous engine functions in [`crate::calculation`].

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    AllocationInput, analyze_day, audit_schedule, check_off_day_eligibility, license_counts,
    run_auto_assignment, week_dates, weekly_manhours,
};
use crate::error::EngineError;
use crate::import::validate_roster;
use crate::models::ScheduleSnapshot;

use super::request::{
    AuditRequest, AutoAssignRequest, EligibilityRequest, LicenseCountsRequest, ManhoursRequest,
};
use super::response::{
    ApiError, ApiErrorResponse, AuditResponse, LicenseCountsResponse, ManhoursResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/manhours", post(manhours_handler))
        .route("/license-counts", post(license_counts_handler))
        .route("/eligibility", post(eligibility_handler))
        .route("/auto-assign", post(auto_assign_handler))
        .route("/audit", post(audit_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}

/// Maps a JSON extraction failure onto a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Unwraps the JSON payload and validates the roster it carries.
fn accept<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
    snapshot: impl FnOnce(&T) -> &ScheduleSnapshot,
) -> Result<T, Response> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return Err(rejection_response(correlation_id, rejection)),
    };
    validate_roster(&snapshot(&request).employees)
        .map_err(|err| error_response(correlation_id, err))?;
    Ok(request)
}

/// Handler for POST /manhours.
async fn manhours_handler(
    State(state): State<AppState>,
    payload: Result<Json<ManhoursRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing manhours request");
    let request = match accept(correlation_id, payload, |r| &r.snapshot) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let config = state.config();
    let coverage = analyze_day(&request.snapshot, request.date, config);
    let week_manhours = request.include_week.then(|| {
        weekly_manhours(
            &request.snapshot.employees,
            &request.snapshot.assignments,
            &week_dates(request.date),
            &config.shifts,
        )
    });

    info!(
        correlation_id = %correlation_id,
        date = %request.date,
        manhours = %coverage.current_manhours,
        "Manhours computed"
    );
    json_response(
        StatusCode::OK,
        ManhoursResponse {
            date: request.date,
            manhours: coverage.current_manhours,
            week_manhours,
            coverage,
        },
    )
}

/// Handler for POST /license-counts.
async fn license_counts_handler(
    State(state): State<AppState>,
    payload: Result<Json<LicenseCountsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing license count request");
    let request = match accept(correlation_id, payload, |r| &r.snapshot) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let config = state.config();
    let counts = license_counts(
        &request.snapshot.employees,
        &request.snapshot.assignments,
        request.date,
        request.airframe,
        &config.shifts,
        &config.compatibility,
    );

    info!(
        correlation_id = %correlation_id,
        airframe = %request.airframe,
        b1 = counts.b1,
        b2 = counts.b2,
        combined = counts.combined,
        "License counts computed"
    );
    json_response(
        StatusCode::OK,
        LicenseCountsResponse {
            date: request.date,
            airframe: request.airframe,
            counts,
            b1_capable: counts.b1_capable(),
            b2_capable: counts.b2_capable(),
        },
    )
}

/// Handler for POST /eligibility.
///
/// A refused off day is a normal 200 response with `grantable: false`.
async fn eligibility_handler(
    State(state): State<AppState>,
    payload: Result<Json<EligibilityRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing eligibility request");
    let request = match accept(correlation_id, payload, |r| &r.snapshot) {
        Ok(request) => request,
        Err(response) => return response,
    };

    match check_off_day_eligibility(&request.snapshot, &request.off_days, state.config()) {
        Ok(decision) => {
            info!(
                correlation_id = %correlation_id,
                candidate = ?decision.candidate_id,
                days = decision.days.len(),
                grantable = decision.grantable,
                "Eligibility decided"
            );
            json_response(StatusCode::OK, decision)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for POST /auto-assign.
async fn auto_assign_handler(
    State(state): State<AppState>,
    payload: Result<Json<AutoAssignRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing auto-assign request");
    let request = match accept(correlation_id, payload, |r| &r.snapshot) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let config = state.config();
    let input = AllocationInput::from_snapshot(
        &request.snapshot,
        request.date,
        request.aircraft,
        request.requirements,
        request.manual_assignments,
        &config.shifts,
    );

    let start_time = Instant::now();
    let result = match request.seed {
        Some(seed) => run_auto_assignment(&input, config, &mut StdRng::seed_from_u64(seed)),
        None => run_auto_assignment(&input, config, &mut rand::rng()),
    };

    let duration = start_time.elapsed();
    if result.unfilled_count > 0 {
        warn!(
            correlation_id = %correlation_id,
            unfilled = result.unfilled_count,
            total_required = result.total_required,
            "Auto-assignment left slots unfilled"
        );
    }
    info!(
        correlation_id = %correlation_id,
        assignments = result.assignments.len(),
        duration_us = duration.as_micros(),
        "Auto-assignment completed"
    );
    json_response(StatusCode::OK, result)
}

/// Handler for POST /audit.
async fn audit_handler(
    State(state): State<AppState>,
    payload: Result<Json<AuditRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing audit request");
    // The audit reports roster problems rather than rejecting them.
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let issues = audit_schedule(&request.snapshot, state.config());
    info!(
        correlation_id = %correlation_id,
        issues = issues.len(),
        "Audit completed"
    );
    json_response(
        StatusCode::OK,
        AuditResponse {
            issue_count: issues.len(),
            issues,
        },
    )
}
