//! HTTP API module for the Roster Engine.
//!
//! This module exposes the coverage, eligibility, allocation and audit
//! operations as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AuditRequest, AutoAssignRequest, EligibilityRequest, LicenseCountsRequest, ManhoursRequest,
};
pub use response::{ApiError, AuditResponse, LicenseCountsResponse, ManhoursResponse};
pub use state::AppState;
