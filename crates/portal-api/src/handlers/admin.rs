//! Admin handlers: application review and customer registry.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use portal_models::UserProfile;

use crate::error::ApiResult;
use crate::security::ApiKey;
use crate::state::AppState;

use super::jobs::ApplicationResponse;

#[derive(Serialize)]
pub struct CustomersResponse {
    pub status: bool,
    pub customers: Vec<UserProfile>,
}

/// PUT /admin/applicationStatus/update/:email/:job_id/:status
///
/// Moves an application to one of the closed review statuses. Anything
/// outside that set is rejected before the registry is touched.
pub async fn update_application_status(
    State(state): State<AppState>,
    _key: ApiKey,
    Path((email, job_id, status)): Path<(String, String, String)>,
) -> ApiResult<Json<ApplicationResponse>> {
    let application = state
        .applications
        .update_status(&email, &job_id, &status)
        .await?;

    Ok(Json(ApplicationResponse {
        status: true,
        message: format!("Application moved to {}", application.status.as_str()),
        application,
    }))
}

/// GET /admin/customers (also mounted at /customer)
///
/// Profiles only; password material never leaves the registry.
pub async fn list_customers(
    State(state): State<AppState>,
    _key: ApiKey,
) -> ApiResult<Json<CustomersResponse>> {
    let customers = state
        .users
        .list()
        .await
        .into_iter()
        .map(|u| u.profile())
        .collect();

    Ok(Json(CustomersResponse {
        status: true,
        customers,
    }))
}
