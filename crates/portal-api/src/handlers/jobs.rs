//! Job handlers: listings proxy and application lifecycle.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use portal_catalog::{JobListing, JobQuery};
use portal_models::{ApplyRequest, JobApplication};

use crate::error::{ApiError, ApiResult};
use crate::security::ApiKey;
use crate::state::AppState;

use super::first_validation_message;

#[derive(Serialize)]
pub struct JobsResponse {
    pub status: bool,
    pub jobs: Vec<JobListing>,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub status: bool,
    pub categories: Vec<String>,
}

#[derive(Serialize)]
pub struct ApplicationResponse {
    pub status: bool,
    pub message: String,
    pub application: JobApplication,
}

#[derive(Serialize)]
pub struct ApplicationsResponse {
    pub status: bool,
    pub applications: Vec<JobApplication>,
}

/// GET /jobs
///
/// Relays catalog listings; `length`, `category`, and `company`
/// filters pass through unchanged.
pub async fn list_jobs(
    State(state): State<AppState>,
    _key: ApiKey,
    Query(query): Query<JobQuery>,
) -> ApiResult<Json<JobsResponse>> {
    let jobs = state.applications.listings(&query).await?;

    Ok(Json(JobsResponse { status: true, jobs }))
}

/// GET /jobs/categories
pub async fn categories(
    State(state): State<AppState>,
    _key: ApiKey,
) -> ApiResult<Json<CategoriesResponse>> {
    let categories = state.applications.categories().await?;

    Ok(Json(CategoriesResponse {
        status: true,
        categories,
    }))
}

/// POST /jobs/apply
pub async fn apply(
    State(state): State<AppState>,
    _key: ApiKey,
    Json(request): Json<ApplyRequest>,
) -> ApiResult<(StatusCode, Json<ApplicationResponse>)> {
    request
        .validate()
        .map_err(|e| ApiError::Validation(first_validation_message(&e)))?;

    let application = state.applications.apply(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse {
            status: true,
            message: "Application submitted".to_string(),
            application,
        }),
    ))
}

/// GET /jobs/application-status/:email/:job_id
pub async fn application_status(
    State(state): State<AppState>,
    _key: ApiKey,
    Path((email, job_id)): Path<(String, String)>,
) -> ApiResult<Json<ApplicationResponse>> {
    let application = state.applications.status(&email, &job_id).await?;

    Ok(Json(ApplicationResponse {
        status: true,
        message: format!("Application is {}", application.status.as_str()),
        application,
    }))
}

/// GET /jobs/myApplications/:email
pub async fn my_applications(
    State(state): State<AppState>,
    _key: ApiKey,
    Path(email): Path<String>,
) -> ApiResult<Json<ApplicationsResponse>> {
    let applications = state.applications.list_for(&email).await;

    Ok(Json(ApplicationsResponse {
        status: true,
        applications,
    }))
}
