use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::Enrollment;
use serde::Serialize;
use service::enrollment_service;

use super::ServerState;
use crate::errors::JsonApiError;

#[derive(Debug, Serialize)]
pub struct EnrollmentList {
    pub enrollments: Vec<Enrollment>,
}

#[derive(Debug, Serialize)]
pub struct EnrollOutput {
    pub success: bool,
}

/// GET /enrollments
pub async fn list(State(state): State<ServerState>) -> Json<EnrollmentList> {
    let enrollments = enrollment_service::list_enrollments(&state.directory).await;
    Json(EnrollmentList { enrollments })
}

/// POST /courses/:id/students/:student_id
pub async fn enroll(
    State(state): State<ServerState>,
    Path((course_id, student_id)): Path<(String, String)>,
) -> Result<(StatusCode, Json<EnrollOutput>), JsonApiError> {
    enrollment_service::enroll_student(&state.directory, course_id, student_id).await?;
    Ok((StatusCode::CREATED, Json(EnrollOutput { success: true })))
}

/// DELETE /courses/:id/students/:student_id
pub async fn unenroll(
    State(state): State<ServerState>,
    Path((course_id, student_id)): Path<(String, String)>,
) -> Result<StatusCode, JsonApiError> {
    enrollment_service::unenroll_student(&state.directory, course_id, student_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
