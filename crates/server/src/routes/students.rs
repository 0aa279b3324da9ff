use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::types::ErrorBody;
use models::{Student, StudentInput, StudentPatch};
use serde::Serialize;
use service::{
    errors::ServiceError,
    student_service::{self, StudentDetail},
};
use tracing::info;

use super::ServerState;
use crate::errors::JsonApiError;

#[derive(Debug, Serialize)]
pub struct StudentList {
    pub students: Vec<Student>,
}

/// GET /students
pub async fn list(State(state): State<ServerState>) -> Json<StudentList> {
    let students = student_service::list_students(&state.directory).await;
    Json(StudentList { students })
}

/// GET /students/:id
pub async fn show(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<StudentDetail>, JsonApiError> {
    let detail = student_service::get_student(&state.directory, id).await?;
    Ok(Json(detail))
}

/// POST /students
///
/// A duplicate email is answered with 201 and `{"error": "Email must be unique"}`;
/// no record is created.
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<StudentInput>, JsonRejection>,
) -> Result<Response, JsonApiError> {
    let Json(input) = payload?;
    match student_service::create_student(&state.directory, input).await {
        Ok(student) => {
            info!(id = student.id, "POST /students created");
            Ok((StatusCode::CREATED, Json(student)).into_response())
        }
        Err(ServiceError::Conflict(msg)) => Ok((StatusCode::CREATED, Json(ErrorBody::new(msg))).into_response()),
        Err(e) => Err(e.into()),
    }
}

/// PUT /students/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> Result<Json<Student>, JsonApiError> {
    let Json(patch) = payload?;
    let student = student_service::update_student(&state.directory, id, patch).await?;
    Ok(Json(student))
}

/// DELETE /students/:id
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    student_service::delete_student(&state.directory, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
