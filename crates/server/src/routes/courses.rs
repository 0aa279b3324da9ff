use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use models::{Course, CourseInput, CoursePatch};
use serde::Serialize;
use service::course_service::{self, CourseDetail};

use super::ServerState;
use crate::errors::JsonApiError;

#[derive(Debug, Serialize)]
pub struct CourseList {
    pub courses: Vec<Course>,
}

/// GET /courses
pub async fn list(State(state): State<ServerState>) -> Json<CourseList> {
    let courses = course_service::list_courses(&state.directory).await;
    Json(CourseList { courses })
}

/// GET /courses/:id
pub async fn show(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<CourseDetail>, JsonApiError> {
    Ok(Json(course_service::get_course(&state.directory, id).await?))
}

/// POST /courses
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<CourseInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Course>), JsonApiError> {
    let Json(input) = payload?;
    let course = course_service::create_course(&state.directory, input).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// PUT /courses/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Result<Json<CoursePatch>, JsonRejection>,
) -> Result<Json<Course>, JsonApiError> {
    let Json(patch) = payload?;
    Ok(Json(course_service::update_course(&state.directory, id, patch).await?))
}

/// DELETE /courses/:id
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, JsonApiError> {
    course_service::delete_course(&state.directory, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
