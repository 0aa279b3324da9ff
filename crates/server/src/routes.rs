pub mod courses;
pub mod enrollments;
pub mod students;

use axum::{
    routing::{get, post},
    Json, Router,
};
use common::types::Health;
use service::storage::SharedDirectory;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::errors::JsonApiError;

/// State shared by every handler.
#[derive(Clone, Default)]
pub struct ServerState {
    pub directory: SharedDirectory,
}

impl ServerState {
    pub fn new(directory: SharedDirectory) -> Self {
        Self { directory }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Any unmatched path, or a known path with an unsupported method.
pub async fn not_found() -> JsonApiError {
    JsonApiError::not_found()
}

/// Build the full application router.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health).fallback(not_found))
        .route("/students", get(students::list).post(students::create).fallback(not_found))
        .route(
            "/students/:id",
            get(students::show)
                .put(students::update)
                .delete(students::remove)
                .fallback(not_found),
        )
        .route("/courses", get(courses::list).post(courses::create).fallback(not_found))
        .route(
            "/courses/:id",
            get(courses::show)
                .put(courses::update)
                .delete(courses::remove)
                .fallback(not_found),
        )
        .route(
            "/courses/:id/students/:student_id",
            post(enrollments::enroll).delete(enrollments::unenroll).fallback(not_found),
        )
        .route("/enrollments", get(enrollments::list).fallback(not_found))
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
