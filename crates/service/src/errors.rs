use thiserror::Error;

/// Expected failures of store and service operations. `Display` is the bare
/// message so it can be sent back verbatim as `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn conflict(msg: &str) -> Self { Self::Conflict(msg.to_string()) }
}

pub const EMAIL_NOT_UNIQUE: &str = "Email must be unique";
pub const TITLE_NOT_UNIQUE: &str = "Course title must be unique";
pub const ALREADY_ENROLLED: &str = "Student already enrolled in this course";
