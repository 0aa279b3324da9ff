//! Service layer for the course registry.
//! - `storage` owns the in-memory directory and its invariants.
//! - `*_service` modules add field validation and update-time checks on top.
//! - Errors are reported as `ServiceError`, never by panicking.

pub mod errors;
pub mod storage;
pub mod student_service;
pub mod course_service;
pub mod enrollment_service;
