//! Record types shared by the directory store and the HTTP layer.
//! - `Student` / `Course` carry a store-assigned numeric id.
//! - `Enrollment` is a join record keyed by the `(student_id, course_id)` pair.
//! - `*Input` types are raw request bodies, `*Patch` types partial updates.

pub mod errors;
pub mod record_id;
pub mod student;
pub mod course;
pub mod enrollment;

pub use course::{Course, CourseInput, CoursePatch, NewCourse};
pub use enrollment::Enrollment;
pub use record_id::{parse_record_id, IntoRecordId, RecordId};
pub use student::{NewStudent, Student, StudentInput, StudentPatch};

/// Treat missing and blank strings alike.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub(crate) fn non_blank_ref(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
