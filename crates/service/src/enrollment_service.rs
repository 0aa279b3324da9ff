use models::{Enrollment, IntoRecordId};

use crate::{errors::ServiceError, storage::SharedDirectory};

pub async fn list_enrollments(dir: &SharedDirectory) -> Vec<Enrollment> {
    dir.enrollments().await
}

/// Enroll a student in a course; arguments follow the route order.
pub async fn enroll_student<C: IntoRecordId, S: IntoRecordId>(
    dir: &SharedDirectory,
    course_id: C,
    student_id: S,
) -> Result<(), ServiceError> {
    dir.enroll(student_id, course_id).await
}

pub async fn unenroll_student<C: IntoRecordId, S: IntoRecordId>(
    dir: &SharedDirectory,
    course_id: C,
    student_id: S,
) -> Result<(), ServiceError> {
    dir.unenroll(student_id, course_id).await
}
