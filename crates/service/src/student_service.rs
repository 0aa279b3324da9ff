use serde::Serialize;

use models::{Course, IntoRecordId, Student, StudentInput, StudentPatch};

use crate::{
    errors::{ServiceError, EMAIL_NOT_UNIQUE},
    storage::{Collection, SharedDirectory},
};

/// A student together with the courses they are enrolled in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StudentDetail {
    pub student: Student,
    pub courses: Vec<Course>,
}

/// List all students in creation order.
pub async fn list_students(dir: &SharedDirectory) -> Vec<Student> {
    dir.students().await
}

/// Get a student by id along with their courses.
pub async fn get_student<I: IntoRecordId>(dir: &SharedDirectory, id: I) -> Result<StudentDetail, ServiceError> {
    let id = id.into_record_id();
    dir.read(|d| {
        let student = d.student(id).cloned().ok_or_else(|| ServiceError::not_found("Student"))?;
        Ok(StudentDetail { student, courses: d.student_courses(id) })
    })
    .await
}

/// Create a student after checking required fields.
pub async fn create_student(dir: &SharedDirectory, input: StudentInput) -> Result<Student, ServiceError> {
    let payload = input.validate()?;
    dir.update(|d| d.create_student(payload)).await
}

/// Update name and/or email. A new email must not belong to another student.
pub async fn update_student<I: IntoRecordId>(
    dir: &SharedDirectory,
    id: I,
    patch: StudentPatch,
) -> Result<Student, ServiceError> {
    let id = id.into_record_id();
    dir.update(|d| {
        let current = d.student(id).map(|s| s.id).ok_or_else(|| ServiceError::not_found("Student"))?;
        if let Some(email) = patch.email() {
            if d.students().iter().any(|s| s.id != current && s.email == email) {
                return Err(ServiceError::conflict(EMAIL_NOT_UNIQUE));
            }
        }
        let student = d.student_mut(current).ok_or_else(|| ServiceError::not_found("Student"))?;
        patch.apply(student);
        Ok(student.clone())
    })
    .await
}

/// Delete a student and all of their enrollments.
pub async fn delete_student<I: IntoRecordId>(dir: &SharedDirectory, id: I) -> Result<(), ServiceError> {
    if dir.remove(Collection::Students, id).await {
        Ok(())
    } else {
        Err(ServiceError::not_found("Student"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: Option<&str>, email: Option<&str>) -> StudentInput {
        StudentInput { name: name.map(Into::into), email: email.map(Into::into) }
    }

    #[tokio::test]
    async fn get_student_includes_courses() -> Result<(), anyhow::Error> {
        let dir = SharedDirectory::seeded();
        dir.enroll(1, 1).await?;
        let detail = get_student(&dir, "1").await?;
        assert_eq!(detail.student.name, "Alice");
        assert_eq!(detail.courses, vec![dir.course(1).await.unwrap()]);

        assert_eq!(get_student(&dir, 999).await, Err(ServiceError::NotFound("Student not found".into())));
        Ok(())
    }

    #[tokio::test]
    async fn create_requires_fields_and_unique_email() {
        let dir = SharedDirectory::seeded();
        let err = create_student(&dir, input(None, Some("new@example.com"))).await.unwrap_err();
        assert_eq!(err.to_string(), "name and email required");

        let err = create_student(&dir, input(Some("Eve"), Some("alice@example.com"))).await.unwrap_err();
        assert_eq!(err, ServiceError::Conflict("Email must be unique".into()));

        let ok = create_student(&dir, input(Some("David"), Some("david@example.com"))).await.unwrap();
        assert_eq!(ok.id, 4);
        assert_eq!(list_students(&dir).await.len(), 4);
    }

    #[tokio::test]
    async fn update_changes_fields_and_checks_email() {
        let dir = SharedDirectory::seeded();
        let patch = StudentPatch { name: Some("Updated Name".into()), email: Some("updated@example.com".into()) };
        let updated = update_student(&dir, 1, patch).await.unwrap();
        assert_eq!(updated, Student { id: 1, name: "Updated Name".into(), email: "updated@example.com".into() });

        let dup = StudentPatch { name: None, email: Some("updated@example.com".into()) };
        assert_eq!(update_student(&dir, 2, dup).await, Err(ServiceError::Conflict("Email must be unique".into())));

        // 自身邮箱不算冲突
        let same = StudentPatch { name: None, email: Some("bob@example.com".into()) };
        assert!(update_student(&dir, 2, same).await.is_ok());

        let missing = StudentPatch { name: Some("Name".into()), email: None };
        assert_eq!(update_student(&dir, 999, missing).await, Err(ServiceError::NotFound("Student not found".into())));
    }

    #[tokio::test]
    async fn delete_cascades_and_reports_missing() {
        let dir = SharedDirectory::seeded();
        dir.enroll(1, 2).await.unwrap();
        delete_student(&dir, 1).await.unwrap();
        assert!(dir.course_students(2).await.is_empty());
        assert!(dir.student(1).await.is_none());
        assert_eq!(delete_student(&dir, 1).await, Err(ServiceError::NotFound("Student not found".into())));
    }
}
