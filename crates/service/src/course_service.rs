use serde::Serialize;

use models::{Course, CourseInput, CoursePatch, IntoRecordId, Student};

use crate::{
    errors::{ServiceError, TITLE_NOT_UNIQUE},
    storage::{Collection, SharedDirectory},
};

/// A course together with its enrolled students.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CourseDetail {
    pub course: Course,
    pub students: Vec<Student>,
}

pub async fn list_courses(dir: &SharedDirectory) -> Vec<Course> {
    dir.courses().await
}

pub async fn get_course<I: IntoRecordId>(dir: &SharedDirectory, id: I) -> Result<CourseDetail, ServiceError> {
    let id = id.into_record_id();
    dir.read(|d| {
        let course = d.course(id).cloned().ok_or_else(|| ServiceError::not_found("Course"))?;
        Ok(CourseDetail { course, students: d.course_students(id) })
    })
    .await
}

/// Create a course. Titles are not checked for uniqueness here.
pub async fn create_course(dir: &SharedDirectory, input: CourseInput) -> Result<Course, ServiceError> {
    let payload = input.validate()?;
    dir.update(|d| Ok(d.create_course(payload))).await
}

/// Update title and/or teacher. A new title must not belong to another course.
pub async fn update_course<I: IntoRecordId>(
    dir: &SharedDirectory,
    id: I,
    patch: CoursePatch,
) -> Result<Course, ServiceError> {
    let id = id.into_record_id();
    dir.update(|d| {
        let current = d.course(id).map(|c| c.id).ok_or_else(|| ServiceError::not_found("Course"))?;
        if let Some(title) = patch.title() {
            if d.courses().iter().any(|c| c.id != current && c.title == title) {
                return Err(ServiceError::conflict(TITLE_NOT_UNIQUE));
            }
        }
        let course = d.course_mut(current).ok_or_else(|| ServiceError::not_found("Course"))?;
        patch.apply(course);
        Ok(course.clone())
    })
    .await
}

/// Delete a course, even when students are enrolled.
pub async fn delete_course<I: IntoRecordId>(dir: &SharedDirectory, id: I) -> Result<(), ServiceError> {
    if dir.remove(Collection::Courses, id).await {
        Ok(())
    } else {
        Err(ServiceError::not_found("Course"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_course_includes_students() -> Result<(), anyhow::Error> {
        let dir = SharedDirectory::seeded();
        dir.enroll(1, 1).await?;
        let detail = get_course(&dir, 1).await?;
        assert_eq!(detail.course.title, "Math");
        assert_eq!(detail.students.len(), 1);
        assert_eq!(detail.students[0].id, 1);
        assert_eq!(get_course(&dir, "9999").await, Err(ServiceError::NotFound("Course not found".into())));
        Ok(())
    }

    #[tokio::test]
    async fn create_checks_required_fields() {
        let dir = SharedDirectory::seeded();
        let missing = CourseInput { title: None, teacher: Some("Dr. Green".into()) };
        assert_eq!(create_course(&dir, missing).await.unwrap_err().to_string(), "title and teacher required");

        let ok = CourseInput { title: Some("Biology".into()), teacher: Some("Dr. Green".into()) };
        let created = create_course(&dir, ok).await.unwrap();
        assert_eq!(created.id, 4);
        assert!(list_courses(&dir).await.iter().any(|c| c.title == "Biology"));
    }

    #[tokio::test]
    async fn update_enforces_title_uniqueness() {
        let dir = SharedDirectory::seeded();
        let clash = CoursePatch { title: Some("Math".into()), teacher: None };
        assert_eq!(
            update_course(&dir, 2, clash).await,
            Err(ServiceError::Conflict("Course title must be unique".into()))
        );

        let both = CoursePatch { title: Some("Advanced Math".into()), teacher: Some("Prof. White".into()) };
        let updated = update_course(&dir, 1, both).await.unwrap();
        assert_eq!(updated.title, "Advanced Math");
        assert_eq!(dir.course(1).await.unwrap().teacher, "Prof. White");

        let missing = CoursePatch { title: Some("Nonexistent".into()), teacher: Some("Nobody".into()) };
        assert_eq!(update_course(&dir, 999, missing).await, Err(ServiceError::NotFound("Course not found".into())));
    }

    #[tokio::test]
    async fn delete_allowed_with_enrollments() {
        let dir = SharedDirectory::seeded();
        dir.enroll(1, 1).await.unwrap();
        dir.enroll(2, 1).await.unwrap();
        delete_course(&dir, 1).await.unwrap();
        assert!(dir.enrollments().await.iter().all(|e| e.course_id != 1));
        assert!(dir.student_courses(1).await.is_empty());
        assert_eq!(delete_course(&dir, 999).await, Err(ServiceError::NotFound("Course not found".into())));
    }
}
