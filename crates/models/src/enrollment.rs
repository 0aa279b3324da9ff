use serde::{Deserialize, Serialize};

use crate::record_id::RecordId;

/// Join record between a student and a course. Serialized in camelCase
/// (`studentId`, `courseId`) to keep the public JSON shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub student_id: RecordId,
    pub course_id: RecordId,
}

impl Enrollment {
    pub fn new(student_id: RecordId, course_id: RecordId) -> Self {
        Self { student_id, course_id }
    }

    pub fn is_pair(&self, student_id: RecordId, course_id: RecordId) -> bool {
        self.student_id == student_id && self.course_id == course_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(Enrollment::new(1, 2)).unwrap();
        assert_eq!(json, serde_json::json!({"studentId": 1, "courseId": 2}));
    }
}
