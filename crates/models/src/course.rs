use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record_id::RecordId;
use crate::{non_blank, non_blank_ref};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: RecordId,
    pub title: String,
    pub teacher: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCourse {
    pub title: String,
    pub teacher: String,
}

impl NewCourse {
    pub fn new(title: impl Into<String>, teacher: impl Into<String>) -> Self {
        Self { title: title.into(), teacher: teacher.into() }
    }
}

/// Raw `POST /courses` body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInput {
    pub title: Option<String>,
    pub teacher: Option<String>,
}

impl CourseInput {
    pub fn validate(self) -> Result<NewCourse, ModelError> {
        match (non_blank(self.title), non_blank(self.teacher)) {
            (Some(title), Some(teacher)) => Ok(NewCourse { title, teacher }),
            _ => Err(ModelError::Validation("title and teacher required".into())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub teacher: Option<String>,
}

impl CoursePatch {
    pub fn title(&self) -> Option<&str> {
        non_blank_ref(&self.title)
    }

    pub fn apply(&self, course: &mut Course) {
        if let Some(title) = self.title() {
            course.title = title.to_string();
        }
        if let Some(teacher) = non_blank_ref(&self.teacher) {
            course.teacher = teacher.to_string();
        }
    }
}
