use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::record_id::RecordId;
use crate::{non_blank, non_blank_ref};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: RecordId,
    pub name: String,
    pub email: String,
}

/// Validated creation payload; the store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { name: name.into(), email: email.into() }
    }
}

/// Raw `POST /students` body. Fields are optional so that a missing one is
/// reported as a validation error rather than a decode failure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInput {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl StudentInput {
    pub fn validate(self) -> Result<NewStudent, ModelError> {
        match (non_blank(self.name), non_blank(self.email)) {
            (Some(name), Some(email)) => Ok(NewStudent { name, email }),
            _ => Err(ModelError::Validation("name and email required".into())),
        }
    }
}

/// Partial update; blank fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl StudentPatch {
    pub fn email(&self) -> Option<&str> {
        non_blank_ref(&self.email)
    }

    pub fn apply(&self, student: &mut Student) {
        if let Some(name) = non_blank_ref(&self.name) {
            student.name = name.to_string();
        }
        if let Some(email) = self.email() {
            student.email = email.to_string();
        }
    }
}
