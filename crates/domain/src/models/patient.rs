//! Patient domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a monitored patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a patient.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: i32,
}

/// Partial update for a patient. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,

    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: Option<i32>,
}

impl UpdatePatientRequest {
    /// Applies the present fields onto an existing patient.
    pub fn apply_to(&self, patient: &mut Patient, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            patient.name = name.clone();
        }
        if let Some(age) = self.age {
            patient.age = age;
        }
        patient.updated_at = now;
    }
}

impl Patient {
    /// Name and age used for the patient created on every stream connection.
    pub const DEMO_NAME: &'static str = "Demo Patient";
    pub const DEMO_AGE: i32 = 35;
}
