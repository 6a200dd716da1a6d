// src/state.rs

use serde::{Deserialize, Serialize};

/// Role of the signed-in account, as reported by the auth service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

/// Explicit session context passed into every UI-facing operation.
///
/// The source application kept this in ambient providers; here it is
/// an injected value so the eligibility computation stays pure.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub student_id: String,
    pub grade_level: i64,
    pub role: Role,
}

impl SessionContext {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
