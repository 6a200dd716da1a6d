// src/models/announcement.rs

use serde::{Deserialize, Serialize};

/// An announcement published by an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub id: String,
    pub title: String,
    pub body: String,
    /// Absent means the announcement is for every grade.
    pub audience_grade: Option<i64>,
    pub published_at: chrono::DateTime<chrono::Utc>,
}
