//! Domain model for a batch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named group of students taught together by one teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    pub name: String,
    pub teacher_id: String,
    /// Cached number of live students referencing this batch. Adjusted by
    /// +1/-1 alongside admit/delete writes, never recomputed, so it can
    /// drift if the paired count write fails after the student write.
    pub student_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Batch {
    /// Generate a unique batch ID.
    /// Format: batch-<uuid v4>
    pub fn generate_id() -> String {
        format!("batch-{}", Uuid::new_v4())
    }
}
