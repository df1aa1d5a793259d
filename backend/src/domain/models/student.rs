//! Domain model for a student.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payment::Payment;

/// A student admitted into a batch.
///
/// Carries the full embedded payment history in insertion order; the list
/// is not necessarily chronological because payments can be backdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub roll: String,
    pub phone: String,
    pub address: String,
    pub class_name: String,
    pub section: String,
    pub school: String,
    pub teacher_id: String,
    pub batch_id: String,
    pub admission_date: DateTime<Utc>,
    pub payments: Vec<Payment>,
}

impl Student {
    /// Generate a unique student ID.
    /// Format: student-<uuid v4>
    pub fn generate_id() -> String {
        format!("student-{}", Uuid::new_v4())
    }
}
