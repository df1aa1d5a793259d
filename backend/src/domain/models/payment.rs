//! Domain model for a payment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One amount paid by a student on a given date.
///
/// Payments are owned exclusively by their student: they have no identity
/// of their own, are created only by appending to the student's payment
/// list, and are never mutated or individually deleted afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub amount: f64,
    pub payment_date: DateTime<Utc>,
    pub note: String,
}
