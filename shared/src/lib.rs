use serde::{Deserialize, Serialize};
use chrono::Datelike;

/// A named group of students taught together by one teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    pub name: String,
    /// ID of the teacher who owns this batch
    pub teacher_id: String,
    /// Cached count of live students in this batch.
    /// Maintained by +1/-1 adjustments on admit/delete, never recomputed.
    pub student_count: i64,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// A student admitted into a batch, carrying their full payment history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub roll: String,
    pub phone: String,
    pub address: String,
    /// Class / grade the student attends at school
    pub class_name: String,
    pub section: String,
    pub school: String,
    /// ID of the teacher who owns this student
    pub teacher_id: String,
    /// ID of the batch this student was admitted into
    pub batch_id: String,
    /// Admission timestamp (RFC 3339)
    pub admission_date: String,
    /// Payments in insertion order (not necessarily chronological)
    pub payments: Vec<Payment>,
}

/// An immutable record of one amount paid by a student on a given date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Non-negative currency amount
    pub amount: f64,
    /// Payment timestamp (RFC 3339)
    pub payment_date: String,
    /// Free-text note
    pub note: String,
}

/// Paid/unpaid counts for one batch against the selected month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaymentStats {
    pub paid_count: usize,
    pub unpaid_count: usize,
}

/// A student classified as paid for the selected month, with the amount
/// they paid within that month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaidStudent {
    pub student: Student,
    pub amount_paid: f64,
}

/// Full paid/unpaid partition of a student list for one month.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthlyClassification {
    /// Students with at least one payment in the selected month, input order
    pub paid: Vec<PaidStudent>,
    /// Students with no payment in the selected month, input order
    pub unpaid: Vec<Student>,
    /// Sum of all paid students' amounts for the month
    pub total_collected: f64,
}

/// Headline numbers for the home dashboard.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Sum of payments dated in the current month and year
    pub monthly_collection: f64,
    /// Sum of payments dated in the current year, any month
    pub yearly_collection: f64,
    pub total_students: usize,
    /// Students with at least one payment this month
    pub monthly_paid_students: usize,
    /// total_students minus monthly_paid_students
    pub monthly_unpaid_students: usize,
}

/// One student search hit, joined with the name of its batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentSearchResult {
    pub student: Student,
    pub batch_name: String,
}

/// One row of a dashboard drill-down report. Period-keyed kinds fill
/// `period`; student-keyed kinds fill `student_name` and `batch_name`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub period: String,
    pub amount: f64,
    pub student_name: String,
    pub batch_name: String,
}

/// The report kinds available behind the dashboard tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    /// Collection totals grouped by month, newest first
    MonthlyCollection,
    /// Collection totals grouped by year, newest first
    YearlyCollection,
    /// Every student with their most recent payment amount
    TotalStudents,
    /// Students who paid this month, with their month total
    PaidStudents,
    /// Students who have not paid this month, with their last payment
    UnpaidStudents,
}

/// Month/year the reporting views are focused on. User-navigable
/// forward and backward one month at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusMonth {
    /// 1-12
    pub month: u32,
    pub year: i32,
}

impl Default for FocusMonth {
    fn default() -> Self {
        let now = chrono::Utc::now();
        Self {
            month: now.month(),
            year: now.year(),
        }
    }
}

/// Lifecycle of one save action. A failure is terminal for that action:
/// the error must be acknowledged (reset) before the user retries.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SaveState {
    pub is_saving: bool,
    pub is_success: bool,
    pub error: Option<String>,
}

impl SaveState {
    /// State while the write request is in flight.
    pub fn saving() -> Self {
        Self {
            is_saving: true,
            ..Self::default()
        }
    }

    /// State after the write completed successfully.
    pub fn success() -> Self {
        Self {
            is_success: true,
            ..Self::default()
        }
    }

    /// Terminal error state carrying the underlying message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Back to idle, clearing any error or success flag.
    pub fn reset() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBatchRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameBatchRequest {
    pub batch_id: String,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdmitStudentRequest {
    pub batch_id: String,
    pub name: String,
    pub roll: String,
    pub phone: String,
    pub address: String,
    pub class_name: String,
    pub section: String,
    pub school: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStudentRequest {
    pub batch_id: String,
    pub student_id: String,
    pub name: Option<String>,
    pub roll: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub school: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    pub batch_id: String,
    pub student_id: String,
    pub amount: f64,
    /// Payment timestamp (RFC 3339) - uses current time if not provided
    pub payment_date: Option<String>,
    pub note: String,
}
