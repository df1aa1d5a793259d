//! Domain-level command and result types.
//!
//! These structs are used by services inside the domain layer and are
//! **not** exposed to presentation code. The presentation adapter maps the
//! public DTOs in the `shared` crate to these internal types.

pub mod batches {
    use crate::domain::models::batch::Batch;

    /// Input for creating a new batch.
    #[derive(Debug, Clone)]
    pub struct CreateBatchCommand {
        pub teacher_id: String,
        pub name: String,
    }

    /// Input for renaming an existing batch.
    #[derive(Debug, Clone)]
    pub struct RenameBatchCommand {
        pub batch_id: String,
        pub new_name: String,
    }

    /// Input for deleting a batch.
    #[derive(Debug, Clone)]
    pub struct DeleteBatchCommand {
        pub batch_id: String,
    }

    /// Result of creating a batch.
    #[derive(Debug, Clone)]
    pub struct CreateBatchResult {
        pub batch: Batch,
    }

    /// Result of renaming a batch.
    #[derive(Debug, Clone)]
    pub struct RenameBatchResult {
        pub batch: Batch,
    }

    /// Result of deleting a batch.
    #[derive(Debug, Clone)]
    pub struct DeleteBatchResult {
        pub success_message: String,
    }

    /// Result of listing a teacher's batches.
    #[derive(Debug, Clone)]
    pub struct ListBatchesResult {
        pub batches: Vec<Batch>,
    }
}

pub mod students {
    use crate::domain::models::student::Student;

    /// Input for admitting a student into a batch.
    #[derive(Debug, Clone)]
    pub struct AdmitStudentCommand {
        pub teacher_id: String,
        pub batch_id: String,
        pub name: String,
        pub roll: String,
        pub phone: String,
        pub address: String,
        pub class_name: String,
        pub section: String,
        pub school: String,
    }

    /// Input for editing a student's identity fields. Payments are never
    /// touched through this command.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateStudentCommand {
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

    /// Input for deleting a student.
    #[derive(Debug, Clone)]
    pub struct DeleteStudentCommand {
        pub batch_id: String,
        pub student_id: String,
    }

    /// Result of admitting a student.
    #[derive(Debug, Clone)]
    pub struct AdmitStudentResult {
        pub student: Student,
    }

    /// Result of editing a student.
    #[derive(Debug, Clone)]
    pub struct UpdateStudentResult {
        pub student: Student,
    }

    /// Result of deleting a student.
    #[derive(Debug, Clone)]
    pub struct DeleteStudentResult {
        pub success_message: String,
    }

    /// Result of listing students.
    #[derive(Debug, Clone)]
    pub struct ListStudentsResult {
        pub students: Vec<Student>,
    }
}

pub mod payments {
    use chrono::{DateTime, Utc};

    use crate::domain::models::student::Student;

    /// Input for recording one payment against a student.
    #[derive(Debug, Clone)]
    pub struct RecordPaymentCommand {
        pub batch_id: String,
        pub student_id: String,
        pub amount: f64,
        /// Defaults to now when not provided.
        pub payment_date: Option<DateTime<Utc>>,
        pub note: String,
    }

    /// Result of recording a payment, carrying the student with the
    /// payment appended.
    #[derive(Debug, Clone)]
    pub struct RecordPaymentResult {
        pub student: Student,
    }
}
