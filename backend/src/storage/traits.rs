//! # Storage Traits
//!
//! Storage abstraction traits that allow different backends to be used
//! interchangeably by the domain layer. All operations are synchronous.
//!
//! Absence on read is `Ok(None)` / `Ok(false)`, never an error; callers
//! decide whether a missing record is a failure for their operation.

use anyhow::Result;

use crate::domain::models::batch::Batch;
use crate::domain::models::payment::Payment;
use crate::domain::models::student::Student;

/// Interface for batch storage operations.
pub trait BatchStorage: Send + Sync {
    /// Store a new batch.
    fn store_batch(&self, batch: &Batch) -> Result<()>;

    /// Retrieve a specific batch by ID.
    fn get_batch(&self, batch_id: &str) -> Result<Option<Batch>>;

    /// List a teacher's batches ordered by creation time ascending.
    fn list_batches(&self, teacher_id: &str) -> Result<Vec<Batch>>;

    /// Update an existing batch.
    fn update_batch(&self, batch: &Batch) -> Result<()>;

    /// Delete a batch by ID. Students of the batch are NOT removed here;
    /// batch deletion and student cleanup are not atomic.
    /// Returns true if the batch was found and deleted.
    fn delete_batch(&self, batch_id: &str) -> Result<bool>;

    /// Adjust the cached student count by `delta` (+1 on admit, -1 on
    /// delete). The count is never recomputed from the student records.
    fn adjust_student_count(&self, batch_id: &str, delta: i64) -> Result<()>;
}

/// Interface for student storage operations, including the combined
/// writes that pair a student mutation with the batch count adjustment.
pub trait StudentStorage: Send + Sync {
    /// Combined write: create the student document and increment the
    /// parent batch's student count.
    fn admit_student(&self, student: &Student) -> Result<()>;

    /// Retrieve a specific student by batch and ID.
    fn get_student(&self, batch_id: &str, student_id: &str) -> Result<Option<Student>>;

    /// List a batch's students ordered by admission time ascending.
    fn list_students(&self, batch_id: &str) -> Result<Vec<Student>>;

    /// List every student owned by a teacher, across all batches.
    fn list_students_by_teacher(&self, teacher_id: &str) -> Result<Vec<Student>>;

    /// Update a student's identity fields. The stored payment list is
    /// preserved as-is.
    fn update_student(&self, student: &Student) -> Result<()>;

    /// Combined write: delete the student document and decrement the
    /// parent batch's student count by exactly 1.
    /// Returns true if the student was found and deleted.
    fn remove_student(&self, batch_id: &str, student_id: &str) -> Result<bool>;

    /// Append one payment to the student's payment list without touching
    /// the existing entries. Returns false if the student was not found.
    fn append_payment(&self, batch_id: &str, student_id: &str, payment: &Payment)
        -> Result<bool>;
}
