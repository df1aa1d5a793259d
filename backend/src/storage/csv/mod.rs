//! # CSV Storage Module
//!
//! File-based storage implementation for the coaching tracker. The domain
//! layer is storage-agnostic; this module satisfies the storage traits
//! with plain CSV files under one data directory.
//!
//! ## File Format
//!
//! One `batches.csv` for every batch:
//! ```csv
//! id,name,teacher_id,student_count,created_at
//! batch-6f9a...,Physics (Evening),teacher-1,12,2024-01-15T10:30:00+00:00
//! ```
//!
//! One `{batch_id}_students.csv` per batch, with the embedded payment list
//! serialized as a JSON field:
//! ```csv
//! id,name,roll,phone,address,class_name,section,school,teacher_id,batch_id,admission_date,payments
//! student-c41b...,Asha,7,017...,Dhaka,Nine,A,City High,teacher-1,batch-6f9a...,2024-01-20T08:00:00+00:00,"[{""amount"":500.0,...}]"
//! ```
//!
//! Every mutation rewrites the affected file whole and publishes a fresh
//! snapshot to subscribers.

pub mod batch_repository;
pub mod connection;
pub mod student_repository;

#[cfg(test)]
pub mod test_utils;

pub use batch_repository::BatchRepository;
pub use connection::CsvConnection;
pub use student_repository::StudentRepository;
