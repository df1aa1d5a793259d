//! # Domain Module
//!
//! Business logic for the coaching tracker.
//!
//! Services validate commands, call through the storage traits and hand
//! back result structs; the pure aggregation engine in [`aggregation`]
//! computes every derived figure from plain student lists. Nothing in
//! this module performs I/O directly.

pub mod aggregation;
pub mod batch_service;
pub mod calendar;
pub mod commands;
pub mod errors;
pub mod forms;
pub mod mappers;
pub mod models;
pub mod payment_service;
pub mod reporting_service;
pub mod student_service;

pub use batch_service::BatchService;
pub use calendar::CalendarService;
pub use errors::DomainError;
pub use payment_service::PaymentService;
pub use reporting_service::ReportingService;
pub use student_service::StudentService;
