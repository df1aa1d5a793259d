//! # Coaching Tracker Backend
//!
//! Synchronous backend for a private-tutoring business: batches of
//! students, payment histories, and month-based paid/unpaid reporting.
//!
//! The crate is layered in two modules:
//! - [`domain`] holds the services, the command/result types and the pure
//!   aggregation engine behind every report
//! - [`storage`] holds the storage traits, the CSV implementation and the
//!   snapshot port frontends subscribe to
//!
//! [`Backend`] wires everything together over one data directory.

use std::path::PathBuf;

use anyhow::Result;

pub mod domain;
pub mod storage;

pub use storage::csv::CsvConnection;

/// Main backend struct that orchestrates all services.
pub struct Backend {
    pub batch_service: domain::BatchService,
    pub student_service: domain::StudentService,
    pub payment_service: domain::PaymentService,
    pub reporting_service: domain::ReportingService,
    pub calendar_service: domain::CalendarService,
}

impl Backend {
    /// Create a backend rooted at `data_directory`, creating the directory
    /// if needed.
    pub fn new(data_directory: impl Into<PathBuf>) -> Result<Self> {
        let connection = CsvConnection::new(data_directory)?;

        let batch_repository = storage::csv::BatchRepository::new(connection.clone());
        let student_repository =
            storage::csv::StudentRepository::new(connection, batch_repository.clone());

        let calendar_service = domain::CalendarService::new();
        let reporting_service = domain::ReportingService::new(
            batch_repository.clone(),
            student_repository.clone(),
            calendar_service.clone(),
        );

        Ok(Backend {
            batch_service: domain::BatchService::new(batch_repository),
            student_service: domain::StudentService::new(student_repository.clone()),
            payment_service: domain::PaymentService::new(student_repository),
            reporting_service,
            calendar_service,
        })
    }
}
