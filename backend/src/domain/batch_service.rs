//! Batch management service.

use std::sync::mpsc::Receiver;

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};

use crate::domain::commands::batches::{
    CreateBatchCommand, CreateBatchResult, DeleteBatchCommand, DeleteBatchResult,
    ListBatchesResult, RenameBatchCommand, RenameBatchResult,
};
use crate::domain::errors::DomainError;
use crate::domain::models::batch::Batch;
use crate::storage::csv::BatchRepository;
use crate::storage::traits::BatchStorage;

const MAX_NAME_LENGTH: usize = 100;

/// Service for creating, renaming, deleting and listing batches.
#[derive(Clone)]
pub struct BatchService {
    batch_repository: BatchRepository,
}

impl BatchService {
    pub fn new(batch_repository: BatchRepository) -> Self {
        Self { batch_repository }
    }

    /// Create a new batch with a zero student count.
    pub fn create_batch(&self, command: CreateBatchCommand) -> Result<CreateBatchResult> {
        info!("Creating batch: name={}", command.name);

        validate_name(&command.name)?;

        let batch = Batch {
            id: Batch::generate_id(),
            name: command.name.trim().to_string(),
            teacher_id: command.teacher_id,
            student_count: 0,
            created_at: Utc::now(),
        };

        self.batch_repository.store_batch(&batch)?;

        info!("Created batch: {} with ID: {}", batch.name, batch.id);

        Ok(CreateBatchResult { batch })
    }

    /// Rename an existing batch.
    pub fn rename_batch(&self, command: RenameBatchCommand) -> Result<RenameBatchResult> {
        info!("Renaming batch: {}", command.batch_id);

        validate_name(&command.new_name)?;

        let mut batch = self
            .batch_repository
            .get_batch(&command.batch_id)?
            .ok_or_else(|| DomainError::not_found("batch", &command.batch_id))?;

        batch.name = command.new_name.trim().to_string();
        self.batch_repository.update_batch(&batch)?;

        info!("Renamed batch {} to {}", batch.id, batch.name);

        Ok(RenameBatchResult { batch })
    }

    /// Delete a batch. The batch's students are NOT cleaned up here; their
    /// records simply become unreachable through batch listings.
    pub fn delete_batch(&self, command: DeleteBatchCommand) -> Result<DeleteBatchResult> {
        info!("Deleting batch: {}", command.batch_id);

        let batch = self
            .batch_repository
            .get_batch(&command.batch_id)?
            .ok_or_else(|| DomainError::not_found("batch", &command.batch_id))?;

        self.batch_repository.delete_batch(&command.batch_id)?;
        if batch.student_count > 0 {
            warn!(
                "Deleted batch {} still counted {} student(s); their records were not removed",
                batch.id, batch.student_count
            );
        }

        Ok(DeleteBatchResult {
            success_message: format!("Batch '{}' deleted successfully", batch.name),
        })
    }

    /// List a teacher's batches ordered by creation time.
    pub fn list_batches(&self, teacher_id: &str) -> Result<ListBatchesResult> {
        let batches = self.batch_repository.list_batches(teacher_id)?;
        Ok(ListBatchesResult { batches })
    }

    /// Get a batch by ID; absence is `None`, not an error.
    pub fn get_batch(&self, batch_id: &str) -> Result<Option<Batch>> {
        self.batch_repository.get_batch(batch_id)
    }

    /// Subscribe to live batch snapshots.
    pub fn subscribe(&self) -> Result<Receiver<Vec<Batch>>> {
        self.batch_repository.subscribe()
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("Batch name cannot be empty."));
    }
    if trimmed.len() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "Batch name cannot exceed {} characters.",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}
