//! CSV-backed batch repository.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::sync::mpsc::Receiver;

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use log::{info, warn};

use crate::domain::models::batch::Batch;
use crate::storage::csv::connection::{CsvConnection, BATCHES_HEADER};
use crate::storage::snapshots::SnapshotBus;
use crate::storage::traits::BatchStorage;

/// Stores every batch in one `batches.csv`, rewritten whole on mutation.
///
/// Clones share the same snapshot bus, so a clone handed to another
/// repository or service publishes to the same subscribers.
#[derive(Clone)]
pub struct BatchRepository {
    connection: CsvConnection,
    snapshots: SnapshotBus<Batch>,
}

impl BatchRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            connection,
            snapshots: SnapshotBus::new(),
        }
    }

    /// Subscribe to full batch snapshots; the receiver is primed with the
    /// current contents and gets a fresh snapshot after every mutation.
    pub fn subscribe(&self) -> Result<Receiver<Vec<Batch>>> {
        Ok(self.snapshots.subscribe(self.read_batches()?))
    }

    /// Read every batch from `batches.csv`.
    fn read_batches(&self) -> Result<Vec<Batch>> {
        self.connection.ensure_batches_file_exists()?;

        let file = File::open(self.connection.batches_file_path())?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut batches = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            batches.push(Batch {
                id: record.get(0).unwrap_or("").to_string(),
                name: record.get(1).unwrap_or("").to_string(),
                teacher_id: record.get(2).unwrap_or("").to_string(),
                student_count: record.get(3).unwrap_or("0").parse::<i64>().unwrap_or(0),
                created_at: parse_timestamp(record.get(4).unwrap_or("")),
            });
        }
        Ok(batches)
    }

    /// Rewrite `batches.csv` with the given batches.
    fn write_batches(&self, batches: &[Batch]) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.connection.batches_file_path())?;
        let mut csv_writer = Writer::from_writer(BufWriter::new(file));

        csv_writer.write_record(BATCHES_HEADER)?;
        for batch in batches {
            csv_writer.write_record(&[
                batch.id.as_str(),
                batch.name.as_str(),
                batch.teacher_id.as_str(),
                &batch.student_count.to_string(),
                &batch.created_at.to_rfc3339(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    fn publish_snapshot(&self) -> Result<()> {
        self.snapshots.publish(self.read_batches()?);
        Ok(())
    }
}

/// Parse an RFC 3339 timestamp, falling back to now on malformed input.
fn parse_timestamp(value: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => {
            warn!("Failed to parse timestamp '{}', using current time", value);
            Utc::now()
        }
    }
}

impl BatchStorage for BatchRepository {
    fn store_batch(&self, batch: &Batch) -> Result<()> {
        let mut batches = self.read_batches()?;
        batches.push(batch.clone());
        self.write_batches(&batches)?;
        info!("Stored batch {} ({})", batch.name, batch.id);
        self.publish_snapshot()
    }

    fn get_batch(&self, batch_id: &str) -> Result<Option<Batch>> {
        Ok(self.read_batches()?.into_iter().find(|b| b.id == batch_id))
    }

    fn list_batches(&self, teacher_id: &str) -> Result<Vec<Batch>> {
        let mut batches: Vec<Batch> = self
            .read_batches()?
            .into_iter()
            .filter(|b| b.teacher_id == teacher_id)
            .collect();
        batches.sort_by_key(|b| b.created_at);
        Ok(batches)
    }

    fn update_batch(&self, batch: &Batch) -> Result<()> {
        let mut batches = self.read_batches()?;
        if let Some(existing) = batches.iter_mut().find(|b| b.id == batch.id) {
            *existing = batch.clone();
        }
        self.write_batches(&batches)?;
        self.publish_snapshot()
    }

    fn delete_batch(&self, batch_id: &str) -> Result<bool> {
        let mut batches = self.read_batches()?;
        let before = batches.len();
        batches.retain(|b| b.id != batch_id);
        let deleted = batches.len() < before;
        if deleted {
            self.write_batches(&batches)?;
            info!("Deleted batch {}", batch_id);
            self.publish_snapshot()?;
        }
        Ok(deleted)
    }

    fn adjust_student_count(&self, batch_id: &str, delta: i64) -> Result<()> {
        let mut batches = self.read_batches()?;
        match batches.iter_mut().find(|b| b.id == batch_id) {
            Some(batch) => {
                batch.student_count += delta;
            }
            None => {
                // The paired student write may already have happened; the
                // count simply drifts, there is no reconciliation.
                warn!("Count adjustment for missing batch {}", batch_id);
                return Ok(());
            }
        }
        self.write_batches(&batches)?;
        self.publish_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use chrono::TimeZone;

    fn sample_batch(id: &str, name: &str, created_at: DateTime<Utc>) -> Batch {
        Batch {
            id: id.to_string(),
            name: name.to_string(),
            teacher_id: "teacher-1".to_string(),
            student_count: 0,
            created_at,
        }
    }

    fn setup() -> (BatchRepository, TestEnvironment) {
        let env = TestEnvironment::new().unwrap();
        let repo = BatchRepository::new(env.connection.clone());
        (repo, env)
    }

    #[test]
    fn test_store_and_get_batch() {
        let (repo, _env) = setup();
        let batch = sample_batch(
            "batch-1",
            "Physics",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );

        repo.store_batch(&batch).unwrap();
        let retrieved = repo.get_batch("batch-1").unwrap().unwrap();
        assert_eq!(retrieved, batch);

        assert!(repo.get_batch("batch-missing").unwrap().is_none());
    }

    #[test]
    fn test_list_batches_filters_and_orders_by_creation() {
        let (repo, _env) = setup();
        let newer = sample_batch(
            "batch-2",
            "Chemistry",
            Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        );
        let older = sample_batch(
            "batch-1",
            "Physics",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        let mut other_teacher = sample_batch(
            "batch-3",
            "Biology",
            Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
        );
        other_teacher.teacher_id = "teacher-2".to_string();

        repo.store_batch(&newer).unwrap();
        repo.store_batch(&older).unwrap();
        repo.store_batch(&other_teacher).unwrap();

        let listed = repo.list_batches("teacher-1").unwrap();
        let names: Vec<&str> = listed.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["Physics", "Chemistry"]);
    }

    #[test]
    fn test_adjust_student_count() {
        let (repo, _env) = setup();
        let batch = sample_batch("batch-1", "Physics", Utc::now());
        repo.store_batch(&batch).unwrap();

        repo.adjust_student_count("batch-1", 1).unwrap();
        repo.adjust_student_count("batch-1", 1).unwrap();
        repo.adjust_student_count("batch-1", -1).unwrap();
        assert_eq!(repo.get_batch("batch-1").unwrap().unwrap().student_count, 1);

        // Adjusting a missing batch is a silent no-op, not an error
        repo.adjust_student_count("batch-missing", 1).unwrap();
    }

    #[test]
    fn test_delete_batch() {
        let (repo, _env) = setup();
        repo.store_batch(&sample_batch("batch-1", "Physics", Utc::now()))
            .unwrap();

        assert!(repo.delete_batch("batch-1").unwrap());
        assert!(!repo.delete_batch("batch-1").unwrap());
        assert!(repo.get_batch("batch-1").unwrap().is_none());
    }

    #[test]
    fn test_subscribe_emits_on_mutation() {
        let (repo, _env) = setup();
        let receiver = repo.subscribe().unwrap();
        assert!(receiver.recv().unwrap().is_empty()); // primed, empty store

        repo.store_batch(&sample_batch("batch-1", "Physics", Utc::now()))
            .unwrap();
        let snapshot = receiver.recv().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].name, "Physics");
    }

    #[test]
    fn test_clones_share_the_snapshot_bus() {
        let (repo, _env) = setup();
        let receiver = repo.subscribe().unwrap();
        receiver.recv().unwrap();

        let clone = repo.clone();
        clone
            .store_batch(&sample_batch("batch-1", "Physics", Utc::now()))
            .unwrap();
        assert_eq!(receiver.recv().unwrap().len(), 1);
    }
}
