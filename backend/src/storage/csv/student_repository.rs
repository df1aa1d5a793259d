//! CSV-backed student repository.
//!
//! Each batch has its own `{batch_id}_students.csv`; the embedded payment
//! list is serialized as a JSON field so payments never need a file of
//! their own. The combined admit/remove writes pair the student mutation
//! with the batch count adjustment as two sequential file writes - if the
//! second write fails the cached count drifts, and nothing reconciles it.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::sync::mpsc::Receiver;

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::{Reader, Writer};
use log::{info, warn};

use crate::domain::models::payment::Payment;
use crate::domain::models::student::Student;
use crate::storage::csv::batch_repository::BatchRepository;
use crate::storage::csv::connection::{CsvConnection, STUDENTS_HEADER};
use crate::storage::snapshots::SnapshotBus;
use crate::storage::traits::{BatchStorage, StudentStorage};

/// Stores students per batch file, rewritten whole on mutation.
#[derive(Clone)]
pub struct StudentRepository {
    connection: CsvConnection,
    batch_repository: BatchRepository,
    snapshots: SnapshotBus<Student>,
}

impl StudentRepository {
    /// Create a repository sharing `batch_repository` so count adjustments
    /// publish to the same batch subscribers.
    pub fn new(connection: CsvConnection, batch_repository: BatchRepository) -> Self {
        Self {
            connection,
            batch_repository,
            snapshots: SnapshotBus::new(),
        }
    }

    /// Subscribe to full student snapshots across every batch; primed with
    /// the current contents, then one snapshot per mutation.
    pub fn subscribe(&self) -> Result<Receiver<Vec<Student>>> {
        Ok(self.snapshots.subscribe(self.read_all_students()?))
    }

    /// Read one batch's students from its CSV file.
    fn read_students(&self, batch_id: &str) -> Result<Vec<Student>> {
        self.connection.ensure_students_file_exists(batch_id)?;

        let file = File::open(self.connection.students_file_path(batch_id))?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut students = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            students.push(Student {
                id: record.get(0).unwrap_or("").to_string(),
                name: record.get(1).unwrap_or("").to_string(),
                roll: record.get(2).unwrap_or("").to_string(),
                phone: record.get(3).unwrap_or("").to_string(),
                address: record.get(4).unwrap_or("").to_string(),
                class_name: record.get(5).unwrap_or("").to_string(),
                section: record.get(6).unwrap_or("").to_string(),
                school: record.get(7).unwrap_or("").to_string(),
                teacher_id: record.get(8).unwrap_or("").to_string(),
                batch_id: record.get(9).unwrap_or("").to_string(),
                admission_date: parse_timestamp(record.get(10).unwrap_or("")),
                payments: parse_payments(record.get(11).unwrap_or("[]")),
            });
        }
        Ok(students)
    }

    /// Rewrite one batch's student file.
    fn write_students(&self, batch_id: &str, students: &[Student]) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(self.connection.students_file_path(batch_id))?;
        let mut csv_writer = Writer::from_writer(BufWriter::new(file));

        csv_writer.write_record(STUDENTS_HEADER)?;
        for student in students {
            csv_writer.write_record(&[
                student.id.as_str(),
                student.name.as_str(),
                student.roll.as_str(),
                student.phone.as_str(),
                student.address.as_str(),
                student.class_name.as_str(),
                student.section.as_str(),
                student.school.as_str(),
                student.teacher_id.as_str(),
                student.batch_id.as_str(),
                &student.admission_date.to_rfc3339(),
                &serde_json::to_string(&student.payments)?,
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// Every student in the store, across all batch files.
    fn read_all_students(&self) -> Result<Vec<Student>> {
        let mut students = Vec::new();
        for entry in std::fs::read_dir(self.connection.base_directory())? {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if let Some(batch_id) = file_name.strip_suffix("_students.csv") {
                students.extend(self.read_students(batch_id)?);
            }
        }
        Ok(students)
    }

    fn publish_snapshot(&self) -> Result<()> {
        self.snapshots.publish(self.read_all_students()?);
        Ok(())
    }
}

fn parse_timestamp(value: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(_) => {
            warn!("Failed to parse timestamp '{}', using current time", value);
            Utc::now()
        }
    }
}

fn parse_payments(value: &str) -> Vec<Payment> {
    match serde_json::from_str(value) {
        Ok(payments) => payments,
        Err(e) => {
            warn!("Failed to parse payment list: {}", e);
            Vec::new()
        }
    }
}

impl StudentStorage for StudentRepository {
    fn admit_student(&self, student: &Student) -> Result<()> {
        let mut students = self.read_students(&student.batch_id)?;
        students.push(student.clone());
        self.write_students(&student.batch_id, &students)?;
        // Paired count write; a failure here leaves the count stale.
        self.batch_repository
            .adjust_student_count(&student.batch_id, 1)?;
        info!(
            "Admitted student {} ({}) into batch {}",
            student.name, student.id, student.batch_id
        );
        self.publish_snapshot()
    }

    fn get_student(&self, batch_id: &str, student_id: &str) -> Result<Option<Student>> {
        Ok(self
            .read_students(batch_id)?
            .into_iter()
            .find(|s| s.id == student_id))
    }

    fn list_students(&self, batch_id: &str) -> Result<Vec<Student>> {
        let mut students = self.read_students(batch_id)?;
        students.sort_by_key(|s| s.admission_date);
        Ok(students)
    }

    fn list_students_by_teacher(&self, teacher_id: &str) -> Result<Vec<Student>> {
        Ok(self
            .read_all_students()?
            .into_iter()
            .filter(|s| s.teacher_id == teacher_id)
            .collect())
    }

    fn update_student(&self, student: &Student) -> Result<()> {
        let mut students = self.read_students(&student.batch_id)?;
        if let Some(existing) = students.iter_mut().find(|s| s.id == student.id) {
            // Identity fields come from the caller; the stored payment
            // list is authoritative and kept untouched.
            let payments = std::mem::take(&mut existing.payments);
            *existing = student.clone();
            existing.payments = payments;
        }
        self.write_students(&student.batch_id, &students)?;
        self.publish_snapshot()
    }

    fn remove_student(&self, batch_id: &str, student_id: &str) -> Result<bool> {
        let mut students = self.read_students(batch_id)?;
        let before = students.len();
        students.retain(|s| s.id != student_id);
        let removed = students.len() < before;
        if removed {
            self.write_students(batch_id, &students)?;
            // Decrement by exactly 1; there is no recount.
            self.batch_repository.adjust_student_count(batch_id, -1)?;
            info!("Removed student {} from batch {}", student_id, batch_id);
            self.publish_snapshot()?;
        }
        Ok(removed)
    }

    fn append_payment(&self, batch_id: &str, student_id: &str, payment: &Payment) -> Result<bool> {
        let mut students = self.read_students(batch_id)?;
        let Some(student) = students.iter_mut().find(|s| s.id == student_id) else {
            return Ok(false);
        };
        student.payments.push(payment.clone());
        self.write_students(batch_id, &students)?;
        info!(
            "Appended payment of {} to student {} in batch {}",
            payment.amount, student_id, batch_id
        );
        self.publish_snapshot()?;
        Ok(true)
    }
}
