//! CSV storage connection: base directory and file layout.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

/// Header row of `batches.csv`.
pub const BATCHES_HEADER: &[&str] = &["id", "name", "teacher_id", "student_count", "created_at"];

/// Header row of each `{batch_id}_students.csv`.
pub const STUDENTS_HEADER: &[&str] = &[
    "id",
    "name",
    "roll",
    "phone",
    "address",
    "class_name",
    "section",
    "school",
    "teacher_id",
    "batch_id",
    "admission_date",
    "payments",
];

/// Manages the data directory holding the CSV files.
///
/// One `batches.csv` holds every batch; each batch has its own
/// `{batch_id}_students.csv` with the embedded payment lists serialized
/// as a JSON field.
#[derive(Debug, Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a connection rooted at `base_directory`, creating the
    /// directory if needed.
    pub fn new(base_directory: impl Into<PathBuf>) -> Result<Self> {
        let base_directory = base_directory.into();
        std::fs::create_dir_all(&base_directory)
            .with_context(|| format!("Failed to create data directory {:?}", base_directory))?;
        info!("CSV storage rooted at {:?}", base_directory);
        Ok(Self { base_directory })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn batches_file_path(&self) -> PathBuf {
        self.base_directory.join("batches.csv")
    }

    pub fn students_file_path(&self, batch_id: &str) -> PathBuf {
        self.base_directory.join(format!("{}_students.csv", batch_id))
    }

    /// Create `batches.csv` with its header row if it does not exist yet.
    pub fn ensure_batches_file_exists(&self) -> Result<()> {
        Self::ensure_file_with_header(&self.batches_file_path(), BATCHES_HEADER)
    }

    /// Create a batch's student file with its header row if it does not
    /// exist yet.
    pub fn ensure_students_file_exists(&self, batch_id: &str) -> Result<()> {
        Self::ensure_file_with_header(&self.students_file_path(batch_id), STUDENTS_HEADER)
    }

    fn ensure_file_with_header(path: &Path, header: &[&str]) -> Result<()> {
        if path.exists() {
            return Ok(());
        }
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .with_context(|| format!("Failed to create {:?}", path))?;
        writeln!(file, "{}", header.join(","))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_base_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("data").join("csv");
        let connection = CsvConnection::new(&nested).unwrap();
        assert!(connection.base_directory().exists());
    }

    #[test]
    fn test_ensure_files_write_headers_once() {
        let temp = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp.path()).unwrap();

        connection.ensure_batches_file_exists().unwrap();
        connection.ensure_batches_file_exists().unwrap();
        let contents = std::fs::read_to_string(connection.batches_file_path()).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.starts_with("id,name,teacher_id"));

        connection.ensure_students_file_exists("batch-1").unwrap();
        assert!(connection.students_file_path("batch-1").exists());
    }
}
