//! Test utilities for the CSV storage layer.
//!
//! RAII-based cleanup: the temporary data directory lives exactly as long
//! as the environment, even when a test panics.

use anyhow::Result;
use tempfile::TempDir;

use super::batch_repository::BatchRepository;
use super::connection::CsvConnection;
use super::student_repository::StudentRepository;

/// A temporary directory plus a connection rooted in it.
pub struct TestEnvironment {
    pub connection: CsvConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = CsvConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// Repository instances over a fresh test environment.
pub struct TestHelper {
    pub env: TestEnvironment,
    pub batch_repo: BatchRepository,
    pub student_repo: StudentRepository,
}

impl TestHelper {
    pub fn new() -> Result<Self> {
        let env = TestEnvironment::new()?;
        let batch_repo = BatchRepository::new(env.connection.clone());
        let student_repo = StudentRepository::new(env.connection.clone(), batch_repo.clone());
        Ok(Self {
            env,
            batch_repo,
            student_repo,
        })
    }
}
