//! # Storage Module
//!
//! Data persistence for the coaching tracker.
//!
//! The domain layer talks to storage only through the traits in
//! [`traits`]; the CSV implementation in [`csv`] can be swapped for any
//! other backend without touching domain logic. Reads return the current
//! contents; subscribers of the snapshot port in [`snapshots`] get a full
//! fresh snapshot pushed after every successful mutation.

pub mod csv;
pub mod snapshots;
pub mod traits;

pub use csv::{BatchRepository, CsvConnection, StudentRepository};
pub use snapshots::SnapshotBus;
pub use traits::{BatchStorage, StudentStorage};
