pub mod batch;
pub mod payment;
pub mod student;
