//! Complaint Record Storage
//!
//! `RecordStore` abstracts persistence so backends can be swapped without
//! touching pipeline code:
//! - `SledRecordStore`: durable sled database (production)
//! - `InMemoryRecordStore`: in-memory store for tests and ephemeral runs
//!
//! The pipeline performs exactly one `create` per analyzed complaint; the API
//! reads through `find_by_id` / `find_all`.

mod memory;
mod sled_store;

pub use memory::InMemoryRecordStore;
pub use sled_store::SledRecordStore;

use crate::types::{ComplaintRecord, NewComplaint};

/// Trait for pluggable record store backends
///
/// Implementations must be thread-safe (Send + Sync) for shared access
/// across request handlers. Each `create` is a single atomic write.
pub trait RecordStore: Send + Sync {
    /// Persist a new complaint and return it with its assigned id
    fn create(&self, complaint: NewComplaint) -> Result<ComplaintRecord, StoreError>;

    /// Look up one complaint
    fn find_by_id(&self, id: u64) -> Result<ComplaintRecord, StoreError>;

    /// All complaints, ascending by id
    fn find_all(&self) -> Result<Vec<ComplaintRecord>, StoreError>;

    /// Backend name for logging and health checks
    fn backend_name(&self) -> &'static str;
}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Complaint {0} not found")]
    NotFound(u64),
    #[error("database error: {0}")]
    Database(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
