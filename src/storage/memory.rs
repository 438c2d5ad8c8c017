//! In-memory complaint store
//!
//! Thread-safe via `RwLock`. Not durable — data lost on restart.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use super::{RecordStore, StoreError};
use crate::types::{ComplaintRecord, NewComplaint};

/// In-memory persistence for testing and ephemeral deployments
pub struct InMemoryRecordStore {
    records: RwLock<BTreeMap<u64, ComplaintRecord>>,
    next_id: AtomicU64,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored complaints
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn create(&self, complaint: NewComplaint) -> Result<ComplaintRecord, StoreError> {
        let mut store = self
            .records
            .write()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let record = complaint.into_record(id);
        store.insert(id, record.clone());

        Ok(record)
    }

    fn find_by_id(&self, id: u64) -> Result<ComplaintRecord, StoreError> {
        let store = self
            .records
            .read()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        store.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn find_all(&self) -> Result<Vec<ComplaintRecord>, StoreError> {
        let store = self
            .records
            .read()
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(store.values().cloned().collect())
    }

    fn backend_name(&self) -> &'static str {
        "InMemory"
    }
}
