//! Sled-backed complaint store
//!
//! Records live in the `complaints` tree as JSON, keyed by id as big-endian
//! u64 bytes so iteration order is id order. Ids come from
//! `sled::Db::generate_id()`, which is monotonic across restarts.

use std::path::Path;
use std::sync::Arc;

use super::{RecordStore, StoreError};
use crate::config::defaults::COMPLAINTS_TREE;
use crate::types::{ComplaintRecord, NewComplaint};

/// Durable record store
#[derive(Clone)]
pub struct SledRecordStore {
    db: Arc<sled::Db>,
    tree: sled::Tree,
}

impl SledRecordStore {
    /// Open or create the store at the specified path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path_ref = path.as_ref();
        let db = sled::open(path_ref)?;
        let tree = db.open_tree(COMPLAINTS_TREE)?;

        tracing::info!(path = %path_ref.display(), records = tree.len(), "Complaint store opened");

        Ok(Self {
            db: Arc::new(db),
            tree,
        })
    }

    /// Number of stored complaints
    pub fn count(&self) -> usize {
        self.tree.len()
    }
}

impl RecordStore for SledRecordStore {
    fn create(&self, complaint: NewComplaint) -> Result<ComplaintRecord, StoreError> {
        // generate_id starts at 0; ids are 1-based like the original table
        let id = self.db.generate_id()? + 1;
        let record = complaint.into_record(id);

        let value = serde_json::to_vec(&record)?;
        self.tree.insert(id.to_be_bytes(), value)?;
        self.tree.flush()?;

        tracing::debug!(id, status = %record.status, "Stored complaint");

        Ok(record)
    }

    fn find_by_id(&self, id: u64) -> Result<ComplaintRecord, StoreError> {
        match self.tree.get(id.to_be_bytes())? {
            Some(value) => Ok(serde_json::from_slice(&value)?),
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn find_all(&self) -> Result<Vec<ComplaintRecord>, StoreError> {
        let mut records = Vec::with_capacity(self.tree.len());

        for item in self.tree.iter() {
            let (key, value) = item?;
            match serde_json::from_slice::<ComplaintRecord>(&value) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(key = ?key, error = %e, "Skipping unreadable complaint record");
                }
            }
        }

        Ok(records)
    }

    fn backend_name(&self) -> &'static str {
        "Sled"
    }
}
