//! Persistence of committed records and checklists

pub mod json;
pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use crate::checklist::Checklist;
use crate::import::{AnyRecord, ExistingRecords};

pub use json::JsonStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store at {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("checklist {0} already exists")]
    DuplicateChecklist(Uuid),
}

/// A committed record with its storage metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: Uuid,
    pub imported_at: DateTime<Utc>,
    pub record: AnyRecord,
}

impl StoredRecord {
    pub fn new(record: AnyRecord) -> Self {
        Self {
            id: Uuid::new_v4(),
            imported_at: Utc::now(),
            record,
        }
    }
}

/// Everything a store holds, in the shape written to disk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    #[serde(default)]
    pub records: Vec<StoredRecord>,
    #[serde(default)]
    pub checklists: Vec<Checklist>,
}

impl StoreData {
    pub fn existing_records(&self) -> ExistingRecords {
        let mut existing = ExistingRecords::new();
        existing.extend(self.records.iter().map(|r| r.record.clone()));
        existing
    }

    fn push_records(&mut self, records: Vec<AnyRecord>) -> usize {
        let count = records.len();
        self.records.extend(records.into_iter().map(StoredRecord::new));
        count
    }

    fn push_checklist(&mut self, checklist: Checklist) -> Result<Uuid, StoreError> {
        if self.checklists.iter().any(|c| c.id == checklist.id) {
            return Err(StoreError::DuplicateChecklist(checklist.id));
        }
        let id = checklist.id;
        self.checklists.push(checklist);
        Ok(id)
    }
}

/// Storage of imported master data
pub trait RecordStore {
    /// Snapshot of stored records, used for unique and reference rules
    fn existing_records(&self) -> ExistingRecords;

    fn stored_records(&self) -> &[StoredRecord];

    /// Store accepted records, returning how many were written
    fn insert_records(&mut self, records: Vec<AnyRecord>) -> Result<usize, StoreError>;
}

/// Storage of committed checklists
pub trait ChecklistStore {
    fn save_checklist(&mut self, checklist: Checklist) -> Result<Uuid, StoreError>;

    fn checklists(&self) -> &[Checklist];
}
