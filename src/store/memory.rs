use uuid::Uuid;

use super::{ChecklistStore, RecordStore, StoreData, StoreError, StoredRecord};
use crate::checklist::Checklist;
use crate::import::{AnyRecord, ExistingRecords};

/// Store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: StoreData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn existing_records(&self) -> ExistingRecords {
        self.data.existing_records()
    }

    fn stored_records(&self) -> &[StoredRecord] {
        &self.data.records
    }

    fn insert_records(&mut self, records: Vec<AnyRecord>) -> Result<usize, StoreError> {
        Ok(self.data.push_records(records))
    }
}

impl ChecklistStore for MemoryStore {
    fn save_checklist(&mut self, checklist: Checklist) -> Result<Uuid, StoreError> {
        self.data.push_checklist(checklist)
    }

    fn checklists(&self) -> &[Checklist] {
        &self.data.checklists
    }
}
