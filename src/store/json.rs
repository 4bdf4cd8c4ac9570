use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use super::{ChecklistStore, RecordStore, StoreData, StoreError, StoredRecord};
use crate::checklist::Checklist;
use crate::import::{AnyRecord, ExistingRecords};

/// Store kept in a single JSON file.
///
/// The whole file is read on open and rewritten after every mutation.
#[derive(Debug)]
pub struct JsonStore {
    path: PathBuf,
    data: StoreData,
}

impl JsonStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            debug!("Store file {:?} doesn't exist, starting empty", path);
            return Ok(Self {
                path,
                data: StoreData::default(),
            });
        }

        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let data: StoreData = serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
            path: path.clone(),
            source,
        })?;

        debug!(
            "Loaded store from {:?}: {} records, {} checklists",
            path,
            data.records.len(),
            data.checklists.len()
        );
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `data` next to the store file and rename it into place
    fn persist(&self, data: &StoreData) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
                info!("Created store directory: {:?}", parent);
            }
        }

        let content = serde_json::to_string_pretty(data)?;
        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, content).map_err(|source| StoreError::Io {
            path: temp.clone(),
            source,
        })?;
        fs::rename(&temp, &self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!("Store written to {:?}", self.path);
        Ok(())
    }
}

impl RecordStore for JsonStore {
    fn existing_records(&self) -> ExistingRecords {
        self.data.existing_records()
    }

    fn stored_records(&self) -> &[StoredRecord] {
        &self.data.records
    }

    fn insert_records(&mut self, records: Vec<AnyRecord>) -> Result<usize, StoreError> {
        let mut next = self.data.clone();
        let written = next.push_records(records);
        self.persist(&next)?;
        self.data = next;
        Ok(written)
    }
}

impl ChecklistStore for JsonStore {
    fn save_checklist(&mut self, checklist: Checklist) -> Result<Uuid, StoreError> {
        let mut next = self.data.clone();
        let id = next.push_checklist(checklist)?;
        self.persist(&next)?;
        self.data = next;
        Ok(id)
    }

    fn checklists(&self) -> &[Checklist] {
        &self.data.checklists
    }
}
