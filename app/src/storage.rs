//! In-memory resume storage

use resume_model::ResumeData;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Resume {0} not found")]
    NotFound(u64),

    #[error("Resume storage lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// A resume as returned by the CRUD endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResume {
    pub id: u64,
    #[serde(flatten)]
    pub data: ResumeData,
}

pub trait ResumeStorage: Send + Sync {
    fn get_resume(&self, id: u64) -> Result<Option<StoredResume>>;

    fn create_resume(&self, data: ResumeData) -> Result<StoredResume>;

    /// Replace an existing resume; a missing id is `NotFound`
    fn update_resume(&self, id: u64, data: ResumeData) -> Result<StoredResume>;
}

/// Map-backed storage. Ids start at 1 and are never reused.
#[derive(Debug)]
pub struct MemoryResumeStore {
    resumes: RwLock<HashMap<u64, StoredResume>>,
    next_id: AtomicU64,
}

impl Default for MemoryResumeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryResumeStore {
    pub fn new() -> Self {
        Self {
            resumes: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl ResumeStorage for MemoryResumeStore {
    fn get_resume(&self, id: u64) -> Result<Option<StoredResume>> {
        let resumes = self.resumes.read().map_err(|_| StorageError::Poisoned)?;
        Ok(resumes.get(&id).cloned())
    }

    fn create_resume(&self, data: ResumeData) -> Result<StoredResume> {
        let mut resumes = self.resumes.write().map_err(|_| StorageError::Poisoned)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = StoredResume { id, data };
        resumes.insert(id, stored.clone());
        Ok(stored)
    }

    fn update_resume(&self, id: u64, data: ResumeData) -> Result<StoredResume> {
        let mut resumes = self.resumes.write().map_err(|_| StorageError::Poisoned)?;
        let slot = resumes.get_mut(&id).ok_or(StorageError::NotFound(id))?;
        *slot = StoredResume { id, data };
        Ok(slot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resume_model::PersonalInfo;

    fn named(name: &str) -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                full_name: name.to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_ids_start_at_one() {
        let store = MemoryResumeStore::new();
        assert_eq!(store.create_resume(named("A")).unwrap().id, 1);
        assert_eq!(store.create_resume(named("B")).unwrap().id, 2);
        assert_eq!(store.get_resume(2).unwrap().unwrap().data, named("B"));
        assert!(store.get_resume(3).unwrap().is_none());
    }

    #[test]
    fn test_update() {
        let store = MemoryResumeStore::new();
        let created = store.create_resume(named("A")).unwrap();
        let updated = store.update_resume(created.id, named("C")).unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(store.get_resume(created.id).unwrap().unwrap().data, named("C"));
    }

    #[test]
    fn test_update_missing() {
        let store = MemoryResumeStore::new();
        let err = store.update_resume(9, named("A")).unwrap_err();
        assert!(matches!(err, StorageError::NotFound(9)));
    }

    #[test]
    fn test_stored_resume_is_flat() {
        let stored = StoredResume {
            id: 4,
            data: named("Jane"),
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["personalInfo"]["fullName"], "Jane");
    }
}
