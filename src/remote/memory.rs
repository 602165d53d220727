//! In-process remote directory, used by tests and dry runs

use std::cell::{Cell, RefCell};

use super::{FetchedProfile, RemoteDirectory, RemoteProfileRef};
use crate::error::{ProfilerError, Result};
use crate::model::ProfileDocument;

#[derive(Debug, Clone)]
struct StoredProfile {
    id: String,
    name: String,
    content: String,
}

/// Keeps profiles in memory and can be told to fail the next call
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    profiles: RefCell<Vec<StoredProfile>>,
    next_id: Cell<u32>,
    fail_fetch: Cell<bool>,
    fail_create: Cell<bool>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a profile and return its id
    pub fn insert(&self, name: &str, document: &ProfileDocument) -> String {
        let id = self.allocate_id();
        let content = serde_json::to_string(document).unwrap_or_default();
        self.profiles.borrow_mut().push(StoredProfile {
            id: id.clone(),
            name: name.to_string(),
            content,
        });
        id
    }

    /// Seed raw content as-is, valid or not
    pub fn insert_raw(&self, name: &str, content: &str) -> String {
        let id = self.allocate_id();
        self.profiles.borrow_mut().push(StoredProfile {
            id: id.clone(),
            name: name.to_string(),
            content: content.to_string(),
        });
        id
    }

    pub fn fail_next_fetch(&self) {
        self.fail_fetch.set(true);
    }

    pub fn fail_next_create(&self) {
        self.fail_create.set(true);
    }

    pub fn len(&self) -> usize {
        self.profiles.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored content for `id`
    pub fn content_of(&self, id: &str) -> Option<String> {
        self.profiles
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.content.clone())
    }

    fn allocate_id(&self) -> String {
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        format!("mem-{}", n)
    }
}

impl RemoteDirectory for MemoryDirectory {
    fn list(&self) -> Result<Vec<RemoteProfileRef>> {
        Ok(self
            .profiles
            .borrow()
            .iter()
            .map(|p| RemoteProfileRef {
                id: p.id.clone(),
                url: format!("memory://{}", p.id),
                name: p.name.clone(),
            })
            .collect())
    }

    fn fetch(&self, profile: &RemoteProfileRef) -> Result<FetchedProfile> {
        if self.fail_fetch.replace(false) {
            return Err(ProfilerError::remote("simulated network failure"));
        }
        let profiles = self.profiles.borrow();
        let stored = profiles
            .iter()
            .find(|p| p.id == profile.id)
            .ok_or_else(|| ProfilerError::remote(format!("HTTP 404 for {}", profile.url)))?;
        Ok(FetchedProfile {
            id: stored.id.clone(),
            content: stored.content.clone(),
            raw: stored.content.clone(),
        })
    }

    fn create(&self, name: &str, document: &ProfileDocument) -> Result<String> {
        if self.fail_create.replace(false) {
            return Err(ProfilerError::remote("simulated create failure"));
        }
        let content = serde_json::to_string(document)?;
        Ok(self.insert_raw(name, &content))
    }

    fn update(&self, id: &str, name: &str, document: &ProfileDocument) -> Result<()> {
        let content = serde_json::to_string(document)?;
        let mut profiles = self.profiles.borrow_mut();
        let stored = profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ProfilerError::remote(format!("HTTP 404 for gist {}", id)))?;
        stored.name = name.to_string();
        stored.content = content;
        Ok(())
    }
}
