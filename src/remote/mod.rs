//! Remote profile directory: one remote document per named profile

mod gist;
mod memory;

pub use gist::GistClient;
pub use memory::MemoryDirectory;

use crate::error::Result;
use crate::model::ProfileDocument;

/// Handle returned by [`RemoteDirectory::list`]; only lives for one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteProfileRef {
    /// Remote identifier (gist id)
    pub id: String,
    /// Where the full document is fetched from
    pub url: String,
    /// Profile name, i.e. the filename without the profile extension
    pub name: String,
}

/// Full content stored at a reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedProfile {
    /// Remote identifier reported by the response, not the display name
    pub id: String,
    /// Serialized `ProfileDocument`
    pub content: String,
    /// Whole response body as received
    pub raw: String,
}

/// Operations the profile engine needs from the remote side.
///
/// Every call is a single round-trip and mutates nothing locally.
pub trait RemoteDirectory {
    /// List profiles. An empty list means "no profiles yet".
    fn list(&self) -> Result<Vec<RemoteProfileRef>>;

    /// Fetch the document a reference points at
    fn fetch(&self, profile: &RemoteProfileRef) -> Result<FetchedProfile>;

    /// Store `document` as `<name><extension>` and return the new remote id
    fn create(&self, name: &str, document: &ProfileDocument) -> Result<String>;

    /// Overwrite the document held by `id`
    fn update(&self, id: &str, name: &str, document: &ProfileDocument) -> Result<()>;
}

impl<T: RemoteDirectory + ?Sized> RemoteDirectory for &T {
    fn list(&self) -> Result<Vec<RemoteProfileRef>> {
        (**self).list()
    }

    fn fetch(&self, profile: &RemoteProfileRef) -> Result<FetchedProfile> {
        (**self).fetch(profile)
    }

    fn create(&self, name: &str, document: &ProfileDocument) -> Result<String> {
        (**self).create(name, document)
    }

    fn update(&self, id: &str, name: &str, document: &ProfileDocument) -> Result<()> {
        (**self).update(id, name, document)
    }
}
