//! Local store: the three JSON documents kept under the profile data directory
//!
//! The store never repairs itself. Callers gate mutations on
//! [`LocalStore::require_integrity`] and send the user to `init` when it fails.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ProfilerError, Result};
use crate::model::{AuthRecord, Config, ProfileDocument, RawProfileCache};
use crate::utils::path::expand_tilde;

/// Directory created under the home directory when nothing else is configured
pub const DEFAULT_DATA_DIR: &str = ".shell_profiler";

/// The documents persisted by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Auth,
    Profile,
    RawCache,
}

impl DocumentKind {
    pub fn file_name(self) -> &'static str {
        match self {
            DocumentKind::Auth => "auth.json",
            DocumentKind::Profile => "profile.json",
            DocumentKind::RawCache => "raw_profile.json",
        }
    }
}

/// Handle to the on-disk profile data
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Pick the data directory: CLI override, then config, then `~/.shell_profiler`
    pub fn resolve(cli_override: Option<&Path>, config: &Config) -> Result<Self> {
        if let Some(dir) = cli_override {
            return Ok(Self::new(dir));
        }
        if let Some(dir) = &config.profile.data_dir {
            return Ok(Self::new(expand_tilde(dir)));
        }
        let home = dirs::home_dir().ok_or_else(|| {
            ProfilerError::Integrity("cannot determine the home directory".to_string())
        })?;
        Ok(Self::new(home.join(DEFAULT_DATA_DIR)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, kind: DocumentKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Wipe the data directory and seed empty documents.
    ///
    /// Destructive: an existing directory is removed recursively first, so
    /// every credential, item and cached payload is lost.
    pub fn initialize(&self) -> Result<()> {
        if let Some(home) = dirs::home_dir() {
            if self.dir == home {
                return Err(ProfilerError::validation(
                    "refusing to use the home directory itself as profile data directory",
                ));
            }
        }

        if self.dir.exists() {
            log::warn!("removing existing profile data at {}", self.dir.display());
            fs::remove_dir_all(&self.dir)?;
        }
        fs::create_dir_all(&self.dir)?;

        self.set(DocumentKind::Auth, &AuthRecord::default())?;
        self.set(DocumentKind::Profile, &ProfileDocument::default())?;
        self.set(DocumentKind::RawCache, &RawProfileCache::default())?;
        log::info!("initialized profile data at {}", self.dir.display());
        Ok(())
    }

    /// Whether all three documents exist and parse
    pub fn check_integrity(&self) -> bool {
        match self.require_integrity() {
            Ok(()) => true,
            Err(e) => {
                log::debug!("integrity check failed: {}", e);
                false
            }
        }
    }

    /// Like [`check_integrity`](Self::check_integrity) but says what is wrong
    pub fn require_integrity(&self) -> Result<()> {
        self.auth()?;
        self.profile()?;
        self.raw_cache()?;
        Ok(())
    }

    /// Read a document of the given kind
    pub fn get<T: DeserializeOwned>(&self, kind: DocumentKind) -> Result<T> {
        let content = self.read_raw(kind)?;
        serde_json::from_str(&content).map_err(|e| {
            ProfilerError::Integrity(format!("{} is not readable: {}", kind.file_name(), e))
        })
    }

    /// Persist a document, replacing the previous version in one rename
    pub fn set<T: Serialize>(&self, kind: DocumentKind, doc: &T) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(ProfilerError::Integrity(format!(
                "data directory {} does not exist",
                self.dir.display()
            )));
        }
        let path = self.path_of(kind);
        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(doc)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        log::debug!("wrote {}", path.display());
        Ok(())
    }

    fn read_raw(&self, kind: DocumentKind) -> Result<String> {
        let path = self.path_of(kind);
        if !path.is_file() {
            return Err(ProfilerError::Integrity(format!(
                "{} not found",
                kind.file_name()
            )));
        }
        Ok(fs::read_to_string(path)?)
    }

    pub fn auth(&self) -> Result<AuthRecord> {
        self.get(DocumentKind::Auth)
    }

    pub fn set_auth(&self, auth: &AuthRecord) -> Result<()> {
        self.set(DocumentKind::Auth, auth)
    }

    /// Read the active profile through the validating parser
    pub fn profile(&self) -> Result<ProfileDocument> {
        let content = self.read_raw(DocumentKind::Profile)?;
        ProfileDocument::from_json(&content).map_err(|e| {
            ProfilerError::Integrity(format!(
                "{} is not readable: {}",
                DocumentKind::Profile.file_name(),
                e
            ))
        })
    }

    pub fn set_profile(&self, profile: &ProfileDocument) -> Result<()> {
        profile.validate()?;
        self.set(DocumentKind::Profile, profile)
    }

    pub fn raw_cache(&self) -> Result<RawProfileCache> {
        self.get(DocumentKind::RawCache)
    }

    pub fn set_raw_cache(&self, cache: &RawProfileCache) -> Result<()> {
        self.set(DocumentKind::RawCache, cache)
    }

    /// Read-modify-write the auth record
    pub fn update_auth(&self, f: impl FnOnce(&mut AuthRecord)) -> Result<AuthRecord> {
        self.require_integrity()?;
        let mut auth = self.auth()?;
        f(&mut auth);
        self.set_auth(&auth)?;
        Ok(auth)
    }

    pub fn set_github_token(&self, token: &str) -> Result<()> {
        let token = required_value("token", token)?;
        self.update_auth(|auth| auth.github_token = Some(token))?;
        Ok(())
    }

    pub fn set_github_username(&self, username: &str) -> Result<()> {
        let username = required_value("username", username)?;
        self.update_auth(|auth| auth.github_username = Some(username))?;
        Ok(())
    }

    pub fn set_bashrc_path(&self, path: &str) -> Result<()> {
        let path = required_value("bashrc path", path)?;
        self.require_integrity()?;
        let mut profile = self.profile()?;
        profile.user_bashrc_file_path = Some(path);
        self.set_profile(&profile)
    }
}

fn required_value(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ProfilerError::validation(format!("{} must not be empty", field)));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fresh_store() -> (tempfile::TempDir, LocalStore) {
        let temp_dir = tempdir().unwrap();
        let store = LocalStore::new(temp_dir.path().join("data"));
        store.initialize().unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_missing_dir_fails_integrity() {
        let temp_dir = tempdir().unwrap();
        let store = LocalStore::new(temp_dir.path().join("nothing"));
        assert!(!store.check_integrity());
        assert!(matches!(
            store.require_integrity(),
            Err(ProfilerError::Integrity(_))
        ));
    }

    #[test]
    fn test_initialize_seeds_documents() {
        let (_guard, store) = fresh_store();
        assert!(store.check_integrity());
        assert_eq!(store.auth().unwrap(), AuthRecord::default());
        assert_eq!(store.profile().unwrap(), ProfileDocument::default());
        assert_eq!(store.raw_cache().unwrap(), RawProfileCache::default());
    }

    #[test]
    fn test_initialize_wipes_previous_state() {
        let (_guard, store) = fresh_store();
        store.set_github_token("abc").unwrap();
        fs::write(store.dir().join("stray.txt"), "x").unwrap();

        store.initialize().unwrap();

        assert_eq!(store.auth().unwrap().github_token, None);
        assert!(!store.dir().join("stray.txt").exists());
    }

    #[test]
    fn test_corrupt_document_fails_integrity() {
        let (_guard, store) = fresh_store();
        fs::write(store.path_of(DocumentKind::Profile), "{not json").unwrap();
        assert!(!store.check_integrity());
    }

    #[test]
    fn test_set_leaves_no_temp_file() {
        let (_guard, store) = fresh_store();
        store.set_github_username("octocat").unwrap();
        let leftovers: Vec<_> = fs::read_dir(store.dir())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_setters_require_integrity() {
        let temp_dir = tempdir().unwrap();
        let store = LocalStore::new(temp_dir.path().join("data"));
        assert!(matches!(
            store.set_github_token("abc"),
            Err(ProfilerError::Integrity(_))
        ));
        assert!(!store.dir().exists());
    }

    #[test]
    fn test_credential_setters() {
        let (_guard, store) = fresh_store();
        store.set_github_token(" tok ").unwrap();
        store.set_github_username("octocat").unwrap();
        store.set_bashrc_path("/home/u/.bashrc").unwrap();

        let auth = store.auth().unwrap();
        assert_eq!(auth.github_token.as_deref(), Some("tok"));
        assert_eq!(auth.github_username.as_deref(), Some("octocat"));
        assert_eq!(
            store.profile().unwrap().user_bashrc_file_path.as_deref(),
            Some("/home/u/.bashrc")
        );
    }

    #[test]
    fn test_empty_credential_is_rejected() {
        let (_guard, store) = fresh_store();
        assert!(store.set_github_token("  ").unwrap_err().is_validation());
    }

    #[test]
    fn test_resolve_prefers_cli_override() {
        let mut config = Config::default();
        config.profile.data_dir = Some("/from/config".into());

        let store = LocalStore::resolve(Some(Path::new("/from/cli")), &config).unwrap();
        assert_eq!(store.dir(), Path::new("/from/cli"));

        let store = LocalStore::resolve(None, &config).unwrap();
        assert_eq!(store.dir(), Path::new("/from/config"));
    }
}
