//! Profile engine: picks, loads or creates the active profile
//!
//! The session is a small state machine fed one answer at a time through
//! [`ProfileSession::next_input`]:
//!
//! ```text
//! NoProfile -> Listing -> Selecting -> Active
//!                     \-> Creating  -> Active
//! ```
//!
//! Local documents are only written once a remote call has fully succeeded.

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::error::{ProfilerError, Result};
use crate::model::{ProfileDocument, RawProfileCache};
use crate::remote::{RemoteDirectory, RemoteProfileRef};
use crate::store::LocalStore;

/// Answer that switches profile selection to creation
pub const NEW_PROFILE_CHOICE: &str = "n";

/// Profile the local store is now bound to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveProfile {
    pub name: String,
    pub gist_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    NoProfile,
    Listing,
    Selecting(Vec<RemoteProfileRef>),
    Creating,
    Active(ActiveProfile),
}

/// One interactive profile selection/creation run
pub struct ProfileSession<'a, R> {
    store: &'a LocalStore,
    remote: R,
    default_name: String,
    init_mode: bool,
    state: SessionState,
}

impl<'a, R: RemoteDirectory> ProfileSession<'a, R> {
    pub fn new(store: &'a LocalStore, remote: R, default_name: impl Into<String>) -> Self {
        Self {
            store,
            remote,
            default_name: default_name.into(),
            init_mode: false,
            state: SessionState::NoProfile,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_init_mode(&self) -> bool {
        self.init_mode
    }

    /// List remote profiles.
    ///
    /// Non-empty lists move to `Selecting`. An empty list moves to `Creating`
    /// in init mode and back to `NoProfile` otherwise, which callers report
    /// as "no profiles found".
    pub fn read_profiles(&mut self, init_mode: bool) -> Result<&SessionState> {
        self.store.require_integrity()?;
        self.init_mode = init_mode;
        self.state = SessionState::Listing;

        let refs = match self.remote.list() {
            Ok(refs) => refs,
            Err(e) => {
                self.state = SessionState::NoProfile;
                return Err(e);
            }
        };

        self.state = if !refs.is_empty() {
            SessionState::Selecting(refs)
        } else if init_mode {
            SessionState::Creating
        } else {
            SessionState::NoProfile
        };
        log::debug!("profile session -> {:?}", self.state);
        Ok(&self.state)
    }

    /// Feed the next answer from the prompt.
    ///
    /// On error the state is left where it was so the caller can re-prompt.
    pub fn next_input(&mut self, answer: &str) -> Result<&SessionState> {
        let next = match &self.state {
            SessionState::Selecting(refs) => {
                let choice = answer.trim();
                if choice.eq_ignore_ascii_case(NEW_PROFILE_CHOICE) {
                    SessionState::Creating
                } else {
                    let target = choice
                        .parse::<usize>()
                        .ok()
                        .and_then(|i| refs.get(i))
                        .cloned()
                        .ok_or_else(|| {
                            ProfilerError::validation("Select a valid profile number")
                        })?;
                    SessionState::Active(self.load(&target)?)
                }
            }
            SessionState::Creating => SessionState::Active(self.create(answer)?),
            other => {
                return Err(ProfilerError::validation(format!(
                    "no input expected while {}",
                    describe(other)
                )))
            }
        };

        self.state = next;
        log::debug!("profile session -> {:?}", self.state);
        Ok(&self.state)
    }

    /// Fetch, parse, then replace the local profile. Nothing is written on failure.
    fn load(&self, target: &RemoteProfileRef) -> Result<ActiveProfile> {
        let mut auth = self.store.auth()?;
        let fetched = self.remote.fetch(target)?;
        let mut profile = ProfileDocument::from_json(&fetched.content).map_err(|e| {
            ProfilerError::remote(format!("profile '{}' could not be read: {}", target.name, e))
        })?;

        if profile.name != target.name {
            log::warn!(
                "profile document name '{}' differs from remote name '{}'; using the remote name",
                profile.name,
                target.name
            );
            profile.name = target.name.clone();
        }

        self.store.set_profile(&profile)?;
        auth.gist_id = Some(fetched.id.clone());
        self.store.set_auth(&auth)?;
        self.store.set_raw_cache(&RawProfileCache {
            gist_id: Some(fetched.id.clone()),
            fetched_at: now_rfc3339(),
            content: Some(fetched.raw),
        })?;

        log::info!("loaded profile '{}' from {}", profile.name, fetched.id);
        Ok(ActiveProfile {
            name: profile.name,
            gist_id: fetched.id,
        })
    }

    /// Rename and empty the current profile, then store it remotely
    fn create(&self, answer: &str) -> Result<ActiveProfile> {
        let name = match answer.trim() {
            "" => self.default_name.clone(),
            name => name.to_string(),
        };
        validate_profile_name(&name)?;

        let mut auth = self.store.auth()?;
        let mut profile = self.store.profile()?;
        profile.reset_as(&name);

        let gist_id = self.remote.create(&name, &profile)?;

        self.store.set_profile(&profile)?;
        auth.gist_id = Some(gist_id.clone());
        self.store.set_auth(&auth)?;
        self.store.set_raw_cache(&RawProfileCache {
            gist_id: Some(gist_id.clone()),
            fetched_at: now_rfc3339(),
            content: Some(serde_json::to_string(&profile)?),
        })?;

        log::info!("created profile '{}' as {}", name, gist_id);
        Ok(ActiveProfile { name, gist_id })
    }
}

/// Upload the local profile to the gist it is bound to
pub fn push_profile<R: RemoteDirectory>(store: &LocalStore, remote: R) -> Result<ActiveProfile> {
    store.require_integrity()?;
    let auth = store.auth()?;
    let gist_id = auth.gist_id.ok_or_else(|| {
        ProfilerError::validation("no remote profile in use; run `shprof set profile` first")
    })?;
    let profile = store.profile()?;
    if profile.name.is_empty() {
        return Err(ProfilerError::validation("the local profile has no name"));
    }

    remote.update(&gist_id, &profile.name, &profile)?;
    store.set_raw_cache(&RawProfileCache {
        gist_id: Some(gist_id.clone()),
        fetched_at: now_rfc3339(),
        content: Some(serde_json::to_string(&profile)?),
    })?;

    log::info!("pushed profile '{}' to {}", profile.name, gist_id);
    Ok(ActiveProfile {
        name: profile.name,
        gist_id,
    })
}

fn validate_profile_name(name: &str) -> Result<()> {
    if name.contains(['/', '\\']) {
        return Err(ProfilerError::validation(
            "profile names cannot contain path separators",
        ));
    }
    Ok(())
}

fn describe(state: &SessionState) -> &'static str {
    match state {
        SessionState::NoProfile => "no profile is being selected",
        SessionState::Listing => "listing profiles",
        SessionState::Selecting(_) => "selecting a profile",
        SessionState::Creating => "creating a profile",
        SessionState::Active(_) => "a profile is already active",
    }
}

fn now_rfc3339() -> Option<String> {
    OffsetDateTime::now_utc().format(&Rfc3339).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MemoryDirectory;
    use tempfile::tempdir;

    fn setup() -> (tempfile::TempDir, LocalStore) {
        let temp_dir = tempdir().unwrap();
        let store = LocalStore::new(temp_dir.path().join("data"));
        store.initialize().unwrap();
        (temp_dir, store)
    }

    #[test]
    fn test_empty_listing_outside_init_reports_no_profile() {
        let (_guard, store) = setup();
        let remote = MemoryDirectory::new();
        let mut session = ProfileSession::new(&store, &remote, "DefaultProfile");

        let state = session.read_profiles(false).unwrap();
        assert_eq!(state, &SessionState::NoProfile);
    }

    #[test]
    fn test_empty_listing_in_init_goes_to_creating() {
        let (_guard, store) = setup();
        let remote = MemoryDirectory::new();
        let mut session = ProfileSession::new(&store, &remote, "DefaultProfile");

        assert_eq!(session.read_profiles(true).unwrap(), &SessionState::Creating);
        assert!(session.is_init_mode());
    }

    #[test]
    fn test_empty_name_uses_default() {
        let (_guard, store) = setup();
        let remote = MemoryDirectory::new();
        let mut session = ProfileSession::new(&store, &remote, "DefaultProfile");
        session.read_profiles(true).unwrap();

        let state = session.next_input("  ").unwrap().clone();
        match state {
            SessionState::Active(active) => assert_eq!(active.name, "DefaultProfile"),
            other => panic!("unexpected state {:?}", other),
        }
        assert_eq!(store.profile().unwrap().name, "DefaultProfile");
    }

    #[test]
    fn test_invalid_index_stays_selecting() {
        let (_guard, store) = setup();
        let remote = MemoryDirectory::new();
        remote.insert("Home", &ProfileDocument::default());
        let mut session = ProfileSession::new(&store, &remote, "DefaultProfile");
        session.read_profiles(false).unwrap();

        let err = session.next_input("7").unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(session.state(), SessionState::Selecting(_)));

        let err = session.next_input("abc").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_new_choice_switches_to_creating() {
        let (_guard, store) = setup();
        let remote = MemoryDirectory::new();
        remote.insert("Home", &ProfileDocument::default());
        let mut session = ProfileSession::new(&store, &remote, "DefaultProfile");
        session.read_profiles(false).unwrap();

        assert_eq!(session.next_input(" N ").unwrap(), &SessionState::Creating);
    }

    #[test]
    fn test_input_rejected_when_idle() {
        let (_guard, store) = setup();
        let remote = MemoryDirectory::new();
        let mut session = ProfileSession::new(&store, &remote, "DefaultProfile");
        assert!(session.next_input("0").unwrap_err().is_validation());
    }

    #[test]
    fn test_listing_requires_integrity() {
        let temp_dir = tempdir().unwrap();
        let store = LocalStore::new(temp_dir.path().join("missing"));
        let remote = MemoryDirectory::new();
        let mut session = ProfileSession::new(&store, &remote, "DefaultProfile");

        assert!(matches!(
            session.read_profiles(true),
            Err(ProfilerError::Integrity(_))
        ));
    }

    #[test]
    fn test_failed_create_stays_creating() {
        let (_guard, store) = setup();
        let remote = MemoryDirectory::new();
        let mut session = ProfileSession::new(&store, &remote, "DefaultProfile");
        session.read_profiles(true).unwrap();

        remote.fail_next_create();
        assert!(matches!(
            session.next_input("Work"),
            Err(ProfilerError::Remote(_))
        ));
        assert_eq!(session.state(), &SessionState::Creating);
        assert_eq!(store.profile().unwrap(), ProfileDocument::default());
        assert_eq!(store.auth().unwrap().gist_id, None);
    }

    #[test]
    fn test_name_with_separator_rejected() {
        let (_guard, store) = setup();
        let remote = MemoryDirectory::new();
        let mut session = ProfileSession::new(&store, &remote, "DefaultProfile");
        session.read_profiles(true).unwrap();

        assert!(session.next_input("a/b").unwrap_err().is_validation());
        assert!(remote.is_empty());
    }

    #[test]
    fn test_push_requires_bound_gist() {
        let (_guard, store) = setup();
        let remote = MemoryDirectory::new();
        assert!(push_profile(&store, &remote).unwrap_err().is_validation());
    }
}
