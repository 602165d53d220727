//! Remote identity stored between runs

use serde::{Deserialize, Serialize};

/// Credentials and the gist the active profile is bound to
///
/// Exactly one of these exists per installation. `gist_id` follows the
/// profile that was last loaded or created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRecord {
    #[serde(default)]
    pub github_token: Option<String>,
    #[serde(default)]
    pub github_username: Option<String>,
    #[serde(default)]
    pub gist_id: Option<String>,
}

impl AuthRecord {
    /// Token with surrounding whitespace removed, `None` when unset or blank
    pub fn token(&self) -> Option<&str> {
        self.github_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_serializes_nulls() {
        let json = serde_json::to_string(&AuthRecord::default()).unwrap();
        assert_eq!(
            json,
            r#"{"githubToken":null,"githubUsername":null,"gistId":null}"#
        );
    }

    #[test]
    fn test_blank_token_is_unset() {
        let auth = AuthRecord {
            github_token: Some("   ".into()),
            github_username: Some(" octocat ".into()),
            gist_id: None,
        };
        assert_eq!(auth.token(), None);
    }

    #[test]
    fn test_missing_fields_default() {
        let auth: AuthRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(auth, AuthRecord::default());
    }
}
