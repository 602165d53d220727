//! HTTP helpers shared by remote clients

use std::time::Duration;
use url::Url;

use crate::error::ProfilerError;

/// Build an agent with the configured timeout
pub fn build_agent(timeout_secs: u64) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("shprof/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Turn a ureq failure into a remote error, keeping the response body when there is one
pub fn remote_error(context: &str, err: ureq::Error) -> ProfilerError {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response.into_string().unwrap_or_default();
            let detail = github_message(&body).unwrap_or(body);
            if detail.is_empty() {
                ProfilerError::remote(format!("{}: HTTP {}", context, code))
            } else {
                ProfilerError::remote(format!("{}: HTTP {} ({})", context, code, detail))
            }
        }
        ureq::Error::Transport(transport) => {
            ProfilerError::remote(format!("{}: {}", context, transport))
        }
    }
}

/// GitHub error bodies look like `{"message": "..."}`
fn github_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

/// Check if a string is a valid URL
pub fn is_url(s: &str) -> bool {
    if let Ok(url) = Url::parse(s) {
        url.scheme() == "http" || url.scheme() == "https"
    } else {
        false
    }
}
