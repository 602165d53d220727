//! GitHub gist backed profile directory

use serde::Deserialize;
use serde_json::json;
use std::collections::BTreeMap;

use super::{FetchedProfile, RemoteDirectory, RemoteProfileRef};
use crate::error::{ProfilerError, Result};
use crate::model::{AuthRecord, ProfileDocument, RemoteConfig};
use crate::utils::http::{build_agent, is_url, remote_error};

#[derive(Debug, Deserialize)]
struct Gist {
    id: String,
    url: String,
    #[serde(default)]
    files: BTreeMap<String, GistFile>,
}

#[derive(Debug, Deserialize)]
struct GistFile {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    truncated: bool,
    #[serde(default)]
    raw_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CreatedGist {
    id: String,
}

/// Talks to the GitHub gists API with a personal access token
pub struct GistClient {
    agent: ureq::Agent,
    api_url: String,
    extension: String,
    token: Option<String>,
}

impl GistClient {
    pub fn new(config: &RemoteConfig, auth: &AuthRecord) -> Self {
        Self {
            agent: build_agent(config.timeout_secs),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            extension: config.file_extension.clone(),
            token: auth.token().map(str::to_string),
        }
    }

    pub fn file_name(&self, profile_name: &str) -> String {
        format!("{}{}", profile_name, self.extension)
    }

    /// Profile name for a gist filename, `None` if it is not a profile file
    fn profile_name<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_suffix(self.extension.as_str())
            .filter(|name| !name.is_empty())
    }

    fn token(&self) -> Result<&str> {
        self.token.as_deref().ok_or_else(|| {
            ProfilerError::Unauthenticated(
                "no GitHub token set; run `shprof set token <TOKEN>`".to_string(),
            )
        })
    }

    fn authorized(&self, method: &str, url: &str) -> Result<ureq::Request> {
        let token = self.token()?;
        Ok(self
            .agent
            .request(method, url)
            .set("Authorization", &format!("token {}", token))
            .set("Accept", "application/vnd.github+json"))
    }

    fn get_string(&self, context: &str, url: &str) -> Result<String> {
        let response = self
            .authorized("GET", url)?
            .call()
            .map_err(|e| remote_error(context, e))?;
        response
            .into_string()
            .map_err(|e| ProfilerError::remote(format!("{}: {}", context, e)))
    }

    fn gist_body(&self, name: &str, document: &ProfileDocument) -> Result<String> {
        let content = serde_json::to_string(document)?;
        let mut files = serde_json::Map::new();
        files.insert(self.file_name(name), json!({ "content": content }));
        Ok(json!({
            "description": format!("shprof profile: {}", name),
            "public": false,
            "files": files,
        })
        .to_string())
    }
}

impl RemoteDirectory for GistClient {
    fn list(&self) -> Result<Vec<RemoteProfileRef>> {
        // Authenticated listing includes the user's secret gists
        let url = format!("{}/gists", self.api_url);
        log::debug!("listing gists at {}", url);
        let body = self.get_string("listing profiles", &url)?;
        let gists: Vec<Gist> = serde_json::from_str(&body)
            .map_err(|e| ProfilerError::remote(format!("malformed gist list: {}", e)))?;

        let refs: Vec<RemoteProfileRef> = gists
            .into_iter()
            .filter_map(|gist| {
                let name = gist
                    .files
                    .keys()
                    .find_map(|file| self.profile_name(file))?
                    .to_string();
                Some(RemoteProfileRef {
                    id: gist.id,
                    url: gist.url,
                    name,
                })
            })
            .collect();
        log::debug!("found {} profile gists", refs.len());
        Ok(refs)
    }

    fn fetch(&self, profile: &RemoteProfileRef) -> Result<FetchedProfile> {
        if !is_url(&profile.url) {
            return Err(ProfilerError::remote(format!(
                "invalid profile reference: {}",
                profile.url
            )));
        }
        log::debug!("fetching gist {}", profile.id);
        let raw = self.get_string("loading profile", &profile.url)?;
        let gist: Gist = serde_json::from_str(&raw)
            .map_err(|e| ProfilerError::remote(format!("malformed gist: {}", e)))?;

        let file_name = self.file_name(&profile.name);
        let file = gist.files.get(&file_name).ok_or_else(|| {
            ProfilerError::remote(format!("gist {} has no file {}", gist.id, file_name))
        })?;

        let content = match (&file.content, file.truncated, &file.raw_url) {
            (_, true, Some(raw_url)) => self.get_string("loading truncated profile", raw_url)?,
            (Some(content), _, _) => content.clone(),
            _ => {
                return Err(ProfilerError::remote(format!(
                    "gist {} file {} has no content",
                    gist.id, file_name
                )))
            }
        };

        Ok(FetchedProfile {
            id: gist.id,
            content,
            raw,
        })
    }

    fn create(&self, name: &str, document: &ProfileDocument) -> Result<String> {
        let url = format!("{}/gists", self.api_url);
        let body = self.gist_body(name, document)?;
        log::debug!("creating gist {}", self.file_name(name));

        let response = self
            .authorized("POST", &url)?
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(|e| remote_error("creating profile", e))?;

        let status = response.status();
        if status != 201 {
            return Err(ProfilerError::remote(format!(
                "creating profile: expected HTTP 201, got {}",
                status
            )));
        }

        let text = response
            .into_string()
            .map_err(|e| ProfilerError::remote(format!("creating profile: {}", e)))?;
        let created: CreatedGist = serde_json::from_str(&text)
            .map_err(|e| ProfilerError::remote(format!("malformed create response: {}", e)))?;
        Ok(created.id)
    }

    fn update(&self, id: &str, name: &str, document: &ProfileDocument) -> Result<()> {
        let url = format!("{}/gists/{}", self.api_url, id);
        let body = self.gist_body(name, document)?;
        log::debug!("updating gist {}", id);

        self.authorized("PATCH", &url)?
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(|e| remote_error("pushing profile", e))?;
        Ok(())
    }
}
