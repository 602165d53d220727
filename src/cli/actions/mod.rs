//! Command implementations

pub mod delete;
pub mod export;
pub mod init;
pub mod list;
pub mod profile;
pub mod push;
pub mod set;
pub mod stat;

use anyhow::Result;
use dialoguer::Input;

/// Return `value` if given, otherwise ask for it. Empty answers are refused.
pub(crate) fn value_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    let answer: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(answer)
}

/// Like [`value_or_prompt`] but an empty answer is accepted
pub(crate) fn optional_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }
    let answer: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(answer)
}
