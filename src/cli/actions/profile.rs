//! Drive a profile session with interactive prompts

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;

use crate::cli::context::Context;
use crate::engine::{ProfileSession, SessionState};
use crate::remote::RemoteDirectory;

/// List remote profiles and keep prompting until one is active
pub fn run_session<R: RemoteDirectory>(ctx: &Context, remote: R, init_mode: bool) -> Result<()> {
    println!("Reading GitHub stored profiles...");
    let mut session = ProfileSession::new(
        &ctx.store,
        remote,
        ctx.config.profile.default_name.clone(),
    );

    match session.read_profiles(init_mode)? {
        SessionState::Selecting(refs) => {
            println!("Found {} profile(s).", refs.len());
        }
        SessionState::Creating => println!("No profiles found. Creating a new one..."),
        _ => {}
    }

    loop {
        let answer: String = match session.state() {
            SessionState::NoProfile | SessionState::Listing => {
                ctx.print_warning("No profiles found.");
                return Ok(());
            }
            SessionState::Selecting(refs) => {
                println!();
                for (i, profile) in refs.iter().enumerate() {
                    println!("{}) {}", i, profile.name.yellow());
                }
                println!();
                Input::new()
                    .with_prompt("Type the number of the profile you want to use or N for a new one")
                    .interact_text()?
            }
            SessionState::Creating => Input::new()
                .with_prompt(format!(
                    "New profile name [{}]",
                    ctx.config.profile.default_name
                ))
                .allow_empty(true)
                .interact_text()?,
            SessionState::Active(active) => {
                ctx.print_success(&format!(
                    "Profile in use has been updated to: {}",
                    active.name.yellow()
                ));
                if session.is_init_mode() {
                    ctx.print_success("ShellProfiler initialization completed!");
                }
                return Ok(());
            }
        };

        if let Err(err) = session.next_input(&answer) {
            if !err.is_validation() {
                return Err(err.into());
            }
            ctx.print_error(&err.to_string());
        }
    }
}
