//! Initialize local profile data and bind it to a remote profile

use anyhow::{Context as _, Result};
use colored::Colorize;
use dialoguer::{Confirm, Password};

use super::{profile, value_or_prompt};
use crate::cli::args::InitArgs;
use crate::cli::context::Context;
use crate::utils::path::{check_file_readable, normalize_path};

/// Execute the init action
pub fn execute(ctx: &Context, args: InitArgs) -> Result<()> {
    let token = match args.token {
        Some(token) => token,
        None => Password::new()
            .with_prompt("GitHub authorization token")
            .interact()?,
    };
    let username = value_or_prompt(args.username, "GitHub username")?;
    let bashrc = value_or_prompt(args.bashrc, "Your bashrc file absolute path")?;

    let bashrc_path = normalize_path(&bashrc);
    check_file_readable(&bashrc_path)
        .context("The path provided for the bashrc file is not valid")?;

    ctx.print_key_values(&[
        ("Token".to_string(), mask(&token)),
        ("Username".to_string(), username.clone()),
        ("Bashrc path".to_string(), bashrc_path.display().to_string()),
    ]);
    ctx.print_warning(&format!(
        "Everything under {} will be erased.",
        ctx.store.dir().display().to_string().cyan()
    ));

    if !args.yes
        && !Confirm::new()
            .with_prompt("Do you confirm?")
            .default(true)
            .interact()?
    {
        println!("Cancelled.");
        return Ok(());
    }

    ctx.store.initialize()?;
    ctx.store.set_github_token(&token)?;
    ctx.store.set_github_username(&username)?;
    ctx.store.set_bashrc_path(&bashrc_path.to_string_lossy())?;
    ctx.print_success("ShellProfiler has been successfully initialized!");

    profile::run_session(ctx, ctx.gist_client()?, true)
}

/// Keep the last four characters of a secret
fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.trim().chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
