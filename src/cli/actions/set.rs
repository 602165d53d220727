//! Set items, profile and credentials

use anyhow::Result;

use super::{optional_or_prompt, profile, value_or_prompt};
use crate::cli::args::{ItemArgs, SetCommands};
use crate::cli::context::Context;
use crate::model::ItemKind;
use crate::registry::{ItemDraft, UpsertOutcome};

/// Execute the set action
pub fn execute(ctx: &Context, command: SetCommands) -> Result<()> {
    match command {
        SetCommands::Alias(args) => set_item(ctx, ItemKind::Alias, args),
        SetCommands::Func(args) => set_item(ctx, ItemKind::Function, args),
        SetCommands::Profile => {
            ctx.store.require_integrity()?;
            profile::run_session(ctx, ctx.gist_client()?, false)
        }
        SetCommands::Token { value } => {
            ctx.store.set_github_token(&value)?;
            ctx.print_success("GitHub access token successfully set");
            Ok(())
        }
        SetCommands::Username { value } => {
            ctx.store.set_github_username(&value)?;
            ctx.print_success(&format!("Username successfully set to \"{}\"", value.trim()));
            Ok(())
        }
    }
}

fn set_item(ctx: &Context, kind: ItemKind, args: ItemArgs) -> Result<()> {
    // Fail before prompting when there is nowhere to save
    ctx.store.require_integrity()?;

    let label = capitalize(kind.singular());
    let name = value_or_prompt(args.name, &format!("{} name", label))?;
    let desc = optional_or_prompt(args.desc, &format!("{} description", label))?;
    let body = value_or_prompt(args.body, &format!("{} body", label))?;

    let outcome = ctx
        .registry()
        .upsert(kind, ItemDraft::new(name, desc, body))?;

    println!();
    match outcome {
        UpsertOutcome::Inserted => ctx.print_success(&format!("{} added successfully!", label)),
        UpsertOutcome::Updated => ctx.print_success(&format!("{} updated successfully!", label)),
    }
    ctx.print_restart_hint(kind.singular());
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
