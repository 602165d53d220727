//! List aliases, functions or the active profile

use anyhow::Result;
use colored::Colorize;

use crate::cli::args::ListTarget;
use crate::cli::context::Context;
use crate::model::ItemKind;

/// Execute the list action
pub fn execute(ctx: &Context, target: ListTarget) -> Result<()> {
    let kind = match target {
        ListTarget::Alias => ItemKind::Alias,
        ListTarget::Func => ItemKind::Function,
        ListTarget::Profile => return show_profile(ctx),
    };

    let items = ctx.registry().list(kind)?;
    if items.is_empty() {
        ctx.print_warning(&format!("No {} available.", kind.plural()));
        return Ok(());
    }

    let rows: Vec<(String, String)> = items
        .into_iter()
        .map(|item| (item.name, item.desc))
        .collect();
    ctx.print_key_values(&rows);
    Ok(())
}

fn show_profile(ctx: &Context) -> Result<()> {
    ctx.store.require_integrity()?;
    let profile = ctx.store.profile()?;
    if profile.name.is_empty() {
        anyhow::bail!("No profile name set. Choose one with `shprof set profile`");
    }
    println!("Profile in use: {}", profile.name.yellow());
    if let Some(gist_id) = ctx.store.auth()?.gist_id {
        println!("Gist: {}", gist_id.dimmed());
    }
    Ok(())
}
