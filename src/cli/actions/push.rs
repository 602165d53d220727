//! Upload the local profile

use anyhow::Result;
use colored::Colorize;

use crate::cli::context::Context;
use crate::engine::push_profile;

/// Execute the push action
pub fn execute(ctx: &Context) -> Result<()> {
    ctx.store.require_integrity()?;
    let active = push_profile(&ctx.store, ctx.gist_client()?)?;
    ctx.print_success(&format!(
        "Profile {} pushed to gist {}",
        active.name.yellow(),
        active.gist_id.dimmed()
    ));
    Ok(())
}
