//! Export command implementation

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::cli::context::Context;
use crate::utils::path::write_file;

/// Execute the export action
pub fn execute(ctx: &Context, output: &Path) -> Result<()> {
    ctx.store.require_integrity()?;
    let profile = ctx.store.profile()?;

    let count = profile.aliases.len() + profile.functions.len();
    if count == 0 {
        ctx.print_warning("Profile has no aliases or functions; writing an empty script.");
    }

    write_file(output, &profile.render_script())?;

    ctx.print_success(&format!(
        "Exported {} entries to {}",
        count,
        output.display().to_string().cyan()
    ));
    Ok(())
}
