//! Integrity report

use anyhow::Result;

use crate::cli::context::Context;

/// Execute the stat action
pub fn execute(ctx: &Context) -> Result<()> {
    ctx.store.require_integrity()?;
    ctx.print_success("ShellProfiler is happy! :)");
    Ok(())
}
