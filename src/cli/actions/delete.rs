//! Delete items by index

use anyhow::Result;
use colored::Colorize;

use super::value_or_prompt;
use crate::cli::args::DeleteArgs;
use crate::cli::context::Context;

/// Execute the delete action
///
/// Each requested kind is listed and handled on its own.
pub fn execute(ctx: &Context, args: DeleteArgs) -> Result<()> {
    let kinds = args.kinds();
    if kinds.is_empty() {
        anyhow::bail!("Command is missing an option: use --alias and/or --func");
    }

    let registry = ctx.registry();
    for kind in kinds {
        let items = registry.list(kind)?;
        if items.is_empty() {
            ctx.print_warning(&format!("No {} available.", kind.plural()));
            continue;
        }

        let rows: Vec<(String, String)> = items
            .iter()
            .enumerate()
            .map(|(i, item)| (format!("{}) {}", i, item.name), item.desc.clone()))
            .collect();
        ctx.print_key_values(&rows);

        let selector = value_or_prompt(
            args.select.clone(),
            &format!("Type the number of the {} to delete", kind.singular()),
        )?;

        let report = registry.delete(kind, &selector)?;
        if report.skipped > 0 {
            ctx.print_warning(&format!(
                "{} elements were skipped from delete. [INVALID INDEX]",
                report.skipped
            ));
        }
        if !report.removed.is_empty() {
            let names: Vec<String> = report
                .removed
                .iter()
                .map(|item| item.name.cyan().to_string())
                .collect();
            ctx.print_success(&format!("Deleted {}: {}", kind.plural(), names.join(", ")));
        }
    }
    Ok(())
}
