//! List the menu.

use anyhow::Result;

use super::MenuArgs;
use crate::context::Context;

/// Run the menu command.
pub async fn run(_args: MenuArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.config.build_catalog()?;

    if ctx.output.is_json() {
        ctx.output.json(&catalog.items());
        return Ok(());
    }

    ctx.output.header("Menu");
    ctx.output.catalog(&catalog);

    Ok(())
}
