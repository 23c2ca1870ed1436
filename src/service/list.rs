use anyhow::Result;

use super::Context;
use crate::ui::Output;

pub fn list(ctx: &Context) -> Result<()> {
    let output = Output::new();

    let mut names = ctx.store.list()?;
    if names.is_empty() {
        output.info("No databases found. Use 'flatdb create' to add one!");
        return Ok(());
    }

    names.sort();
    output.status("Listing", &format!("{} databases in {}", names.len(), ctx.root.display()));
    eprintln!();
    output.database_list(&names);

    Ok(())
}
