use anyhow::{Context as _, Result};

use super::Context;
use crate::ui::Output;

pub fn show(ctx: &Context, name: &str, json: bool) -> Result<()> {
    let output = Output::new();

    if json {
        let records = ctx.store.load_all(name)?;
        let content =
            serde_json::to_string_pretty(&records).context("Failed to serialize records")?;
        println!("{}", content);
        return Ok(());
    }

    let record_count = ctx.store.count(name)?;
    output.database_info(name, &ctx.root, record_count);

    let table = ctx.store.render(name)?;
    output.table(&table);

    if record_count == 0 {
        output.info("No records found. Use 'flatdb add' to add some!");
    }

    Ok(())
}
