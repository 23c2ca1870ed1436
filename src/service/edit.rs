use anyhow::Result;

use super::{parse_assignments, to_index, Context};
use crate::ui::{Output, Prompt};

pub fn edit(ctx: &Context, name: &str, number: usize, values: &[String]) -> Result<()> {
    let output = Output::new();
    let index = to_index(number)?;

    let fields = ctx.store.load(name)?;
    let current = ctx.store.get(name, index)?;

    let replacements = if values.is_empty() {
        output.status("Editing", &format!("record {} (press Enter to keep a value)", number));
        Prompt::new().replacements(&fields, &current)?
    } else {
        parse_assignments(values)?
    };

    output.status("Updating", &format!("record {}", number));
    ctx.store.update(name, index, &replacements)?;

    output.finish("update", ctx.scope);

    Ok(())
}
