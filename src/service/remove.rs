use anyhow::Result;

use super::{to_index, Context};
use crate::ui::Output;

/// 删除单条记录（确认后执行）
pub fn remove(ctx: &Context, name: &str, number: usize, skip_confirm: bool) -> Result<()> {
    let output = Output::new();
    let index = to_index(number)?;

    let record = ctx.store.get(name, index)?;
    let record_count = ctx.store.count(name)?;
    output.database_info(name, &ctx.root, record_count);
    output.record(number, &record);

    output.warning(&format!("this will permanently delete record {}", number));

    if !skip_confirm && !output.confirm("yes")? {
        output.info("Operation cancelled");
        return Ok(());
    }

    output.begin_operation("Deleting", &format!("record {}", number));
    ctx.store.remove(name, index)?;

    output.finish("delete", ctx.scope);

    Ok(())
}
