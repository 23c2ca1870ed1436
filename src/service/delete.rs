use anyhow::{Context as _, Result};

use super::Context;
use crate::ui::Output;

/// 删除整个数据库（高危操作）
pub fn delete(ctx: &Context, name: &str, skip_confirm: bool) -> Result<()> {
    let output = Output::new();

    // 只要求 schema 可读：缺少数据文件的残留数据库也能删除
    ctx.store
        .load(name)
        .with_context(|| format!("Database '{}' does not exist", name))?;

    let record_count = ctx.store.count(name).unwrap_or(0);
    output.database_info(name, &ctx.root, record_count);

    output.warning(&format!("this will delete database '{}' and all its records", name));
    output.info(&format!("{} records will be deleted", record_count));

    if !skip_confirm && !output.confirm("yes")? {
        output.info("Operation cancelled");
        return Ok(());
    }

    output.begin_operation("Deleting", &format!("database {}", name));
    ctx.store.delete(name)?;

    output.finish("deleting", ctx.scope);

    Ok(())
}
