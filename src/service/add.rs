use anyhow::Result;

use super::{parse_assignments, Context};
use crate::ui::{Output, Prompt};

pub fn add(ctx: &Context, name: &str, values: &[String]) -> Result<()> {
    let output = Output::new();

    let fields = ctx.store.load(name)?;
    let preset = parse_assignments(values)?;

    // 命令行没给全的字段交互式补全
    let record = Prompt::new().record(&fields, &preset)?;

    output.status("Adding", &format!("record to {}", name));
    ctx.store.append(name, record)?;

    let record_count = ctx.store.count(name)?;
    output.finish(&format!("record {}", record_count), ctx.scope);

    Ok(())
}
