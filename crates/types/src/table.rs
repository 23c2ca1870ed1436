use crate::models::{FieldSet, Record};

/// 将记录渲染为定宽表格
///
/// 列来自 schema（按字段顺序），空数据库也会输出表头。
/// 列宽取表头与该列最长值的较大者，按字符计数。
pub fn render_table(fields: &FieldSet, records: &[Record]) -> String {
    let headers: Vec<&str> = fields.names().collect();
    let widths: Vec<usize> = headers
        .iter()
        .map(|header| {
            records
                .iter()
                .map(|record| record.get(header).unwrap_or("").chars().count())
                .fold(header.chars().count(), usize::max)
        })
        .collect();

    let rule = format!(
        "+-{}-+",
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-")
    );

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    push_row(&mut out, headers.iter().copied(), &widths);
    out.push_str(&rule);
    out.push('\n');
    for record in records {
        let cells = headers.iter().map(|header| record.get(header).unwrap_or(""));
        push_row(&mut out, cells, &widths);
    }
    out.push_str(&rule);
    out.push('\n');
    out
}

fn push_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();

    out.push_str("| ");
    out.push_str(&padded.join(" | "));
    out.push_str(" |\n");
}
