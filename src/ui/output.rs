use console::Style;
use std::io::{self, Write};
use std::path::Path;

use flatdb_types::{FieldSet, Record};

/// 命令行输出格式化工具
/// 提供统一的 Cargo 风格输出
pub struct Output {
    green: Style,
    bold: Style,
    dim: Style,
}

impl Output {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            bold: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    /// 显示状态消息（如 "Creating database" 等）
    /// 格式: "    Creating database"（动词右对齐到 12 字符）
    pub fn status(&self, action: &str, target: &str) {
        eprintln!("{:>12} {}", self.green.apply_to(action), target);
    }

    /// 开始执行操作的状态消息（会在前面自动添加空行）
    /// 用于标记一个新操作的开始，例如用户确认后的实际执行
    pub fn begin_operation(&self, action: &str, target: &str) {
        eprintln!();
        eprintln!("{:>12} {}", self.green.apply_to(action), target);
    }

    /// 显示数据库信息
    /// 格式: "    Database students at /path/to/data (3 records)"
    /// 自动在后面添加空行
    pub fn database_info(&self, name: &str, root: &Path, record_count: usize) {
        eprintln!(
            "{:>12} {} at {} {}",
            self.green.apply_to("Database"),
            self.bold.apply_to(name),
            root.display(),
            self.dim.apply_to(format!("({} records)", record_count))
        );
        eprintln!();
    }

    /// 显示创建/查找资源消息
    /// 格式: "    Creating config at /path/to/config"
    /// 自动在后面添加空行
    pub fn resource_action(&self, action: &str, resource: &str, path: &Path) {
        eprintln!(
            "{:>12} {} at {}",
            self.green.apply_to(action),
            resource,
            path.display()
        );
        eprintln!();
    }

    /// 显示完成消息
    /// 格式: "    Finished action for scope"
    /// 自动在前面添加空行
    pub fn finish(&self, action: &str, scope: &str) {
        eprintln!();
        eprintln!(
            "{:>12} {} for {} scope",
            self.green.apply_to("Finished"),
            action,
            scope
        );
    }

    /// 显示 schema 字段列表
    /// 格式: "       Field name (max 20)"
    pub fn fields(&self, fields: &FieldSet) {
        for def in fields {
            let rules: Vec<String> = std::iter::once(format!("max {}", def.max_len))
                .chain(def.validators.iter().map(|v| v.as_str().to_string()))
                .collect();
            eprintln!(
                "{:>12} {} {}",
                self.dim.apply_to("Field"),
                def.name,
                self.dim.apply_to(format!("({})", rules.join(", ")))
            );
        }
    }

    /// 显示数据库名列表
    /// 格式: "[1/3] students"
    pub fn database_list(&self, names: &[String]) {
        let total = names.len();
        for (i, name) in names.iter().enumerate() {
            println!(
                "[{}] {}",
                self.dim.apply_to(format!("{}/{}", i + 1, total)),
                self.bold.apply_to(name)
            );
        }
    }

    /// 显示单条记录（编号从 1 开始）
    pub fn record(&self, number: usize, record: &Record) {
        println!("{}", self.bold.apply_to(format!("Record {}", number)));
        for (field, value) in record.iter() {
            println!("{:>12} {}", self.dim.apply_to(field), value);
        }
    }

    /// 输出渲染好的表格（标准输出）
    pub fn table(&self, table: &str) {
        print!("{}", table);
    }

    /// 显示注意事项（右对齐）
    pub fn note(&self, message: &str) {
        eprintln!("{:>12} {}", self.dim.apply_to("Note"), message);
    }

    /// 显示警告（黄色，右对齐）
    /// 自动在前面添加空行
    pub fn warning(&self, message: &str) {
        eprintln!();
        eprintln!(
            "{:>12} {}",
            Style::new().yellow().bold().apply_to("Warning"),
            message
        );
        eprintln!();
    }

    /// 显示错误（红色，右对齐）
    pub fn error(&self, message: &str) {
        eprintln!(
            "{:>12} {}",
            Style::new().red().bold().apply_to("Error"),
            message
        );
    }

    /// 显示提示消息（标准输出，右对齐）
    pub fn info(&self, message: &str) {
        println!("{:>12} {}", "", message);
    }

    /// 显示确认提示并读取用户输入
    /// 返回用户是否输入了 "yes"
    pub fn confirm(&self, expected: &str) -> io::Result<bool> {
        println!();
        print!(
            "{:>12} Type {} to confirm: ",
            "",
            Style::new().green().bold().apply_to(expected)
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        Ok(input.trim().eq_ignore_ascii_case(expected))
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
