pub mod add;
pub mod create;
pub mod delete;
pub mod edit;
pub mod init;
pub mod list;
pub mod remove;
pub mod shell;
pub mod show;

use anyhow::{Context as _, Result};
use std::path::PathBuf;

use crate::cli::ScopeArgs;
use crate::config::AppConfig;
use flatdb_local::LocalStore;
use flatdb_types::{Record, RecordStore};

/// 命令执行上下文：存储接口、存储根目录和作用域名称
pub struct Context {
    pub store: Box<dyn RecordStore>,
    pub root: PathBuf,
    pub scope: &'static str,
}

impl Context {
    /// 命令行 --data-dir 优先，其次配置文件
    pub fn new(args: &ScopeArgs, config: &AppConfig) -> Self {
        let root = args
            .data_dir
            .clone()
            .unwrap_or_else(|| config.get_data_dir());
        tracing::debug!(
            "Config dir: {}, storage root: {}",
            config.base_dir().display(),
            root.display()
        );

        Self {
            store: Box::new(LocalStore::new(root.clone())),
            root,
            scope: AppConfig::get_scope_name(args.local, args.global),
        }
    }
}

/// 解析 FIELD=VALUE 形式的参数
pub fn parse_assignments(values: &[String]) -> Result<Record> {
    let mut record = Record::new();
    for item in values {
        let (field, value) = item
            .split_once('=')
            .with_context(|| format!("Expected FIELD=VALUE, got '{}'", item))?;
        let field = field.trim();
        if field.is_empty() {
            anyhow::bail!("Missing field name in '{}'", item);
        }
        record.set(field, value);
    }
    Ok(record)
}

/// 用户看到的编号从 1 开始，存储层下标从 0 开始
pub fn to_index(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .context("Record numbers start at 1")
}
