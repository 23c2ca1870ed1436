use std::path::{Path, PathBuf};

pub const SYSTEM_SUFFIX: &str = "_system.json";
pub const DATA_SUFFIX: &str = "_data.json";

/// 单个数据库在存储根目录下的文件对
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseFiles {
    /// 字段定义：`<name>_system.json`
    pub system: PathBuf,
    /// 记录列表：`<name>_data.json`
    pub data: PathBuf,
}

impl DatabaseFiles {
    pub fn new(root: &Path, name: &str) -> Self {
        Self {
            system: root.join(format!("{}{}", name, SYSTEM_SUFFIX)),
            data: root.join(format!("{}{}", name, DATA_SUFFIX)),
        }
    }
}

/// 从 schema 文件名还原数据库名，临时文件和其他文件返回 None
pub fn name_from_system_file(file_name: &str) -> Option<&str> {
    if file_name.starts_with('.') {
        return None;
    }
    file_name
        .strip_suffix(SYSTEM_SUFFIX)
        .filter(|name| !name.is_empty())
}
