use anyhow::{Context as _, Result};
use std::path::Path;

use crate::cli::ScopeArgs;
use crate::config::AppConfig;
use crate::ui::Output;

/// 显式初始化（带用户反馈）
/// --local 在本地目录初始化，否则在全局目录初始化；--data-dir 覆盖存储根目录
pub fn initialize(args: &ScopeArgs) -> Result<()> {
    let config_dir = AppConfig::get_dir(args.local);
    let location = AppConfig::get_scope_name(args.local, !args.local);
    initialize_in(&config_dir, location, args.data_dir.as_deref())
}

/// 在指定配置目录初始化
fn initialize_in(config_dir: &Path, location: &str, override_dir: Option<&Path>) -> Result<()> {
    let output = Output::new();
    let config_path = config_dir.join("config.toml");

    let config = AppConfig::load_from_dir(config_dir)?;

    if config_path.exists() {
        output.resource_action("Found", "config", &config_path);
    } else {
        let path = config.save()?;
        output.resource_action("Creating", "config", &path);
        output.note("Edit the config file to change data_dir or log_level");
    }

    let data_dir = override_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.get_data_dir());
    if data_dir.exists() {
        output.resource_action("Found", "data directory", &data_dir);
    } else {
        match override_dir {
            Some(_) => std::fs::create_dir_all(&data_dir).with_context(|| {
                format!("Failed to create data directory: {}", data_dir.display())
            })?,
            None => config.ensure_dirs()?,
        }
        output.resource_action("Creating", "data directory", &data_dir);
    }

    output.finish("initialization", location);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_default_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(".flatdb");

        initialize_in(&config_dir, "local", None).unwrap();

        assert!(config_dir.join("config.toml").is_file());
        assert!(config_dir.join("data").is_dir());
    }

    #[test]
    fn test_initialize_with_data_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(".flatdb");
        let data_dir = dir.path().join("tables");

        initialize_in(&config_dir, "local", Some(&data_dir)).unwrap();

        assert!(config_dir.join("config.toml").is_file());
        assert!(data_dir.is_dir());
        assert!(!config_dir.join("data").exists());

        // 再次初始化只报告已存在的目录
        initialize_in(&config_dir, "local", Some(&data_dir)).unwrap();
        assert!(data_dir.is_dir());
    }
}
