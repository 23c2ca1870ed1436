use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 配置作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    Auto,
    Local,
    Global,
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// 存储根目录（可选，默认: ~/.flatdb/data 或 ./.flatdb/data）
    /// 相对路径以配置文件所在目录为基准，支持 `~`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// 默认日志级别（默认: warn，RUST_LOG 优先）
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// 配置文件所在目录
    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_level: default_log_level(),
            base_dir: Self::global_dir(),
        }
    }
}

impl AppConfig {
    /// 全局 .flatdb 目录：~/.flatdb/
    pub fn global_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".flatdb")
    }

    /// 本地 .flatdb 目录：./.flatdb/
    pub fn local_dir() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".flatdb")
    }

    /// 检查本地配置是否存在
    /// 注意：如果当前目录是用户主目录，则不认为是本地配置
    pub fn has_local_config() -> bool {
        let current_dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(_) => return false,
        };

        let global_parent = Self::global_dir().parent().map(|p| p.to_path_buf());

        if let Some(home) = global_parent {
            let current_canonical = current_dir.canonicalize().unwrap_or(current_dir.clone());
            let home_canonical = home.canonicalize().unwrap_or(home);

            if current_canonical == home_canonical {
                return false;
            }
        }

        Self::local_dir().join("config.toml").exists()
    }

    /// 验证作用域标志（不能同时指定 local 和 global）
    pub fn validate_scope_flags(local: bool, global: bool) -> Result<()> {
        if local && global {
            anyhow::bail!("Cannot specify both --local and --global, please choose one");
        }
        Ok(())
    }

    /// 获取当前作用域名称
    /// 返回 "local" 或 "global"
    pub fn get_scope_name(force_local: bool, force_global: bool) -> &'static str {
        if force_local {
            "local"
        } else if force_global {
            "global"
        } else if Self::has_local_config() {
            "local"
        } else {
            "global"
        }
    }

    /// 根据 local 标志获取配置目录
    pub fn get_dir(local: bool) -> PathBuf {
        if local {
            Self::local_dir()
        } else {
            Self::global_dir()
        }
    }

    /// 加载配置：根据 local/global 标志或优先级加载
    /// - local = true: 强制使用本地配置
    /// - global = true: 强制使用全局配置
    /// - 两者都为 false: 优先本地配置，其次全局配置
    pub fn load_with_scope(force_local: bool, force_global: bool) -> Result<Self> {
        Self::validate_scope_flags(force_local, force_global)?;

        let scope = if force_local {
            ConfigScope::Local
        } else if force_global {
            ConfigScope::Global
        } else {
            ConfigScope::Auto
        };

        Self::load_with_scope_internal(scope)
    }

    fn load_with_scope_internal(scope: ConfigScope) -> Result<Self> {
        let dir = match scope {
            ConfigScope::Auto if Self::has_local_config() => Self::local_dir(),
            ConfigScope::Auto => Self::global_dir(),
            ConfigScope::Local => Self::local_dir(),
            ConfigScope::Global => Self::global_dir(),
        };

        Self::load_from_dir(&dir)
    }

    /// 从配置目录加载 config.toml；文件不存在时使用默认配置
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let path = dir.join("config.toml");

        let mut config = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            Self::parse(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        } else {
            Self::default()
        };
        config.base_dir = dir.to_path_buf();

        tracing::debug!("Loaded app config from: {}", path.display());
        Ok(config)
    }

    fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// 获取存储根目录
    pub fn get_data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(path) => {
                let expanded =
                    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
                if expanded.is_absolute() {
                    expanded
                } else {
                    self.base_dir.join(expanded)
                }
            }
            None => self.base_dir.join("data"),
        }
    }

    /// 配置文件所在目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 确保必要的目录存在
    pub fn ensure_dirs(&self) -> Result<()> {
        let data_dir = self.get_data_dir();
        std::fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;
        Ok(())
    }

    /// 保存配置到所在目录
    pub fn save(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.base_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                self.base_dir.display()
            )
        })?;

        let config_path = self.base_dir.join("config.toml");
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_app_config() {
        let toml_str = r#"
data_dir = "/srv/flatdb"
log_level = "debug"
        "#;

        let config = AppConfig::parse(toml_str).unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/flatdb")));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.get_data_dir(), PathBuf::from("/srv/flatdb"));
    }

    #[test]
    fn test_default_values() {
        let config = AppConfig::parse("").unwrap();

        assert!(config.data_dir.is_none());
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from_dir(dir.path()).unwrap();

        assert_eq!(config.base_dir(), dir.path());
        assert_eq!(config.get_data_dir(), dir.path().join("data"));
    }

    #[test]
    fn test_relative_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "data_dir = \"tables\"\n").unwrap();

        let config = AppConfig::load_from_dir(dir.path()).unwrap();

        assert_eq!(config.get_data_dir(), dir.path().join("tables"));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::load_from_dir(dir.path()).unwrap();
        config.log_level = "info".to_string();

        let path = config.save().unwrap();
        assert_eq!(path, dir.path().join("config.toml"));

        let loaded = AppConfig::load_from_dir(dir.path()).unwrap();
        assert_eq!(loaded.log_level, "info");
        assert!(loaded.data_dir.is_none());
    }

    #[test]
    fn test_scope_flags() {
        assert!(AppConfig::validate_scope_flags(true, true).is_err());
        assert!(AppConfig::validate_scope_flags(true, false).is_ok());
        assert_eq!(AppConfig::get_scope_name(true, false), "local");
        assert_eq!(AppConfig::get_scope_name(false, true), "global");
    }
}
