use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// 单个字段校验失败的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    /// schema 中的字段在记录里缺失
    MissingField,
    /// 值长度超过字段上限
    TooLong { max: usize },
    /// 值不是纯数字
    NotNumeric,
    /// 记录中出现了 schema 未定义的字段
    UnknownField,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField => write!(f, "value is missing"),
            Self::TooLong { max } => write!(f, "value exceeds maximum length of {}", max),
            Self::NotNumeric => write!(f, "value must be numeric"),
            Self::UnknownField => write!(f, "field is not defined in the schema"),
        }
    }
}

/// 存储层错误
///
/// 所有错误都原样返回给调用方（前端），核心层不打印任何内容。
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database '{name}' not found")]
    NotFound { name: String },

    #[error("Database '{name}' already exists")]
    AlreadyExists { name: String },

    #[error("Cannot create a database without fields")]
    EmptySchema,

    #[error("Invalid database name: '{name}'")]
    InvalidName { name: String },

    #[error("Field name cannot be empty")]
    EmptyFieldName,

    #[error("Field '{field}' is defined more than once")]
    DuplicateField { field: String },

    #[error("Field '{field}' must have a maximum length greater than zero")]
    InvalidLength { field: String },

    #[error("Unknown validator: '{name}'")]
    UnknownValidator { name: String },

    #[error("Invalid value for '{field}': {reason}")]
    Validation {
        field: String,
        reason: ValidationReason,
    },

    #[error("Record index {index} out of range (database has {len} records)")]
    Index { index: usize, len: usize },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Error {
    pub fn validation(field: impl Into<String>, reason: ValidationReason) -> Self {
        Self::Validation {
            field: field.into(),
            reason,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }

    pub fn not_found(name: &str) -> Self {
        Self::NotFound {
            name: name.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message() {
        let err = Error::validation("name", ValidationReason::TooLong { max: 20 });
        assert_eq!(
            err.to_string(),
            "Invalid value for 'name': value exceeds maximum length of 20"
        );
    }

    #[test]
    fn test_index_message() {
        let err = Error::Index { index: 3, len: 1 };
        assert!(err.to_string().contains("index 3"));
    }
}
