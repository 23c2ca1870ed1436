use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result, ValidationReason};

/// 旧版 schema 文件中约定为纯数字的字段名
pub const LEGACY_NUMERIC_FIELD: &str = "rollNo";

/// 检查数据库名是否可以用作文件名前缀
pub fn validate_db_name(name: &str) -> Result<()> {
    let invalid = name.trim().is_empty()
        || name.starts_with('.')
        || name.contains(|c: char| matches!(c, '/' | '\\' | '\0'));

    if invalid {
        return Err(Error::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// 字段取值约束，定义 schema 时按字段指定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// 非空且只包含 ASCII 数字
    Numeric,
}

impl Validator {
    pub fn check(&self, value: &str) -> std::result::Result<(), ValidationReason> {
        match self {
            Self::Numeric => {
                if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
                    Ok(())
                } else {
                    Err(ValidationReason::NotNumeric)
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
        }
    }
}

impl FromStr for Validator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(Self::Numeric),
            other => Err(Error::UnknownValidator {
                name: other.to_string(),
            }),
        }
    }
}

/// 单个字段定义：名称、最大长度（字符数）和校验器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: String,
    pub max_len: usize,
    pub validators: Vec<Validator>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, max_len: usize) -> Self {
        Self {
            name: name.into(),
            max_len,
            validators: Vec::new(),
        }
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        if !self.validators.contains(&validator) {
            self.validators.push(validator);
        }
        self
    }

    /// 校验单个值：先检查长度，再依次执行校验器
    pub fn check(&self, value: &str) -> Result<()> {
        if value.chars().count() > self.max_len {
            return Err(Error::validation(
                &self.name,
                ValidationReason::TooLong { max: self.max_len },
            ));
        }

        for validator in &self.validators {
            validator
                .check(value)
                .map_err(|reason| Error::validation(&self.name, reason))?;
        }

        Ok(())
    }
}

/// 数据库 schema：有序的字段定义集合
///
/// 字段顺序即插入顺序，用于表格列顺序和编辑提示顺序。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    fields: Vec<FieldDef>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从字段定义列表构建，遇到第一个非法定义即返回错误
    pub fn from_defs(defs: impl IntoIterator<Item = FieldDef>) -> Result<Self> {
        let mut fields = Self::new();
        for def in defs {
            fields.push(def)?;
        }
        Ok(fields)
    }

    /// 追加字段定义（拒绝空名、重名和零长度）
    pub fn push(&mut self, def: FieldDef) -> Result<()> {
        if def.name.trim().is_empty() {
            return Err(Error::EmptyFieldName);
        }
        if self.get(&def.name).is_some() {
            return Err(Error::DuplicateField { field: def.name });
        }
        if def.max_len == 0 {
            return Err(Error::InvalidLength { field: def.name });
        }

        self.fields.push(def);
        Ok(())
    }

    pub fn add(&mut self, name: impl Into<String>, max_len: usize) -> Result<()> {
        self.push(FieldDef::new(name, max_len))
    }

    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|def| def.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDef> {
        self.fields.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|def| def.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn reject_unknown(&self, record: &Record) -> Result<()> {
        match record.keys().find(|key| self.get(key).is_none()) {
            Some(key) => Err(Error::validation(key, ValidationReason::UnknownField)),
            None => Ok(()),
        }
    }

    /// 校验一条新记录
    ///
    /// 每个字段都必须存在且满足长度和校验器约束；返回按 schema 顺序整理后的记录。
    pub fn check_record(&self, record: &Record) -> Result<Record> {
        self.reject_unknown(record)?;

        let mut checked = Record::new();
        for def in &self.fields {
            let value = record
                .get(&def.name)
                .ok_or_else(|| Error::validation(&def.name, ValidationReason::MissingField))?;
            def.check(value)?;
            checked.set(def.name.clone(), value);
        }
        Ok(checked)
    }

    /// 以 current 为默认值合并 replacements 并校验
    ///
    /// 缺失或为空的替换值沿用原值；任一字段失败则整体失败，current 不受影响。
    pub fn merge_record(&self, current: &Record, replacements: &Record) -> Result<Record> {
        self.reject_unknown(replacements)?;

        let mut merged = current.clone();
        for def in &self.fields {
            let value = match replacements.get(&def.name) {
                Some(value) if !value.is_empty() => value,
                _ => current.get(&def.name).unwrap_or(""),
            };
            def.check(value)?;
            merged.set(def.name.clone(), value);
        }
        Ok(merged)
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a FieldDef;
    type IntoIter = std::slice::Iter<'a, FieldDef>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// schema 文件中单个字段的两种写法：`"age": 3` 或带校验器的对象
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FieldSpec {
    Bare(usize),
    Full {
        max_len: usize,
        #[serde(default)]
        validators: Vec<Validator>,
    },
}

impl Serialize for FieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for def in &self.fields {
            if def.validators.is_empty() {
                map.serialize_entry(&def.name, &def.max_len)?;
            } else {
                let spec = FieldSpec::Full {
                    max_len: def.max_len,
                    validators: def.validators.clone(),
                };
                map.serialize_entry(&def.name, &spec)?;
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FieldSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct FieldSetVisitor;

        impl<'de> Visitor<'de> for FieldSetVisitor {
            type Value = FieldSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to maximum lengths")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<FieldSet, A::Error> {
                let mut fields = FieldSet::new();
                while let Some((name, spec)) = access.next_entry::<String, FieldSpec>()? {
                    let def = match spec {
                        FieldSpec::Bare(max_len) if name == LEGACY_NUMERIC_FIELD => {
                            FieldDef::new(name, max_len).with_validator(Validator::Numeric)
                        }
                        FieldSpec::Bare(max_len) => FieldDef::new(name, max_len),
                        FieldSpec::Full {
                            max_len,
                            validators,
                        } => validators
                            .into_iter()
                            .fold(FieldDef::new(name, max_len), FieldDef::with_validator),
                    };
                    fields.push(def).map_err(de::Error::custom)?;
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldSetVisitor)
    }
}

/// 一条记录：字段名到字符串值的有序映射
///
/// 相等性不考虑键的顺序。
#[derive(Debug, Clone, Default)]
pub struct Record {
    entries: Vec<(String, String)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, value)| value.as_str())
    }

    /// 设置字段值；已存在的字段原位替换，保持顺序
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl Eq for Record {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (key, value) in iter {
            record.set(key, value);
        }
        record
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Record {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = Record;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to string values")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Record, A::Error> {
                let mut record = Record::new();
                // 旧文件中的 null 按空值读取
                while let Some((key, value)) = access.next_entry::<String, Option<String>>()? {
                    if record.get(&key).is_some() {
                        return Err(de::Error::custom(format!("duplicate field `{}`", key)));
                    }
                    record.set(key, value.unwrap_or_default());
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_fields() -> FieldSet {
        FieldSet::from_defs([
            FieldDef::new("name", 20),
            FieldDef::new("rollNo", 5).with_validator(Validator::Numeric),
        ])
        .unwrap()
    }

    #[test]
    fn test_field_set_rejects_bad_definitions() {
        let mut fields = FieldSet::new();
        fields.add("name", 10).unwrap();

        assert!(matches!(
            fields.add("name", 5),
            Err(Error::DuplicateField { field }) if field == "name"
        ));
        assert!(matches!(
            fields.add("age", 0),
            Err(Error::InvalidLength { field }) if field == "age"
        ));
        assert!(matches!(fields.add("  ", 3), Err(Error::EmptyFieldName)));
        assert_eq!(fields.len(), 1);
    }

    #[test]
    fn test_db_name_rules() {
        assert!(validate_db_name("students").is_ok());
        assert!(validate_db_name("").is_err());
        assert!(validate_db_name("../etc").is_err());
        assert!(validate_db_name(".hidden").is_err());
        assert!(validate_db_name("a\\b").is_err());
    }

    #[test]
    fn test_check_record_reports_first_violation() {
        let fields = student_fields();

        let missing = Record::from([("name", "Ann")]);
        assert!(matches!(
            fields.check_record(&missing),
            Err(Error::Validation { field, reason: ValidationReason::MissingField }) if field == "rollNo"
        ));

        let too_long = Record::from([("name", "X".repeat(21)), ("rollNo", "1".to_string())]);
        assert!(matches!(
            fields.check_record(&too_long),
            Err(Error::Validation { field, reason: ValidationReason::TooLong { max: 20 } }) if field == "name"
        ));

        let not_numeric = Record::from([("name", "Ann"), ("rollNo", "12a")]);
        assert!(matches!(
            fields.check_record(&not_numeric),
            Err(Error::Validation { field, reason: ValidationReason::NotNumeric }) if field == "rollNo"
        ));

        let extra = Record::from([("name", "Ann"), ("rollNo", "1"), ("age", "3")]);
        assert!(matches!(
            fields.check_record(&extra),
            Err(Error::Validation { field, reason: ValidationReason::UnknownField }) if field == "age"
        ));
    }

    #[test]
    fn test_check_record_orders_by_schema() {
        let fields = student_fields();
        let record = Record::from([("rollNo", "7"), ("name", "Bo")]);

        let checked = fields.check_record(&record).unwrap();
        assert_eq!(checked.keys().collect::<Vec<_>>(), vec!["name", "rollNo"]);
        assert_eq!(checked, record);
    }

    #[test]
    fn test_length_counts_characters() {
        let def = FieldDef::new("city", 5);
        assert!(def.check("Zürich").is_err());
        assert!(def.check("Genève").is_err());
        assert!(def.check("Köln").is_ok());
    }

    #[test]
    fn test_merge_keeps_defaults() {
        let fields = student_fields();
        let current = Record::from([("name", "Ann"), ("rollNo", "12")]);

        let unchanged = fields.merge_record(&current, &Record::new()).unwrap();
        assert_eq!(unchanged, current);

        let blank = Record::from([("name", "")]);
        assert_eq!(fields.merge_record(&current, &blank).unwrap(), current);

        let renamed = fields
            .merge_record(&current, &Record::from([("name", "Bea")]))
            .unwrap();
        assert_eq!(renamed.get("name"), Some("Bea"));
        assert_eq!(renamed.get("rollNo"), Some("12"));
    }

    #[test]
    fn test_merge_rejects_whole_update() {
        let fields = student_fields();
        let current = Record::from([("name", "Ann"), ("rollNo", "12")]);
        let replacements = Record::from([("name", "Bea"), ("rollNo", "x")]);

        assert!(matches!(
            fields.merge_record(&current, &replacements),
            Err(Error::Validation { reason: ValidationReason::NotNumeric, .. })
        ));
    }

    #[test]
    fn test_field_set_json_keeps_order() {
        let fields = FieldSet::from_defs([
            FieldDef::new("zeta", 4),
            FieldDef::new("alpha", 2),
            FieldDef::new("code", 6).with_validator(Validator::Numeric),
        ])
        .unwrap();

        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(
            json,
            r#"{"zeta":4,"alpha":2,"code":{"max_len":6,"validators":["numeric"]}}"#
        );

        let parsed: FieldSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, fields);
    }

    #[test]
    fn test_legacy_roll_no_is_numeric() {
        let parsed: FieldSet = serde_json::from_str(r#"{"name": 20, "rollNo": 5}"#).unwrap();

        assert!(parsed.get("name").unwrap().validators.is_empty());
        assert_eq!(
            parsed.get("rollNo").unwrap().validators,
            vec![Validator::Numeric]
        );
    }

    #[test]
    fn test_schema_file_rejects_invalid_lengths() {
        assert!(serde_json::from_str::<FieldSet>(r#"{"name": 0}"#).is_err());
        assert!(serde_json::from_str::<FieldSet>(r#"{"name": -3}"#).is_err());
    }

    #[test]
    fn test_record_equality_ignores_order() {
        let a = Record::from([("x", "1"), ("y", "2")]);
        let b = Record::from([("y", "2"), ("x", "1")]);
        let c = Record::from([("x", "1")]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_record_null_value_reads_as_empty() {
        let record: Record = serde_json::from_str(r#"{"name": "Ann", "age": null}"#).unwrap();

        assert_eq!(record.get("age"), Some(""));
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["name", "age"]);
    }

    #[test]
    fn test_record_rejects_duplicate_keys() {
        let err = serde_json::from_str::<Record>(r#"{"name": "Ann", "name": "Bea"}"#).unwrap_err();
        assert!(err.to_string().contains("duplicate field `name`"));
    }

    #[test]
    fn test_validator_from_str() {
        assert_eq!("Numeric".parse::<Validator>().unwrap(), Validator::Numeric);
        assert!("email".parse::<Validator>().is_err());
    }
}
