use anyhow::{Context as _, Result};

use super::Context;
use crate::ui::{Output, Prompt};
use flatdb_types::{FieldDef, FieldSet, Validator};

pub fn create(ctx: &Context, name: &str, specs: &[String]) -> Result<()> {
    let output = Output::new();
    let name = name.trim();

    // 先检查是否已存在，避免用户白白输入字段
    if ctx.store.exists(name) {
        anyhow::bail!("A database with the name '{}' already exists", name);
    }

    let fields = if specs.is_empty() {
        Prompt::new().field_set(&output)?
    } else {
        parse_field_specs(specs)?
    };

    output.status("Creating", &format!("database {}", name));
    ctx.store
        .create(name, &fields)
        .with_context(|| format!("Failed to create database '{}'", name))?;

    output.resource_action("Created", name, &ctx.root);
    output.fields(&fields);
    output.finish("create", ctx.scope);

    Ok(())
}

/// 解析 NAME:MAX_LEN[:validator...] 形式的字段定义
pub fn parse_field_spec(spec: &str) -> Result<FieldDef> {
    let mut parts = spec.split(':').map(str::trim);
    let name = parts.next().unwrap_or_default();
    let max_len = parts
        .next()
        .with_context(|| format!("Expected NAME:MAX_LEN, got '{}'", spec))?;
    let max_len: usize = max_len
        .parse()
        .with_context(|| format!("Invalid maximum length '{}' for field '{}'", max_len, name))?;

    let mut def = FieldDef::new(name, max_len);
    for validator in parts {
        def = def.with_validator(validator.parse::<Validator>()?);
    }
    Ok(def)
}

pub fn parse_field_specs(specs: &[String]) -> Result<FieldSet> {
    let defs = specs
        .iter()
        .map(|spec| parse_field_spec(spec))
        .collect::<Result<Vec<_>>>()?;
    Ok(FieldSet::from_defs(defs)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_spec() {
        let def = parse_field_spec("name:20").unwrap();
        assert_eq!(def, FieldDef::new("name", 20));

        let def = parse_field_spec("rollNo:5:numeric").unwrap();
        assert_eq!(def.validators, vec![Validator::Numeric]);
    }

    #[test]
    fn test_parse_field_spec_errors() {
        assert!(parse_field_spec("name").is_err());
        assert!(parse_field_spec("name:-1").is_err());
        assert!(parse_field_spec("name:abc").is_err());
        assert!(parse_field_spec("name:3:email").is_err());
    }

    #[test]
    fn test_parse_field_specs_rejects_duplicates_and_zero() {
        let specs = vec!["name:20".to_string(), "name:10".to_string()];
        assert!(parse_field_specs(&specs).is_err());

        let specs = vec!["age:0".to_string()];
        assert!(parse_field_specs(&specs).is_err());

        let specs = vec!["name:20".to_string(), "age:3".to_string()];
        let fields = parse_field_specs(&specs).unwrap();
        assert_eq!(fields.names().collect::<Vec<_>>(), vec!["name", "age"]);
    }
}
