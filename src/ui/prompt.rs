use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use flatdb_types::{FieldDef, FieldSet, Record, Validator};

use super::Output;

/// 交互式输入（基于 dialoguer）
pub struct Prompt {
    theme: ColorfulTheme,
}

impl Prompt {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// 读取一行文本
    pub fn text(&self, prompt: &str) -> Result<String> {
        let value: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    /// 菜单选择，返回选中项下标
    pub fn select(&self, prompt: &str, items: &[&str]) -> Result<usize> {
        let choice = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()?;
        Ok(choice)
    }

    /// 是/否确认，默认否
    pub fn confirm(&self, prompt: &str) -> Result<bool> {
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?;
        Ok(confirmed)
    }

    /// 读取记录编号（1..=count）
    pub fn record_number(&self, count: usize) -> Result<usize> {
        let number: usize = Input::with_theme(&self.theme)
            .with_prompt(format!("Record number (1-{})", count))
            .validate_with(|n: &usize| -> Result<(), String> {
                if (1..=count).contains(n) {
                    Ok(())
                } else {
                    Err(format!("enter a number between 1 and {}", count))
                }
            })
            .interact_text()?;
        Ok(number)
    }

    /// 逐个询问字段定义，输入空名称或 done 结束
    pub fn field_set(&self, output: &Output) -> Result<FieldSet> {
        let mut fields = FieldSet::new();

        loop {
            let name = self.text("Field name (empty or 'done' to finish)")?;
            if name.is_empty() || name.eq_ignore_ascii_case("done") {
                break;
            }
            if fields.get(&name).is_some() {
                output.error(&format!(
                    "Field '{}' already exists, please enter a unique name",
                    name
                ));
                continue;
            }

            let max_len: usize = Input::with_theme(&self.theme)
                .with_prompt(format!("Maximum length for '{}'", name))
                .validate_with(|n: &usize| -> Result<(), &str> {
                    if *n == 0 {
                        Err("length must be greater than zero")
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?;

            let mut def = FieldDef::new(name, max_len);
            if self.confirm("Numeric values only?")? {
                def = def.with_validator(Validator::Numeric);
            }

            if let Err(e) = fields.push(def) {
                output.error(&e.to_string());
            }
        }

        Ok(fields)
    }

    /// 询问单个字段值；有默认值时直接回车沿用
    pub fn value(&self, def: &FieldDef, default: Option<&str>) -> Result<String> {
        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(format!("{} (max {} chars)", def.name, def.max_len))
            .allow_empty(true);
        if let Some(default) = default.filter(|d| !d.is_empty()) {
            input = input.default(default.to_string());
        }

        let keep_on_empty = default.is_some();
        let value = input
            .validate_with(|value: &String| -> Result<(), String> {
                if value.is_empty() && keep_on_empty {
                    return Ok(());
                }
                def.check(value).map_err(|e| e.to_string())
            })
            .interact_text()?;
        Ok(value)
    }

    /// 补全新记录：preset 中没有的字段逐个询问
    pub fn record(&self, fields: &FieldSet, preset: &Record) -> Result<Record> {
        let mut record = preset.clone();
        for def in fields {
            if record.get(&def.name).is_none() {
                let value = self.value(def, None)?;
                record.set(def.name.clone(), value);
            }
        }
        Ok(record)
    }

    /// 以当前值为默认值，逐个询问替换值
    pub fn replacements(&self, fields: &FieldSet, current: &Record) -> Result<Record> {
        let mut replacements = Record::new();
        for def in fields {
            let value = self.value(def, Some(current.get(&def.name).unwrap_or("")))?;
            replacements.set(def.name.clone(), value);
        }
        Ok(replacements)
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::new()
    }
}
