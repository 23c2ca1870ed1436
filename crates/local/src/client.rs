use flatdb_types::{
    validate_db_name, Error, FieldSet, Record, RecordStore, Result, SchemaStore,
};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::db::files::{
    commit, is_readable, read_json, remove_if_exists, write_json_atomic, write_temp,
};
use crate::db::layout::name_from_system_file;
use crate::db::DatabaseFiles;

/// 本地文件存储客户端
///
/// 每个数据库对应存储根目录下的一对 JSON 文件。没有任何锁：
/// 每次修改都是"读全部 - 内存修改 - 整体覆盖"。
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// 存储根目录
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 数据库对应的文件路径（会先校验数据库名）
    pub fn files(&self, name: &str) -> Result<DatabaseFiles> {
        validate_db_name(name)?;
        Ok(DatabaseFiles::new(&self.root, name))
    }

    fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| Error::io(&self.root, e))
    }

    fn load_records(&self, name: &str, files: &DatabaseFiles) -> Result<Vec<Record>> {
        read_json(&files.data)?.ok_or_else(|| Error::not_found(name))
    }

    fn check_index(index: usize, len: usize) -> Result<()> {
        if index >= len {
            return Err(Error::Index { index, len });
        }
        Ok(())
    }
}

impl SchemaStore for LocalStore {
    fn exists(&self, name: &str) -> bool {
        match self.files(name) {
            Ok(files) => is_readable(&files.system) && is_readable(&files.data),
            Err(_) => false,
        }
    }

    fn create(&self, name: &str, fields: &FieldSet) -> Result<()> {
        let files = self.files(name)?;

        if self.exists(name) {
            return Err(Error::AlreadyExists {
                name: name.to_string(),
            });
        }
        if fields.is_empty() {
            return Err(Error::EmptySchema);
        }

        self.ensure_root()?;

        // 两个文件都先写到临时文件，全部成功后再依次替换
        let data_tmp = write_temp(&files.data, &Vec::<Record>::new())?;
        let system_tmp = match write_temp(&files.system, fields) {
            Ok(tmp) => tmp,
            Err(e) => {
                let _ = fs::remove_file(&data_tmp);
                return Err(e);
            }
        };

        // 数据文件先落地：可见的 schema 文件旁边一定有数据文件
        if let Err(e) = commit(&data_tmp, &files.data) {
            let _ = fs::remove_file(&system_tmp);
            return Err(e);
        }
        if let Err(e) = commit(&system_tmp, &files.system) {
            let _ = remove_if_exists(&files.data);
            return Err(e);
        }

        tracing::debug!("Created database '{}' with {} fields", name, fields.len());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<FieldSet> {
        let files = self.files(name)?;
        read_json(&files.system)?.ok_or_else(|| Error::not_found(name))
    }

    fn delete(&self, name: &str) -> Result<()> {
        let files = self.files(name)?;

        let data_removed = remove_if_exists(&files.data)?;
        let system_removed = remove_if_exists(&files.system)?;

        if !system_removed {
            tracing::debug!(
                "Schema for '{}' not found (data file removed: {})",
                name,
                data_removed
            );
            return Err(Error::not_found(name));
        }

        tracing::debug!("Deleted database '{}'", name);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(&self.root, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&self.root, e))?;
            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let file_name = entry.file_name();
            if let Some(name) = file_name.to_str().and_then(name_from_system_file) {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }
}

impl RecordStore for LocalStore {
    fn load_all(&self, name: &str) -> Result<Vec<Record>> {
        self.load(name)?;
        let files = self.files(name)?;
        self.load_records(name, &files)
    }

    fn save_all(&self, name: &str, records: &[Record]) -> Result<()> {
        self.load(name)?;
        let files = self.files(name)?;
        write_json_atomic(&files.data, records)
    }

    fn append(&self, name: &str, record: Record) -> Result<()> {
        let fields = self.load(name)?;
        let record = fields.check_record(&record)?;

        let files = self.files(name)?;
        let mut records = self.load_records(name, &files)?;
        records.push(record);
        write_json_atomic(&files.data, &records)?;

        tracing::debug!("Appended record {} to '{}'", records.len() - 1, name);
        Ok(())
    }

    fn update(&self, name: &str, index: usize, new_values: &Record) -> Result<()> {
        let fields = self.load(name)?;
        let files = self.files(name)?;
        let mut records = self.load_records(name, &files)?;
        Self::check_index(index, records.len())?;

        let merged = fields.merge_record(&records[index], new_values)?;
        records[index] = merged;
        write_json_atomic(&files.data, &records)?;

        tracing::debug!("Updated record {} in '{}'", index, name);
        Ok(())
    }

    fn remove(&self, name: &str, index: usize) -> Result<Record> {
        self.load(name)?;
        let files = self.files(name)?;
        let mut records = self.load_records(name, &files)?;
        Self::check_index(index, records.len())?;

        let removed = records.remove(index);
        write_json_atomic(&files.data, &records)?;

        tracing::debug!("Removed record {} from '{}'", index, name);
        Ok(removed)
    }
}
