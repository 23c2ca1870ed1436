use crate::error::{Error, Result};
use crate::models::{FieldSet, Record};
use crate::table::render_table;

/// schema 存储的统一接口
///
/// 管理数据库名到字段定义的映射。任何存储实现（本地文件或其他）都应实现这个 trait。
pub trait SchemaStore: Send + Sync {
    /// schema 与数据都存在且可读时返回 true
    fn exists(&self, name: &str) -> bool;

    /// 创建空数据库（schema + 空记录列表）
    fn create(&self, name: &str, fields: &FieldSet) -> Result<()>;

    /// 读取字段定义，保持插入顺序
    fn load(&self, name: &str) -> Result<FieldSet>;

    /// 删除整个数据库；只有 schema 不存在时才报 NotFound
    fn delete(&self, name: &str) -> Result<()>;

    /// 列出所有存在 schema 的数据库名（目录遍历顺序）
    fn list(&self) -> Result<Vec<String>>;
}

/// 记录存储的统一接口
///
/// 所有操作都会先加载对应数据库的 schema。索引从 0 开始。
pub trait RecordStore: SchemaStore {
    /// 读取全部记录
    fn load_all(&self, name: &str) -> Result<Vec<Record>>;

    /// 原样覆盖全部记录（不做校验）
    fn save_all(&self, name: &str, records: &[Record]) -> Result<()>;

    /// 校验后追加一条记录
    fn append(&self, name: &str, record: Record) -> Result<()>;

    /// 以原值为默认值更新一条记录，任一字段失败则不写入
    fn update(&self, name: &str, index: usize, new_values: &Record) -> Result<()>;

    /// 删除并返回一条记录（调用方负责确认）
    fn remove(&self, name: &str, index: usize) -> Result<Record>;

    /// 读取单条记录
    fn get(&self, name: &str, index: usize) -> Result<Record> {
        let records = self.load_all(name)?;
        let len = records.len();
        records
            .into_iter()
            .nth(index)
            .ok_or(Error::Index { index, len })
    }

    /// 获取记录总数
    fn count(&self, name: &str) -> Result<usize> {
        Ok(self.load_all(name)?.len())
    }

    /// 渲染为定宽表格
    fn render(&self, name: &str) -> Result<String> {
        let fields = self.load(name)?;
        let records = self.load_all(name)?;
        Ok(render_table(&fields, &records))
    }
}
