use flatdb_types::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 读取 JSON 文件；文件不存在时返回 None
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(path, e)),
    };

    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| Error::json(path, e))
}

/// 同目录下的隐藏临时文件：`.<file>.tmp`
pub fn temp_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", file_name))
}

/// 序列化到临时文件，目标文件保持不变
pub fn write_temp<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<PathBuf> {
    let content = serde_json::to_string_pretty(value).map_err(|e| Error::json(path, e))?;
    let tmp = temp_path(path);

    if let Err(e) = fs::write(&tmp, content) {
        let _ = fs::remove_file(&tmp);
        return Err(Error::io(&tmp, e));
    }
    Ok(tmp)
}

/// 用临时文件替换目标文件
pub fn commit(tmp: &Path, path: &Path) -> Result<()> {
    if let Err(e) = fs::rename(tmp, path) {
        let _ = fs::remove_file(tmp);
        return Err(Error::io(path, e));
    }
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

/// 先写临时文件再 rename，读者不会看到写了一半的文件
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let tmp = write_temp(path, value)?;
    commit(&tmp, path)
}

/// 删除文件，返回文件原本是否存在
pub fn remove_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("Removed {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// 是普通文件且可以打开读取
pub fn is_readable(path: &Path) -> bool {
    fs::File::open(path)
        .and_then(|file| file.metadata())
        .map(|meta| meta.is_file())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let tmp = temp_path(Path::new("/data/students_data.json"));
        assert_eq!(tmp, PathBuf::from("/data/.students_data.json.tmp"));
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.json");

        write_json_atomic(&path, &vec![1, 2, 3]).unwrap();

        assert!(!temp_path(&path).exists());
        let values: Option<Vec<i32>> = read_json(&path).unwrap();
        assert_eq!(values, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let values: Option<Vec<i32>> = read_json(&dir.path().join("nope.json")).unwrap();
        assert!(values.is_none());
    }

    #[test]
    fn test_read_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            read_json::<Vec<i32>>(&path),
            Err(Error::Json { .. })
        ));
    }

    #[test]
    fn test_remove_if_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.json");
        fs::write(&path, "[]").unwrap();

        assert!(remove_if_exists(&path).unwrap());
        assert!(!remove_if_exists(&path).unwrap());
        assert!(!is_readable(&path));
    }
}
