// ==========================================
// manobrista 产能报表 - CSV 平面文件存储
// ==========================================
// 职责: 登记簿共用的整表读 / 整表写
// 约束: 写入先落临时文件再 rename，避免半写文件
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use csv::{ReaderBuilder, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
    headers: &'static [&'static str],
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>, headers: &'static [&'static str]) -> Self {
        Self {
            path: path.into(),
            headers,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// 文件不存在时创建只含表头的空文件；返回是否新建
    pub fn ensure_exists(&self) -> RepositoryResult<bool> {
        if self.exists() {
            return Ok(false);
        }
        self.write_all::<()>(&[])?;
        Ok(true)
    }

    pub fn read_all<T: DeserializeOwned>(&self) -> RepositoryResult<Vec<T>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for result in reader.deserialize() {
            rows.push(result?);
        }
        Ok(rows)
    }

    pub fn write_all<T: Serialize>(&self, rows: &[T]) -> RepositoryResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("csv.tmp");
        {
            // 表头单独写，保证空表也有表头
            let mut writer = WriterBuilder::new()
                .has_headers(false)
                .from_path(&tmp_path)?;
            writer.write_record(self.headers)?;
            for row in rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

/// 宽松布尔解析（兼容 True/False、1/0、sim/não）
pub fn parse_flag(field: &str, value: &str) -> RepositoryResult<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "sim" | "s" | "yes" | "y" => Ok(true),
        "false" | "0" | "não" | "nao" | "n" | "no" | "" => Ok(false),
        other => Err(RepositoryError::invalid(
            field,
            format!("valor booleano inválido: {}", other),
        )),
    }
}

/// 写入格式与历史文件保持一致
pub fn format_flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Pair {
        a: String,
        b: String,
    }

    #[test]
    fn test_ensure_exists_writes_header() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path().join("sub").join("x.csv"), &["a", "b"]);

        assert!(store.ensure_exists().unwrap());
        assert!(!store.ensure_exists().unwrap());
        assert_eq!(fs::read_to_string(store.path()).unwrap().trim(), "a,b");
        assert!(store.read_all::<Pair>().unwrap().is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let store = CsvStore::new(dir.path().join("x.csv"), &["a", "b"]);
        let rows = vec![
            Pair {
                a: "1".into(),
                b: "São Paulo, SP".into(),
            },
            Pair {
                a: "2".into(),
                b: "".into(),
            },
        ];

        store.write_all(&rows).unwrap();
        assert_eq!(store.read_all::<Pair>().unwrap(), rows);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("ativo", "True").unwrap());
        assert!(parse_flag("ativo", "SIM").unwrap());
        assert!(!parse_flag("ativo", "false").unwrap());
        assert!(!parse_flag("ativo", "Não").unwrap());
        assert!(parse_flag("ativo", "talvez").is_err());
        assert_eq!(format_flag(true), "True");
    }
}
