// ==========================================
// manobrista 产能报表 - 表格记录模型
// ==========================================
// 职责: 原始表格 / 列映射 / 保留记录集 / 聚合输入行
// ==========================================

use crate::domain::types::CanonicalField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// RawTable - 源文件读出的原始表格
// ==========================================
// 单元格均已 trim；headers 为空表示纯位置表格
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    /// 来源标识（通常是文件路径）
    pub source: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(source: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            source: source.into(),
            headers,
            rows,
        }
    }

    /// 表格列数：表头宽度与最宽数据行中的较大者
    pub fn width(&self) -> usize {
        let widest_row = self.rows.iter().map(|r| r.len()).max().unwrap_or(0);
        self.headers.len().max(widest_row)
    }
}

// ==========================================
// ColumnRef - 已解析的列引用
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnRef {
    /// 表头精确命中
    Header { name: String, index: usize },
    /// 回退到旧版固定列位置
    Position { index: usize },
}

impl ColumnRef {
    pub fn index(&self) -> usize {
        match self {
            ColumnRef::Header { index, .. } => *index,
            ColumnRef::Position { index } => *index,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ColumnRef::Position { .. })
    }
}

// ==========================================
// ColumnMap - 规范字段 → 列引用
// ==========================================
// 每个输入源构建一次；未绑定的字段不在 map 中
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    bindings: BTreeMap<CanonicalField, ColumnRef>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, field: CanonicalField, column: ColumnRef) {
        self.bindings.insert(field, column);
    }

    pub fn get(&self, field: CanonicalField) -> Option<&ColumnRef> {
        self.bindings.get(&field)
    }

    pub fn index_of(&self, field: CanonicalField) -> Option<usize> {
        self.get(field).map(ColumnRef::index)
    }

    pub fn is_bound(&self, field: CanonicalField) -> bool {
        self.bindings.contains_key(&field)
    }

    /// 读取某行中该字段的单元格；字段未绑定或行太短时返回 None
    pub fn cell<'a>(&self, row: &'a [String], field: CanonicalField) -> Option<&'a str> {
        self.index_of(field)
            .and_then(|idx| row.get(idx))
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalField, &ColumnRef)> {
        self.bindings.iter()
    }
}

// ==========================================
// RecordSet - 为明细钻取保留的完整记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    pub source: String,
    pub column_map: ColumnMap,
    /// 完整行（Operator 列已大写）
    pub rows: Vec<Vec<String>>,
}

impl RecordSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// NormalizedRow - 聚合输入
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    pub status: String,
    /// 大写后的完整 manobrista 字符串，即分组键
    pub operator: String,
}

impl NormalizedRow {
    pub fn new(status: impl Into<String>, operator: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            operator: operator.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_uses_widest_row() {
        let table = RawTable::new(
            "t",
            vec!["a".to_string()],
            vec![vec!["1".to_string(), "2".to_string(), "3".to_string()]],
        );
        assert_eq!(table.width(), 3);
        assert_eq!(RawTable::default().width(), 0);
    }

    #[test]
    fn test_cell_short_row() {
        let mut map = ColumnMap::new();
        map.bind(CanonicalField::Operator, ColumnRef::Position { index: 7 });
        let row = vec!["x".to_string(); 3];
        assert_eq!(map.cell(&row, CanonicalField::Operator), None);
        assert_eq!(map.cell(&row, CanonicalField::Status), None);
    }
}
