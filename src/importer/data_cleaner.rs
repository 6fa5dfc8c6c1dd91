// ==========================================
// manobrista 产能报表 - 数据清洗器实现
// ==========================================
// 阶段 2: TRIM / UPPER / 空 manobrista 丢弃
// 输出: 聚合输入 (NormalizedRow) + 明细保留集 (RecordSet)
// ==========================================

use crate::domain::record::{ColumnMap, NormalizedRow, RawTable, RecordSet};
use crate::domain::types::CanonicalField;
use crate::importer::importer_trait::RecordNormalizer;
use tracing::debug;

pub struct DataCleaner;

impl RecordNormalizer for DataCleaner {
    fn normalize(&self, table: &RawTable, column_map: &ColumnMap) -> Vec<NormalizedRow> {
        let rows: Vec<NormalizedRow> = table
            .rows
            .iter()
            .filter_map(|row| {
                let operator = column_map
                    .cell(row, CanonicalField::Operator)
                    .map(|v| self.clean_text(v, true))
                    .filter(|v| !v.is_empty())?;
                let status = column_map
                    .cell(row, CanonicalField::Status)
                    .unwrap_or("")
                    .to_string();
                Some(NormalizedRow::new(status, operator))
            })
            .collect();

        debug!(
            source = %table.source,
            input = table.rows.len(),
            kept = rows.len(),
            "manobrista 为空的行已丢弃"
        );
        rows
    }
}

impl DataCleaner {
    /// 清洗文本字段（TRIM，可选 UPPER）
    pub fn clean_text(&self, value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    /// 构建明细保留集：完整行，Operator 列大写
    pub fn retain_full(&self, table: &RawTable, column_map: &ColumnMap) -> RecordSet {
        let operator_idx = column_map.index_of(CanonicalField::Operator);
        let rows = table
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                if let Some(cell) = operator_idx.and_then(|idx| row.get_mut(idx)) {
                    *cell = self.clean_text(cell, true);
                }
                row
            })
            .collect();

        RecordSet {
            source: table.source.clone(),
            column_map: column_map.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::ColumnRef;

    fn two_column_map() -> ColumnMap {
        let mut map = ColumnMap::new();
        map.bind(
            CanonicalField::Status,
            ColumnRef::Header {
                name: "Status".into(),
                index: 0,
            },
        );
        map.bind(
            CanonicalField::Operator,
            ColumnRef::Header {
                name: "Manobrista".into(),
                index: 1,
            },
        );
        map
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_clean_text_basic() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_text("  joão  ", false), "joão");
        assert_eq!(cleaner.clean_text("  joão  ", true), "JOÃO");
    }

    #[test]
    fn test_normalize_drops_empty_operator_and_uppercases() {
        let table = RawTable::new(
            "t",
            row(&["Status", "Manobrista"]),
            vec![
                row(&["Em Saída", "111 - ana"]),
                row(&["PARQUEADO", ""]),
                row(&["PARQUEADO"]),
            ],
        );

        let rows = DataCleaner.normalize(&table, &two_column_map());

        assert_eq!(rows, vec![NormalizedRow::new("Em Saída", "111 - ANA")]);
    }

    #[test]
    fn test_retain_full_uppercases_operator_only() {
        let table = RawTable::new(
            "t",
            row(&["Status", "Manobrista"]),
            vec![row(&["Em Saída", "bia"]), row(&["Parqueado"])],
        );

        let set = DataCleaner.retain_full(&table, &two_column_map());

        assert_eq!(set.rows[0], row(&["Em Saída", "BIA"]));
        assert_eq!(set.rows[1], row(&["Parqueado"]));
        assert_eq!(set.len(), 2);
    }
}
