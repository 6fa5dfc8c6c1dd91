// ==========================================
// manobrista 产能报表 - 导入 Trait
// ==========================================
// 职责: 定义导入接口（不包含实现）
// ==========================================

use crate::domain::record::{ColumnMap, NormalizedRow, RawTable};
use crate::importer::error::ImportResult;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表格
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 数据行（已 trim，跳过全空行）
    /// - Err: 文件不存在、格式不支持、内容损坏
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// RecordNormalizer Trait
// ==========================================
// 用途: 将原始表格约简为聚合输入（阶段 2）
// 实现者: DataCleaner
pub trait RecordNormalizer: Send + Sync {
    /// 约简为 {Status, Operator}；Operator 大写，空 Operator 行丢弃
    fn normalize(&self, table: &RawTable, column_map: &ColumnMap) -> Vec<NormalizedRow>;
}
