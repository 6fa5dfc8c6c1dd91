// ==========================================
// manobrista 产能报表 - 列解析器
// ==========================================
// 阶段 1: 表头 / 位置 → 规范字段
// 规则: 表头精确命中优先；否则表格足够宽时回退到旧版固定列位置
// 必需字段: Status, Manobrista（缺失 → SchemaError）
// ==========================================

use crate::domain::record::{ColumnMap, ColumnRef, RawTable};
use crate::domain::types::CanonicalField;
use crate::importer::error::{ImportError, ImportResult};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnResolver;

impl ColumnResolver {
    pub fn new() -> Self {
        Self
    }

    /// 根据表头与列数构建 ColumnMap（纯函数）
    ///
    /// # 参数
    /// - source: 来源标识（用于错误信息）
    /// - headers: 表头行，可为空（纯位置表格）
    /// - width: 表格列数
    pub fn resolve(
        &self,
        source: &str,
        headers: &[String],
        width: usize,
    ) -> ImportResult<ColumnMap> {
        let mut map = ColumnMap::new();

        for field in CanonicalField::ALL {
            let label = field.header_label();
            if let Some(index) = headers.iter().position(|h| h.trim() == label) {
                map.bind(
                    field,
                    ColumnRef::Header {
                        name: label.to_string(),
                        index,
                    },
                );
                continue;
            }

            let fallback = field.legacy_index();
            if width > fallback {
                debug!(source, field = %field, index = fallback, "表头未命中，回退到固定列位置");
                map.bind(field, ColumnRef::Position { index: fallback });
            }
        }

        // 必需字段检查
        for field in CanonicalField::ALL.iter().filter(|f| f.is_required()) {
            if !map.is_bound(*field) {
                return Err(ImportError::SchemaError {
                    source_name: source.to_string(),
                    field: field.header_label().to_string(),
                });
            }
        }

        Ok(map)
    }

    /// 对整张表解析
    pub fn resolve_table(&self, table: &RawTable) -> ImportResult<ColumnMap> {
        self.resolve(&table.source, &table.headers, table.width())
    }
}
