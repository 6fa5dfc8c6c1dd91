// ==========================================
// manobrista 产能报表 - 明细提取器
// ==========================================
// 匹配: 完整行的 Manobrista 字段包含所选键（不区分大小写的子串匹配）
//       "JOAO" 同时命中 "JOAO PEREIRA" 与 "MARIA JOAO"
// 字段: 按 ColumnMap 取值，未解析的可选字段为空串
// 分类: 与聚合共用同一个 StatusClassifier
// ==========================================

use crate::domain::record::RecordSet;
use crate::domain::report::{DetailBreakdown, VehicleDetailRow};
use crate::domain::types::{CanonicalField, Category};
use crate::engine::status_classifier::StatusClassifier;
use tracing::{debug, instrument};

pub struct DetailExtractor<'a> {
    classifier: &'a StatusClassifier,
}

impl<'a> DetailExtractor<'a> {
    pub fn new(classifier: &'a StatusClassifier) -> Self {
        Self { classifier }
    }

    /// 提取所选 manobrista 的全部车辆明细；无匹配时返回空
    #[instrument(skip(self, record_sets), fields(sets = record_sets.len()))]
    pub fn extract(&self, selected: &str, record_sets: &[RecordSet]) -> Vec<VehicleDetailRow> {
        let needle = selected.trim().to_uppercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut details = Vec::new();
        for set in record_sets {
            let map = &set.column_map;
            for row in &set.rows {
                let matches = map
                    .cell(row, CanonicalField::Operator)
                    .map(|op| op.to_uppercase().contains(&needle))
                    .unwrap_or(false);
                if !matches {
                    continue;
                }

                let field = |f: CanonicalField| map.cell(row, f).unwrap_or("").to_string();
                let status = field(CanonicalField::Status);
                let category = self.classifier.classify(&status);

                details.push(VehicleDetailRow {
                    chassis: field(CanonicalField::Chassis),
                    model_version: field(CanonicalField::ModelVersion),
                    color: field(CanonicalField::Color),
                    description: field(CanonicalField::Description),
                    status,
                    category,
                });
            }
        }

        debug!(selected = %needle, matched = details.len(), "明细提取完成");
        details
    }
}

/// 明细按分类计数
pub fn detail_breakdown(details: &[VehicleDetailRow]) -> DetailBreakdown {
    details
        .iter()
        .fold(DetailBreakdown::default(), |mut acc, row| {
            acc.total += 1;
            match row.category {
                Some(Category::InDispatch) => acc.in_dispatch += 1,
                Some(Category::Parked) => acc.parked += 1,
                None => acc.unclassified += 1,
            }
            acc
        })
}
