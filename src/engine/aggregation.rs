// ==========================================
// manobrista 产能报表 - 聚合引擎
// ==========================================
// 输入: 一个或多个 NormalizedRow 序列
// 输出: 每个 manobrista 字符串一行的汇总表，按 TOTAL 降序
// 分组键: 大写后的完整 manobrista 字符串（不是解析出的 ID）
// 排序: 稳定排序，TOTAL 相同时保持首次出现顺序
// ==========================================

use crate::domain::record::NormalizedRow;
use crate::domain::report::{SummaryMetrics, SummaryRow};
use crate::domain::types::Category;
use crate::engine::operator_identity::OperatorIdentity;
use crate::engine::status_classifier::StatusClassifier;
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// AggregationEngine
// ==========================================
pub struct AggregationEngine<'a> {
    classifier: &'a StatusClassifier,
}

impl<'a> AggregationEngine<'a> {
    pub fn new(classifier: &'a StatusClassifier) -> Self {
        Self { classifier }
    }

    /// 聚合所有输入集；空输入返回空表
    #[instrument(skip_all, fields(sets = record_sets.len()))]
    pub fn aggregate(&self, record_sets: &[Vec<NormalizedRow>]) -> Vec<SummaryRow> {
        // 键 → summary 下标；summary 按首次出现顺序追加
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut summary: Vec<SummaryRow> = Vec::new();
        let mut unclassified = 0usize;

        for row in record_sets.iter().flatten() {
            let key = row.operator.as_str();
            if key.trim().is_empty() {
                continue;
            }

            // ID / 姓名只在首次出现时派生
            let slot = *index.entry(key).or_insert_with(|| {
                let (matricula, nome) = OperatorIdentity::parse(key).into_pair();
                summary.push(SummaryRow::new(matricula, nome));
                summary.len() - 1
            });
            let entry = &mut summary[slot];

            match self.classifier.classify(&row.status) {
                Some(Category::InDispatch) => entry.em_saida += 1,
                Some(Category::Parked) => entry.parqueados += 1,
                None => unclassified += 1,
            }
            entry.total += 1;
        }

        // sort_by 为稳定排序
        summary.sort_by(|a, b| b.total.cmp(&a.total));

        debug!(
            operators = summary.len(),
            unclassified = unclassified,
            "聚合完成"
        );
        summary
    }
}

// ==========================================
// 汇总指标
// ==========================================

/// 汇总表总体指标
pub fn summary_metrics(summary: &[SummaryRow]) -> SummaryMetrics {
    let total_operators = summary.len();
    let total_vehicles: u64 = summary.iter().map(|r| r.total).sum();
    let total_in_dispatch: u64 = summary.iter().map(|r| r.em_saida).sum();
    let total_parked: u64 = summary.iter().map(|r| r.parqueados).sum();
    let average_per_operator = if total_operators > 0 {
        total_vehicles as f64 / total_operators as f64
    } else {
        0.0
    };

    SummaryMetrics {
        total_operators,
        total_vehicles,
        total_in_dispatch,
        total_parked,
        average_per_operator,
    }
}

/// 排名前 N（汇总表已按 TOTAL 降序）
pub fn top_n(summary: &[SummaryRow], n: usize) -> &[SummaryRow] {
    &summary[..n.min(summary.len())]
}

/// 明细钻取的候选列表：去重、非空、按字母排序的 MANOBRISTA
pub fn operator_choices(summary: &[SummaryRow]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for row in summary {
        if !row.manobrista.is_empty() && !names.contains(&row.manobrista) {
            names.push(row.manobrista.clone());
        }
    }
    names.sort();
    names
}
