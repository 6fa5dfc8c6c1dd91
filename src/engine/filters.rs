// ==========================================
// manobrista 产能报表 - 汇总表过滤器
// ==========================================
// 两个过滤器都只删除行，剩余行保持原顺序
// - ThirdPartyFilter: MANOBRISTA 含外包关键词（不区分大小写）的行删除
// - RegistryFilter: 只保留 MATRICULA 属于在职登记员工的行；
//                   一行都不匹配时不应用过滤
// ==========================================

use crate::domain::report::SummaryRow;
use serde::Serialize;
use tracing::{info, warn};

/// 过滤结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOutcome {
    pub rows: Vec<SummaryRow>,
    pub removed: usize,
    /// 过滤器是否实际生效
    pub applied: bool,
}

impl FilterOutcome {
    fn untouched(rows: Vec<SummaryRow>) -> Self {
        Self {
            rows,
            removed: 0,
            applied: false,
        }
    }
}

/// 在职员工查询接口（由员工登记簿实现）
pub trait RegisteredLookup {
    /// matricula 对应的员工存在且在职
    fn is_active_matricula(&self, matricula: &str) -> bool;
}

// ==========================================
// ThirdPartyFilter
// ==========================================
#[derive(Debug, Clone)]
pub struct ThirdPartyFilter {
    keywords: Vec<String>,
}

impl ThirdPartyFilter {
    pub fn new(keywords: &[String]) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    pub fn is_third_party(&self, nome: &str) -> bool {
        let lower = nome.to_lowercase();
        self.keywords.iter().any(|k| lower.contains(k.as_str()))
    }

    pub fn apply(&self, rows: Vec<SummaryRow>) -> FilterOutcome {
        let before = rows.len();
        let kept: Vec<SummaryRow> = rows
            .into_iter()
            .filter(|r| !self.is_third_party(&r.manobrista))
            .collect();
        let removed = before - kept.len();

        if removed > 0 {
            info!(removed, "已过滤外包 manobrista");
        }
        FilterOutcome {
            rows: kept,
            removed,
            applied: removed > 0,
        }
    }
}

// ==========================================
// RegistryFilter
// ==========================================
pub struct RegistryFilter<'a, L: RegisteredLookup> {
    lookup: &'a L,
}

impl<'a, L: RegisteredLookup> RegistryFilter<'a, L> {
    pub fn new(lookup: &'a L) -> Self {
        Self { lookup }
    }

    pub fn apply(&self, rows: Vec<SummaryRow>) -> FilterOutcome {
        let registered: Vec<bool> = rows
            .iter()
            .map(|r| !r.matricula.is_empty() && self.lookup.is_active_matricula(&r.matricula))
            .collect();

        if !registered.iter().any(|&r| r) {
            if !rows.is_empty() {
                warn!("没有任何 manobrista 在登记簿中，未应用登记过滤");
            }
            return FilterOutcome::untouched(rows);
        }

        let before = rows.len();
        let kept: Vec<SummaryRow> = rows
            .into_iter()
            .zip(registered)
            .filter_map(|(row, ok)| ok.then_some(row))
            .collect();
        let removed = before - kept.len();

        info!(removed, "已过滤未登记 manobrista");
        FilterOutcome {
            rows: kept,
            removed,
            applied: removed > 0,
        }
    }
}
