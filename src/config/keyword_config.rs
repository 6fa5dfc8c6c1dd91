// ==========================================
// manobrista 产能报表 - 状态关键词配置
// ==========================================
// 出场 / 停放关键词表，聚合与明细共用同一份
// ==========================================

use serde::{Deserialize, Serialize};

/// 状态分类关键词（大写比较，子串匹配）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordConfig {
    /// 出场关键词（SAIDA / EXPEDICAO 及重音变体）
    #[serde(default = "default_dispatch_keywords")]
    pub dispatch: Vec<String>,

    /// 停放关键词
    #[serde(default = "default_parked_keywords")]
    pub parked: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            dispatch: default_dispatch_keywords(),
            parked: default_parked_keywords(),
        }
    }
}

fn default_dispatch_keywords() -> Vec<String> {
    ["SAIDA", "SAÍDA", "EXPEDICAO", "EXPEDIÇÃO", "EXPEDIC", "EXPEDIÇ"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_parked_keywords() -> Vec<String> {
    vec!["PARQUEADO".to_string()]
}

/// 外包人员关键词（小写比较，子串匹配）
pub fn default_third_party_keywords() -> Vec<String> {
    ["teclight", "techlight", "teclighit", "pdi", "ddr"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
