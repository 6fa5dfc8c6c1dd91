// ==========================================
// manobrista 产能报表 - 状态分类器
// ==========================================
// 规则: 输入大写后做子串匹配
//   1) 命中任一出场关键词 → IN_DISPATCH
//   2) 否则命中停放关键词 → PARKED
//   3) 都不命中 → None（只计入 TOTAL，不计入任何桶）
// 聚合与明细必须共用同一个实例
// ==========================================

use crate::config::KeywordConfig;
use crate::domain::types::Category;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusClassifier {
    dispatch: Vec<String>,
    parked: Vec<String>,
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new(&KeywordConfig::default())
    }
}

impl StatusClassifier {
    /// 关键词统一转大写，保证与输入的比较口径一致
    pub fn new(keywords: &KeywordConfig) -> Self {
        let upper = |list: &[String]| -> Vec<String> {
            list.iter()
                .map(|k| k.trim().to_uppercase())
                .filter(|k| !k.is_empty())
                .collect()
        };
        Self {
            dispatch: upper(&keywords.dispatch),
            parked: upper(&keywords.parked),
        }
    }

    pub fn classify(&self, status: &str) -> Option<Category> {
        let status_upper = status.to_uppercase();

        if self.dispatch.iter().any(|k| status_upper.contains(k.as_str())) {
            Some(Category::InDispatch)
        } else if self.parked.iter().any(|k| status_upper.contains(k.as_str())) {
            Some(Category::Parked)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_variants() {
        let classifier = StatusClassifier::default();
        assert_eq!(
            classifier.classify("EM SAÍDA (EXPEDIÇÃO)"),
            Some(Category::InDispatch)
        );
        assert_eq!(classifier.classify("em saida"), Some(Category::InDispatch));
        assert_eq!(classifier.classify("Expedição"), Some(Category::InDispatch));
        assert_eq!(classifier.classify("EXPEDIC."), Some(Category::InDispatch));
    }

    #[test]
    fn test_parked() {
        let classifier = StatusClassifier::default();
        assert_eq!(classifier.classify("PARQUEADO"), Some(Category::Parked));
        assert_eq!(classifier.classify("Parqueado no pátio"), Some(Category::Parked));
    }

    #[test]
    fn test_dispatch_wins_over_parked() {
        let classifier = StatusClassifier::default();
        assert_eq!(
            classifier.classify("PARQUEADO - SAIDA"),
            Some(Category::InDispatch)
        );
    }

    #[test]
    fn test_unrecognized_status() {
        let classifier = StatusClassifier::default();
        assert_eq!(classifier.classify("DESCONHECIDO"), None);
        assert_eq!(classifier.classify(""), None);
    }

    #[test]
    fn test_injected_keywords_are_uppercased() {
        let keywords = KeywordConfig {
            dispatch: vec!["liberado".to_string()],
            parked: vec!["pátio".to_string(), " ".to_string()],
        };
        let classifier = StatusClassifier::new(&keywords);

        assert_eq!(classifier.classify("LIBERADO"), Some(Category::InDispatch));
        assert_eq!(classifier.classify("no Pátio"), Some(Category::Parked));
        assert_eq!(classifier.classify("EM SAIDA"), None);
    }
}
