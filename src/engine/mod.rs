// ==========================================
// manobrista 产能报表 - 引擎层
// ==========================================
// 职责: 状态分类、身份解析、聚合、明细提取、汇总过滤
// 红线: 引擎只读输入，每次运行产出新结构，不修改共享状态
// ==========================================

pub mod aggregation;
pub mod detail_extractor;
pub mod filters;
pub mod operator_identity;
pub mod status_classifier;

// 重导出核心引擎
pub use aggregation::{operator_choices, summary_metrics, top_n, AggregationEngine};
pub use detail_extractor::{detail_breakdown, DetailExtractor};
pub use filters::{FilterOutcome, RegisteredLookup, RegistryFilter, ThirdPartyFilter};
pub use operator_identity::OperatorIdentity;
pub use status_classifier::StatusClassifier;
