// ==========================================
// manobrista 产能报表 - 核心库
// ==========================================
// 输入: 一个或多个车辆状态表格（.xlsx/.xls/.csv）
// 输出: 按 manobrista 汇总的产能表、单人车辆明细
// 登记: 员工登记簿与用户账号（CSV 平面文件）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 表格读取、列解析、清洗
pub mod importer;

// 引擎层 - 分类、聚合、明细、过滤
pub mod engine;

// 配置层 - 关键词与路径
pub mod config;

// 数据仓储层 - 员工与账号登记
pub mod repository;

// 导出层
pub mod exporter;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 会话与状态
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AccessLevel, CanonicalField, Category, EmployeeType};

// 领域实体
pub use domain::{
    EmployeeRecord, NormalizedRow, RawTable, RecordSet, SummaryMetrics, SummaryRow, UserAccount,
    VehicleDetailRow,
};

// 引擎
pub use engine::{AggregationEngine, DetailExtractor, OperatorIdentity, StatusClassifier};

// 导入
pub use importer::{ColumnResolver, SourceLoader};

// API
pub use api::{ApiError, ReportApi, ReportOptions, ReportOutcome};

// 应用
pub use app::{AppState, ReportSession};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Relatório de Produtividade de Manobristas";
