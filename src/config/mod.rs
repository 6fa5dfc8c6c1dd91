// ==========================================
// manobrista 产能报表 - 配置层
// ==========================================
// 职责: 应用配置、关键词表的加载与保存
// 存储: JSON 文件
// ==========================================

pub mod app_config;
pub mod config_manager;
pub mod keyword_config;

// 重导出核心配置管理器
pub use app_config::AppConfig;
pub use config_manager::{ConfigError, ConfigManager, CONFIG_ENV_VAR};
pub use keyword_config::{default_third_party_keywords, KeywordConfig};
