// ==========================================
// manobrista 产能报表 - 应用配置
// ==========================================
// 存储: JSON 文件；每个字段都有默认值
// ==========================================

use crate::config::keyword_config::{default_third_party_keywords, KeywordConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 默认员工登记文件名
pub const DEFAULT_EMPLOYEES_FILE: &str = "funcionarios.csv";
/// 默认用户账号文件名
pub const DEFAULT_USERS_FILE: &str = "usuarios.csv";
/// 默认界面语言
pub const DEFAULT_LOCALE: &str = "pt-BR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 数据目录（登记簿文件所在目录）
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_employees_file")]
    pub employees_file: String,

    #[serde(default = "default_users_file")]
    pub users_file: String,

    #[serde(default)]
    pub keywords: KeywordConfig,

    #[serde(default = "default_third_party_keywords")]
    pub third_party_keywords: Vec<String>,

    /// 输入表格第一行是否为表头
    #[serde(default = "default_has_headers")]
    pub has_headers: bool,

    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            employees_file: default_employees_file(),
            users_file: default_users_file(),
            keywords: KeywordConfig::default(),
            third_party_keywords: default_third_party_keywords(),
            has_headers: default_has_headers(),
            locale: default_locale(),
        }
    }
}

impl AppConfig {
    pub fn employees_path(&self) -> PathBuf {
        self.data_dir.join(&self.employees_file)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }
}

/// 系统数据目录下的 manobra-report；取不到时使用当前目录
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("manobra-report"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_employees_file() -> String {
    DEFAULT_EMPLOYEES_FILE.to_string()
}

fn default_users_file() -> String {
    DEFAULT_USERS_FILE.to_string()
}

fn default_has_headers() -> bool {
    true
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}
