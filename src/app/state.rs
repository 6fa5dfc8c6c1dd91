// ==========================================
// manobrista 产能报表 - 应用状态
// ==========================================
// 职责: 按配置打开登记簿，组装各 API 实例
// ==========================================

use std::sync::Arc;

use crate::api::{AccountApi, ApiResult, EmployeeApi, ReportApi};
use crate::config::config_manager::ConfigManager;
use crate::repository::{AccountStore, EmployeeRegistry};

/// 应用状态
///
/// 两个登记簿由各 API 共享
pub struct AppState {
    pub config: ConfigManager,
    pub report_api: ReportApi,
    pub employee_api: EmployeeApi,
    pub account_api: AccountApi,
}

impl AppState {
    /// 按配置打开（必要时创建）员工与用户文件
    pub fn new(config: ConfigManager) -> ApiResult<Self> {
        let app_config = config.config();
        tracing::info!(
            data_dir = %app_config.data_dir.display(),
            "初始化AppState"
        );

        let employees = Arc::new(EmployeeRegistry::open(app_config.employees_path())?);
        let accounts = Arc::new(AccountStore::open(app_config.users_path())?);

        let report_api = ReportApi::new(app_config, employees.clone());
        let employee_api = EmployeeApi::new(employees);
        let account_api = AccountApi::new(accounts);

        tracing::info!("AppState初始化成功");
        Ok(Self {
            config,
            report_api,
            employee_api,
            account_api,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_registry_files() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            data_dir: dir.path().join("dados"),
            ..AppConfig::default()
        };
        let state = AppState::new(ConfigManager::from_config(config.clone())).unwrap();

        assert!(config.employees_path().exists());
        assert!(config.users_path().exists());
        assert_eq!(state.config.config().data_dir, dir.path().join("dados"));
        assert!(state.account_api.login("admin", "admin123").is_ok());
    }
}
