// ==========================================
// manobrista 产能报表 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、保存
// 存储: JSON 文件（缺失时使用默认值）
// ==========================================

use crate::config::app_config::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// 配置文件路径环境变量
pub const CONFIG_ENV_VAR: &str = "MANOBRA_CONFIG";

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读写失败 ({path}): {message}")]
    Io { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    Parse { path: String, message: String },
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: Option<PathBuf>,
    config: AppConfig,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::from_config(AppConfig::default())
    }
}

impl ConfigManager {
    /// 使用内存中的配置（不关联文件）
    pub fn from_config(config: AppConfig) -> Self {
        Self {
            config_path: None,
            config,
        }
    }

    /// 从 JSON 文件加载配置
    ///
    /// # 返回
    /// - 文件不存在: 默认配置（保存时写入该路径）
    /// - 文件格式错误: ConfigError::Parse
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let config = if path.exists() {
            let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io {
                path: path_str.clone(),
                message: e.to_string(),
            })?;
            let config: AppConfig = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
                path: path_str.clone(),
                message: e.to_string(),
            })?;
            info!(path = %path_str, "配置文件已加载");
            config
        } else {
            warn!(path = %path_str, "配置文件不存在，使用默认配置");
            AppConfig::default()
        };

        Ok(Self {
            config_path: Some(path.to_path_buf()),
            config,
        })
    }

    /// 按 显式路径 → MANOBRA_CONFIG → 默认配置 的顺序加载
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    /// 将当前配置写回文件
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.config_path else {
            return Ok(());
        };
        let path_str = path.display().to_string();
        let io_err = |e: std::io::Error| ConfigError::Io {
            path: path_str.clone(),
            message: e.to_string(),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(&self.config).map_err(|e| ConfigError::Parse {
            path: path_str.clone(),
            message: e.to_string(),
        })?;
        fs::write(path, json).map_err(io_err)?;
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}
