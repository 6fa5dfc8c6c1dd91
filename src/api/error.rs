// ==========================================
// manobrista 产能报表 - API层错误类型
// ==========================================
// 职责: 汇总各层错误，转换为面向用户的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::exporter::ExportError;
use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 认证与权限
    // ==========================================
    #[error("认证失败: 用户名或密码错误，或账号已停用")]
    AuthenticationFailed,

    #[error("权限不足: {0}")]
    PermissionDenied(String),

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("资源已存在: {0}")]
    AlreadyExists(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    #[error("当前会话没有已处理的数据，请先上传文件")]
    NoSessionData,

    // ==========================================
    // 各层错误
    // ==========================================
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("登记文件错误: {0}")]
    Storage(String),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateKey { entity, key } => {
                ApiError::AlreadyExists(format!("{}(key={})已存在", entity, key))
            }
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::InvalidValue { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::BusinessRuleViolation(msg) => ApiError::BusinessRuleViolation(msg),
            RepositoryError::Io(msg) | RepositoryError::Csv(msg) => ApiError::Storage(msg),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
