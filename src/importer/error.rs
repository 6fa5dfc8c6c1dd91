// ==========================================
// manobrista 产能报表 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    /// 源文件损坏或无法读取，只中止该源
    #[error("源文件读取失败 ({source_name}): {message}")]
    SourceReadError {
        source_name: String,
        message: String,
    },

    // ===== 结构错误 =====
    /// 必需列（Status / Manobrista）无法解析，只中止该源
    #[error("必需列缺失 ({source_name}): {field}")]
    SchemaError { source_name: String, field: String },

    // ===== 批量导入 =====
    #[error("没有可用的输入源（{failures} 个源全部失败）")]
    NoUsableSource { failures: usize },
}

impl ImportError {
    pub fn source_read(source_name: impl Into<String>, message: impl ToString) -> Self {
        ImportError::SourceReadError {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
