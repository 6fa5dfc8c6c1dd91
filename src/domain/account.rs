// ==========================================
// manobrista 产能报表 - 用户账号
// ==========================================

use crate::domain::types::AccessLevel;
use serde::{Deserialize, Serialize};

/// 用户账号（username 唯一）
///
/// 哈希与盐不参与序列化输出
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(skip_serializing, default)]
    pub salt: String,
    pub nome_completo: String,
    pub nivel_acesso: AccessLevel,
    pub ativo: bool,
}

impl UserAccount {
    pub fn is_admin(&self) -> bool {
        self.nivel_acesso == AccessLevel::Admin
    }
}

/// 部分更新；password 为新明文密码，沿用原盐重新哈希
#[derive(Debug, Clone, Default)]
pub struct AccountUpdate {
    pub nome_completo: Option<String>,
    pub nivel_acesso: Option<AccessLevel>,
    pub ativo: Option<bool>,
    pub password: Option<String>,
}
