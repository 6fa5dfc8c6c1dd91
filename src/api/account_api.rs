// ==========================================
// manobrista 产能报表 - 账号 API
// ==========================================
// 职责: 登录认证、用户管理（仅管理员）
// ==========================================

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::account::{AccountUpdate, UserAccount};
use crate::domain::types::AccessLevel;
use crate::repository::AccountStore;

/// 对外展示的用户信息（不含哈希与盐）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub username: String,
    pub nome_completo: String,
    pub nivel_acesso: AccessLevel,
    pub ativo: bool,
}

impl From<UserAccount> for UserInfo {
    fn from(account: UserAccount) -> Self {
        Self {
            username: account.username,
            nome_completo: account.nome_completo,
            nivel_acesso: account.nivel_acesso,
            ativo: account.ativo,
        }
    }
}

/// 新用户参数
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub nome_completo: String,
    pub nivel_acesso: AccessLevel,
    pub ativo: bool,
}

pub struct AccountApi {
    accounts: Arc<AccountStore>,
}

impl AccountApi {
    pub fn new(accounts: Arc<AccountStore>) -> Self {
        Self { accounts }
    }

    /// 登录
    ///
    /// # 返回
    /// - Ok(UserAccount): 认证通过
    /// - Err(AuthenticationFailed): 用户不存在、已停用或密码错误
    pub fn login(&self, username: &str, password: &str) -> ApiResult<UserAccount> {
        if username.trim().is_empty() {
            return Err(ApiError::InvalidInput("usuário não informado".to_string()));
        }
        self.accounts
            .authenticate(username.trim(), password)?
            .ok_or(ApiError::AuthenticationFailed)
    }

    fn require_admin(actor: &UserAccount) -> ApiResult<()> {
        if actor.is_admin() {
            Ok(())
        } else {
            warn!(user = %actor.username, "非管理员尝试管理用户");
            Err(ApiError::PermissionDenied(format!(
                "usuário {} não é administrador",
                actor.username
            )))
        }
    }

    pub fn list_users(&self, actor: &UserAccount) -> ApiResult<Vec<UserInfo>> {
        Self::require_admin(actor)?;
        Ok(self
            .accounts
            .list_all()?
            .into_iter()
            .map(UserInfo::from)
            .collect())
    }

    pub fn add_user(&self, actor: &UserAccount, user: NewUser) -> ApiResult<()> {
        Self::require_admin(actor)?;
        if user.password.is_empty() {
            return Err(ApiError::InvalidInput("senha vazia".to_string()));
        }
        self.accounts.add(
            &user.username,
            &user.password,
            &user.nome_completo,
            user.nivel_acesso,
            user.ativo,
        )?;
        info!(actor = %actor.username, username = %user.username, "管理员新增用户");
        Ok(())
    }

    pub fn update_user(
        &self,
        actor: &UserAccount,
        username: &str,
        update: AccountUpdate,
    ) -> ApiResult<UserInfo> {
        Self::require_admin(actor)?;
        if matches!(update.password.as_deref(), Some("")) {
            return Err(ApiError::InvalidInput("senha vazia".to_string()));
        }
        let updated = self.accounts.update(username, update)?;
        info!(actor = %actor.username, username, "管理员更新用户");
        Ok(updated.into())
    }

    pub fn remove_user(&self, actor: &UserAccount, username: &str) -> ApiResult<()> {
        Self::require_admin(actor)?;
        self.accounts.remove(username)?;
        info!(actor = %actor.username, username, "管理员删除用户");
        Ok(())
    }
}
