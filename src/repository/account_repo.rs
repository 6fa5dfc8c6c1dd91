// ==========================================
// manobrista 产能报表 - 用户账号存储
// ==========================================
// 存储: usuarios.csv (username,password_hash,salt,nome_completo,nivel_acesso,ativo)
// 哈希: SHA-256(password + salt)，小写 hex；盐为 16 位字母数字
// 首次创建时写入默认管理员 admin / admin123
// ==========================================

use crate::domain::account::{AccountUpdate, UserAccount};
use crate::domain::types::AccessLevel;
use crate::repository::csv_store::{format_flag, parse_flag, CsvStore};
use crate::repository::error::{RepositoryError, RepositoryResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{info, instrument, warn};
use uuid::Uuid;

const HEADERS: &[&str] = &[
    "username",
    "password_hash",
    "salt",
    "nome_completo",
    "nivel_acesso",
    "ativo",
];
const ENTITY: &str = "usuario";
const SALT_LEN: usize = 16;

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_NAME: &str = "Administrador";

/// 计算 SHA-256(password + salt)
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// 生成 16 位字母数字盐
pub fn generate_salt() -> String {
    Uuid::new_v4().simple().to_string()[..SALT_LEN].to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct AccountCsvRow {
    username: String,
    password_hash: String,
    salt: String,
    nome_completo: String,
    nivel_acesso: String,
    ativo: String,
}

impl AccountCsvRow {
    fn into_account(self) -> RepositoryResult<UserAccount> {
        let nivel_acesso = self
            .nivel_acesso
            .parse::<AccessLevel>()
            .map_err(|e| RepositoryError::invalid("nivel_acesso", e))?;
        Ok(UserAccount {
            ativo: parse_flag("ativo", &self.ativo)?,
            username: self.username,
            password_hash: self.password_hash,
            salt: self.salt,
            nome_completo: self.nome_completo,
            nivel_acesso,
        })
    }
}

impl From<&UserAccount> for AccountCsvRow {
    fn from(account: &UserAccount) -> Self {
        Self {
            username: account.username.clone(),
            password_hash: account.password_hash.clone(),
            salt: account.salt.clone(),
            nome_completo: account.nome_completo.clone(),
            nivel_acesso: account.nivel_acesso.as_str().to_string(),
            ativo: format_flag(account.ativo).to_string(),
        }
    }
}

/// 目标是在职管理员时，要求至少还有另一个
fn ensure_other_active_admin(all: &[UserAccount], message: &str) -> RepositoryResult<()> {
    let active_admins = all.iter().filter(|u| u.is_admin() && u.ativo).count();
    if active_admins <= 1 {
        return Err(RepositoryError::BusinessRuleViolation(message.to_string()));
    }
    Ok(())
}

// ==========================================
// AccountStore
// ==========================================
pub struct AccountStore {
    store: CsvStore,
}

impl AccountStore {
    /// 打开账号文件；不存在时创建并写入默认管理员
    pub fn open<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let account_store = Self {
            store: CsvStore::new(path.as_ref(), HEADERS),
        };

        if account_store.store.ensure_exists()? {
            warn!(
                path = %account_store.store.path().display(),
                "已创建用户文件并写入默认管理员账号，请尽快修改密码"
            );
            account_store.add(
                DEFAULT_ADMIN_USERNAME,
                DEFAULT_ADMIN_PASSWORD,
                DEFAULT_ADMIN_NAME,
                AccessLevel::Admin,
                true,
            )?;
        }
        Ok(account_store)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<UserAccount>> {
        self.store
            .read_all::<AccountCsvRow>()?
            .into_iter()
            .map(AccountCsvRow::into_account)
            .collect()
    }

    pub fn list_active(&self) -> RepositoryResult<Vec<UserAccount>> {
        Ok(self.list_all()?.into_iter().filter(|u| u.ativo).collect())
    }

    fn save_all(&self, accounts: &[UserAccount]) -> RepositoryResult<()> {
        let rows: Vec<AccountCsvRow> = accounts.iter().map(AccountCsvRow::from).collect();
        self.store.write_all(&rows)
    }

    /// 新增用户
    #[instrument(skip(self, password, nome_completo))]
    pub fn add(
        &self,
        username: &str,
        password: &str,
        nome_completo: &str,
        nivel_acesso: AccessLevel,
        ativo: bool,
    ) -> RepositoryResult<()> {
        let username = username.trim();
        if username.is_empty() {
            return Err(RepositoryError::invalid("username", "nome de usuário vazio"));
        }

        let mut all = self.list_all()?;
        if all.iter().any(|u| u.username == username) {
            return Err(RepositoryError::DuplicateKey {
                entity: ENTITY.to_string(),
                key: username.to_string(),
            });
        }

        let salt = generate_salt();
        all.push(UserAccount {
            username: username.to_string(),
            password_hash: hash_password(password, &salt),
            salt,
            nome_completo: nome_completo.to_string(),
            nivel_acesso,
            ativo,
        });
        self.save_all(&all)?;
        info!("用户已添加");
        Ok(())
    }

    /// 部分更新；新密码沿用原盐
    ///
    /// 停用或降级最后一个在职管理员会被拒绝
    #[instrument(skip(self, update))]
    pub fn update(&self, username: &str, update: AccountUpdate) -> RepositoryResult<UserAccount> {
        let mut all = self.list_all()?;
        let target = all
            .iter()
            .find(|u| u.username == username)
            .ok_or_else(|| RepositoryError::not_found(ENTITY, username))?;

        let deactivates = update.ativo == Some(false);
        let demotes = update
            .nivel_acesso
            .is_some_and(|nivel| nivel != AccessLevel::Admin);
        if target.is_admin() && target.ativo && (deactivates || demotes) {
            ensure_other_active_admin(
                &all,
                "não é possível desativar ou rebaixar o último administrador ativo",
            )?;
        }

        let account = all
            .iter_mut()
            .find(|u| u.username == username)
            .ok_or_else(|| RepositoryError::not_found(ENTITY, username))?;

        if let Some(nome) = update.nome_completo {
            account.nome_completo = nome;
        }
        if let Some(nivel) = update.nivel_acesso {
            account.nivel_acesso = nivel;
        }
        if let Some(ativo) = update.ativo {
            account.ativo = ativo;
        }
        if let Some(password) = update.password {
            account.password_hash = hash_password(&password, &account.salt);
        }
        let updated = account.clone();

        self.save_all(&all)?;
        info!("用户已更新");
        Ok(updated)
    }

    /// 删除用户；不允许删除最后一个在职管理员
    #[instrument(skip(self))]
    pub fn remove(&self, username: &str) -> RepositoryResult<()> {
        let mut all = self.list_all()?;
        let target = all
            .iter()
            .find(|u| u.username == username)
            .ok_or_else(|| RepositoryError::not_found(ENTITY, username))?;

        if target.is_admin() && target.ativo {
            ensure_other_active_admin(
                &all,
                "não é possível remover o último administrador ativo",
            )?;
        }

        all.retain(|u| u.username != username);
        self.save_all(&all)?;
        info!("用户已删除");
        Ok(())
    }

    pub fn find_by_username(&self, username: &str) -> RepositoryResult<Option<UserAccount>> {
        Ok(self.list_all()?.into_iter().find(|u| u.username == username))
    }

    /// 认证
    ///
    /// # 返回
    /// - Some(UserAccount): 用户存在、在职、密码正确
    /// - None: 其余情况
    #[instrument(skip(self, password))]
    pub fn authenticate(&self, username: &str, password: &str) -> RepositoryResult<Option<UserAccount>> {
        let Some(account) = self.find_by_username(username)? else {
            return Ok(None);
        };
        if !account.ativo {
            warn!("停用账号尝试登录");
            return Ok(None);
        }
        if hash_password(password, &account.salt) != account.password_hash {
            warn!("密码错误");
            return Ok(None);
        }
        info!("登录成功");
        Ok(Some(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, AccountStore) {
        let dir = TempDir::new().unwrap();
        let store = AccountStore::open(dir.path().join("usuarios.csv")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_hash_password_known_vector() {
        // sha256("abc")
        assert_eq!(
            hash_password("a", "bc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_salt_shape() {
        let salt = generate_salt();
        assert_eq!(salt.len(), 16);
        assert!(salt.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_default_admin_seeded() {
        let (_dir, store) = store();
        let admin = store.authenticate("admin", "admin123").unwrap().unwrap();
        assert_eq!(admin.nome_completo, "Administrador");
        assert!(admin.is_admin());
        assert!(store.authenticate("admin", "errada").unwrap().is_none());
        assert!(store.authenticate("ninguem", "admin123").unwrap().is_none());
    }

    #[test]
    fn test_password_change_keeps_salt() {
        let (_dir, store) = store();
        let before = store.find_by_username("admin").unwrap().unwrap();

        let after = store
            .update(
                "admin",
                AccountUpdate {
                    password: Some("nova".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(before.salt, after.salt);
        assert!(store.authenticate("admin", "admin123").unwrap().is_none());
        assert!(store.authenticate("admin", "nova").unwrap().is_some());
    }

    #[test]
    fn test_cannot_remove_last_active_admin() {
        let (_dir, store) = store();
        let err = store.remove("admin").unwrap_err();
        assert!(matches!(err, RepositoryError::BusinessRuleViolation(_)));

        store
            .add("chefe", "x", "Chefe", AccessLevel::Admin, true)
            .unwrap();
        store.remove("admin").unwrap();
        assert!(store.find_by_username("admin").unwrap().is_none());
    }

    #[test]
    fn test_cannot_deactivate_or_demote_last_active_admin() {
        let (_dir, store) = store();

        let err = store
            .update(
                "admin",
                AccountUpdate {
                    ativo: Some(false),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, RepositoryError::BusinessRuleViolation(_)));

        let err = store
            .update(
                "admin",
                AccountUpdate {
                    nivel_acesso: Some(AccessLevel::Operador),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, RepositoryError::BusinessRuleViolation(_)));

        let admin = store.find_by_username("admin").unwrap().unwrap();
        assert!(admin.is_admin() && admin.ativo);

        // 仍可改名、改密码、保持管理员
        store
            .update(
                "admin",
                AccountUpdate {
                    nome_completo: Some("Chefe do Pátio".to_string()),
                    nivel_acesso: Some(AccessLevel::Admin),
                    ativo: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();

        store
            .add("chefe", "x", "Chefe", AccessLevel::Admin, true)
            .unwrap();
        let demoted = store
            .update(
                "admin",
                AccountUpdate {
                    nivel_acesso: Some(AccessLevel::Supervisor),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(!demoted.is_admin());
        assert_eq!(
            store
                .list_active()
                .unwrap()
                .iter()
                .filter(|u| u.is_admin())
                .count(),
            1
        );
    }
}
