// ==========================================
// manobrista 产能报表 - 登记簿仓储层
// ==========================================
// 红线: Repository 不含报表逻辑
// ==========================================
// 职责: 员工登记簿与用户账号的平面 CSV 读写
// ==========================================

pub mod account_repo;
pub mod csv_store;
pub mod employee_repo;
pub mod error;

// 重导出核心仓储
pub use account_repo::{generate_salt, hash_password, AccountStore};
pub use csv_store::CsvStore;
pub use employee_repo::{EmployeeRegistry, EmployeeSnapshot};
pub use error::{RepositoryError, RepositoryResult};
