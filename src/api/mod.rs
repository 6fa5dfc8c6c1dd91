// ==========================================
// manobrista 产能报表 - API 层
// ==========================================
// 职责: 面向 CLI 的业务接口，统一错误为 ApiError
// ==========================================

pub mod account_api;
pub mod employee_api;
pub mod error;
pub mod report_api;

pub use account_api::{AccountApi, NewUser, UserInfo};
pub use employee_api::EmployeeApi;
pub use error::{ApiError, ApiResult};
pub use report_api::{FiltersApplied, ReportApi, ReportOptions, ReportOutcome, VehicleDetailReport};
