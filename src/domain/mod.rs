// ==========================================
// manobrista 产能报表 - 领域模型层
// ==========================================
// 职责: 定义表格记录、报表行、登记簿实体与类型
// 红线: 不含文件访问逻辑,不含引擎逻辑
// ==========================================

pub mod account;
pub mod employee;
pub mod record;
pub mod report;
pub mod types;

// 重导出核心类型
pub use account::{AccountUpdate, UserAccount};
pub use employee::{EmployeeRecord, EmployeeUpdate};
pub use record::{ColumnMap, ColumnRef, NormalizedRow, RawTable, RecordSet};
pub use report::{DetailBreakdown, SummaryMetrics, SummaryRow, VehicleDetailRow};
pub use types::{AccessLevel, CanonicalField, Category, EmployeeType};
