// ==========================================
// manobrista 产能报表 - 员工登记 API
// ==========================================

use std::sync::Arc;

use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::employee::{EmployeeRecord, EmployeeUpdate};
use crate::repository::EmployeeRegistry;

pub struct EmployeeApi {
    employees: Arc<EmployeeRegistry>,
}

impl EmployeeApi {
    pub fn new(employees: Arc<EmployeeRegistry>) -> Self {
        Self { employees }
    }

    pub fn list(&self, only_active: bool) -> ApiResult<Vec<EmployeeRecord>> {
        let records = if only_active {
            self.employees.list_active()?
        } else {
            self.employees.list_all()?
        };
        Ok(records)
    }

    pub fn add(&self, record: EmployeeRecord) -> ApiResult<()> {
        let matricula = record.matricula.clone();
        self.employees.add(record)?;
        info!(matricula = %matricula.trim(), "员工已通过 API 登记");
        Ok(())
    }

    pub fn update(&self, matricula: &str, update: EmployeeUpdate) -> ApiResult<EmployeeRecord> {
        let matricula = Self::require_matricula(matricula)?;
        if matches!(update.nome.as_deref().map(str::trim), Some("")) {
            return Err(ApiError::InvalidInput("nome vazio".to_string()));
        }
        Ok(self.employees.update(matricula, update)?)
    }

    pub fn remove(&self, matricula: &str) -> ApiResult<()> {
        let matricula = Self::require_matricula(matricula)?;
        Ok(self.employees.remove(matricula)?)
    }

    pub fn find(&self, matricula: &str) -> ApiResult<EmployeeRecord> {
        let matricula = Self::require_matricula(matricula)?;
        self.employees
            .find_by_matricula(matricula)?
            .ok_or_else(|| ApiError::NotFound(format!("funcionario(id={})不存在", matricula)))
    }

    pub fn search(&self, query: &str) -> ApiResult<Vec<EmployeeRecord>> {
        Ok(self.employees.search(query.trim())?)
    }

    /// manobrista 字符串是否对应在职登记员工
    pub fn is_registered(&self, operator: &str) -> ApiResult<bool> {
        Ok(self.employees.is_registered_employee(operator)?)
    }

    fn require_matricula(matricula: &str) -> ApiResult<&str> {
        let trimmed = matricula.trim();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidInput("matrícula não informada".to_string()));
        }
        Ok(trimmed)
    }
}
