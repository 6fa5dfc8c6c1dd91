// ==========================================
// manobrista 产能报表 - 员工登记记录
// ==========================================

use crate::domain::types::EmployeeType;
use serde::{Deserialize, Serialize};

/// 已登记员工（matricula 唯一）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub matricula: String,
    pub nome: String,
    pub tipo: EmployeeType,
    pub ativo: bool,
}

impl EmployeeRecord {
    pub fn new(matricula: impl Into<String>, nome: impl Into<String>) -> Self {
        Self {
            matricula: matricula.into(),
            nome: nome.into(),
            tipo: EmployeeType::Interno,
            ativo: true,
        }
    }

    pub fn with_tipo(mut self, tipo: EmployeeType) -> Self {
        self.tipo = tipo;
        self
    }

    pub fn with_ativo(mut self, ativo: bool) -> Self {
        self.ativo = ativo;
        self
    }
}

/// 部分更新；None 字段保持原值
#[derive(Debug, Clone, Default)]
pub struct EmployeeUpdate {
    pub nome: Option<String>,
    pub tipo: Option<EmployeeType>,
    pub ativo: Option<bool>,
}
