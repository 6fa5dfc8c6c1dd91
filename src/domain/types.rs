// ==========================================
// manobrista 产能报表 - 领域类型定义
// ==========================================
// 职责: 分类、规范字段、员工类型、访问级别
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 车辆移动分类 (Category)
// ==========================================
// 只有两个桶；既不匹配出场也不匹配停放的状态用 Option::None 表达
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    InDispatch, // 出场 / 发运
    Parked,     // 场内停放
}

impl Category {
    /// 导出时使用的本地化标签（固定字面量，不走 i18n）
    pub fn label(&self) -> &'static str {
        match self {
            Category::InDispatch => "EM SAÍDA",
            Category::Parked => "PARQUEADO",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::InDispatch => write!(f, "IN_DISPATCH"),
            Category::Parked => write!(f, "PARKED"),
        }
    }
}

// ==========================================
// 规范字段 (Canonical Field)
// ==========================================
// 每个字段对应一个固定表头标签和一个历史列位置（0 起）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CanonicalField {
    Chassis,
    ModelVersion,
    Color,
    Status,
    Description,
    Operator,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::Chassis,
        CanonicalField::ModelVersion,
        CanonicalField::Color,
        CanonicalField::Status,
        CanonicalField::Description,
        CanonicalField::Operator,
    ];

    /// 源表中的精确表头名
    pub fn header_label(&self) -> &'static str {
        match self {
            CanonicalField::Chassis => "Chassi",
            CanonicalField::ModelVersion => "Versão do modelo",
            CanonicalField::Color => "Cor",
            CanonicalField::Status => "Status",
            CanonicalField::Description => "Descrição",
            CanonicalField::Operator => "Manobrista",
        }
    }

    /// 旧版固定布局中的列位置（A=0, C=2, D=3, E=4, F=5, H=7）
    pub fn legacy_index(&self) -> usize {
        match self {
            CanonicalField::Chassis => 0,
            CanonicalField::ModelVersion => 2,
            CanonicalField::Color => 3,
            CanonicalField::Status => 4,
            CanonicalField::Description => 5,
            CanonicalField::Operator => 7,
        }
    }

    /// 聚合必需字段
    pub fn is_required(&self) -> bool {
        matches!(self, CanonicalField::Status | CanonicalField::Operator)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header_label())
    }
}

// ==========================================
// 员工类型 (Employee Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeType {
    Interno,
    Chofer,
    Terceiro,
    Teclight,
    Outro,
}

impl EmployeeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeType::Interno => "interno",
            EmployeeType::Chofer => "chofer",
            EmployeeType::Terceiro => "terceiro",
            EmployeeType::Teclight => "teclight",
            EmployeeType::Outro => "outro",
        }
    }

    /// 宽松解析：未知文本归为 Outro
    pub fn from_lenient(value: &str) -> Self {
        value.parse().unwrap_or(EmployeeType::Outro)
    }
}

impl FromStr for EmployeeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "interno" => Ok(EmployeeType::Interno),
            "chofer" => Ok(EmployeeType::Chofer),
            "terceiro" => Ok(EmployeeType::Terceiro),
            "teclight" => Ok(EmployeeType::Teclight),
            "outro" => Ok(EmployeeType::Outro),
            other => Err(format!("tipo de funcionário inválido: {}", other)),
        }
    }
}

impl fmt::Display for EmployeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 访问级别 (Access Level)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Admin,
    Supervisor,
    Operador,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Admin => "admin",
            AccessLevel::Supervisor => "supervisor",
            AccessLevel::Operador => "operador",
        }
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(AccessLevel::Admin),
            "supervisor" => Ok(AccessLevel::Supervisor),
            "operador" => Ok(AccessLevel::Operador),
            other => Err(format!(
                "nível de acesso inválido: {} (use admin, supervisor ou operador)",
                other
            )),
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
