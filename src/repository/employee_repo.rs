// ==========================================
// manobrista 产能报表 - 员工登记簿
// ==========================================
// 存储: funcionarios.csv (matricula,nome,tipo,ativo)
// 职责: 员工 CRUD、查询、按 manobrista 字符串判断是否登记
// 红线: 查询不到返回 None，不报错
// ==========================================

use crate::domain::employee::{EmployeeRecord, EmployeeUpdate};
use crate::domain::types::EmployeeType;
use crate::engine::filters::RegisteredLookup;
use crate::repository::csv_store::{format_flag, parse_flag, CsvStore};
use crate::repository::error::{RepositoryError, RepositoryResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

const HEADERS: &[&str] = &["matricula", "nome", "tipo", "ativo"];
const ENTITY: &str = "funcionario";

/// 文件中的一行（全部按字符串存储）
#[derive(Debug, Serialize, Deserialize)]
struct EmployeeCsvRow {
    matricula: String,
    nome: String,
    #[serde(default)]
    tipo: String,
    #[serde(default)]
    ativo: String,
}

impl EmployeeCsvRow {
    fn into_record(self) -> RepositoryResult<EmployeeRecord> {
        Ok(EmployeeRecord {
            ativo: parse_flag("ativo", &self.ativo)?,
            tipo: EmployeeType::from_lenient(&self.tipo),
            matricula: self.matricula,
            nome: self.nome,
        })
    }
}

impl From<&EmployeeRecord> for EmployeeCsvRow {
    fn from(record: &EmployeeRecord) -> Self {
        Self {
            matricula: record.matricula.clone(),
            nome: record.nome.clone(),
            tipo: record.tipo.as_str().to_string(),
            ativo: format_flag(record.ativo).to_string(),
        }
    }
}

// ==========================================
// EmployeeRegistry
// ==========================================
pub struct EmployeeRegistry {
    store: CsvStore,
}

impl EmployeeRegistry {
    /// 打开登记簿；文件不存在时创建空表
    pub fn open<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let store = CsvStore::new(path.as_ref(), HEADERS);
        if store.ensure_exists()? {
            info!(path = %store.path().display(), "已创建空的员工登记文件");
        }
        Ok(Self { store })
    }

    pub fn path(&self) -> PathBuf {
        self.store.path().to_path_buf()
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<EmployeeRecord>> {
        self.store
            .read_all::<EmployeeCsvRow>()?
            .into_iter()
            .map(EmployeeCsvRow::into_record)
            .collect()
    }

    pub fn list_active(&self) -> RepositoryResult<Vec<EmployeeRecord>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|e| e.ativo)
            .collect())
    }

    fn save_all(&self, records: &[EmployeeRecord]) -> RepositoryResult<()> {
        let rows: Vec<EmployeeCsvRow> = records.iter().map(EmployeeCsvRow::from).collect();
        self.store.write_all(&rows)
    }

    /// 新增员工
    ///
    /// # 错误
    /// - InvalidValue: matricula 或 nome 为空
    /// - DuplicateKey: matricula 已存在
    #[instrument(skip(self, record), fields(matricula = %record.matricula))]
    pub fn add(&self, record: EmployeeRecord) -> RepositoryResult<()> {
        let record = EmployeeRecord {
            matricula: record.matricula.trim().to_string(),
            nome: record.nome.trim().to_string(),
            ..record
        };
        if record.matricula.is_empty() {
            return Err(RepositoryError::invalid("matricula", "matrícula vazia"));
        }
        if record.nome.is_empty() {
            return Err(RepositoryError::invalid("nome", "nome vazio"));
        }

        let mut all = self.list_all()?;
        if all.iter().any(|e| e.matricula == record.matricula) {
            return Err(RepositoryError::DuplicateKey {
                entity: ENTITY.to_string(),
                key: record.matricula,
            });
        }

        all.push(record);
        self.save_all(&all)?;
        info!("员工已登记");
        Ok(())
    }

    /// 部分更新
    #[instrument(skip(self, update))]
    pub fn update(&self, matricula: &str, update: EmployeeUpdate) -> RepositoryResult<EmployeeRecord> {
        let mut all = self.list_all()?;
        let employee = all
            .iter_mut()
            .find(|e| e.matricula == matricula)
            .ok_or_else(|| RepositoryError::not_found(ENTITY, matricula))?;

        if let Some(nome) = update.nome {
            employee.nome = nome;
        }
        if let Some(tipo) = update.tipo {
            employee.tipo = tipo;
        }
        if let Some(ativo) = update.ativo {
            employee.ativo = ativo;
        }
        let updated = employee.clone();

        self.save_all(&all)?;
        info!("员工信息已更新");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub fn remove(&self, matricula: &str) -> RepositoryResult<()> {
        let mut all = self.list_all()?;
        let before = all.len();
        all.retain(|e| e.matricula != matricula);
        if all.len() == before {
            return Err(RepositoryError::not_found(ENTITY, matricula));
        }

        self.save_all(&all)?;
        info!("员工已删除");
        Ok(())
    }

    pub fn find_by_matricula(&self, matricula: &str) -> RepositoryResult<Option<EmployeeRecord>> {
        Ok(self
            .list_all()?
            .into_iter()
            .find(|e| e.matricula == matricula))
    }

    /// 按姓名或 matricula 搜索（不区分大小写的子串匹配）
    pub fn search(&self, query: &str) -> RepositoryResult<Vec<EmployeeRecord>> {
        let query = query.to_lowercase();
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|e| {
                e.nome.to_lowercase().contains(&query)
                    || e.matricula.to_lowercase().contains(&query)
            })
            .collect())
    }

    /// "12345 - NOME SOBRENOME" → Some("12345")；没有 " - " 分隔时为 None
    pub fn extract_matricula_from_name(employee_name: &str) -> Option<String> {
        employee_name
            .split_once(" - ")
            .map(|(head, _)| head.trim().to_string())
            .filter(|m| !m.is_empty())
    }

    /// manobrista 字符串对应的员工已登记且在职
    pub fn is_registered_employee(&self, employee_name: &str) -> RepositoryResult<bool> {
        let Some(matricula) = Self::extract_matricula_from_name(employee_name) else {
            return Ok(false);
        };
        Ok(self
            .find_by_matricula(&matricula)?
            .map(|e| e.ativo)
            .unwrap_or(false))
    }

    /// 读取一次登记簿，供汇总过滤逐行查询
    pub fn snapshot(&self) -> RepositoryResult<EmployeeSnapshot> {
        let active = self
            .list_all()?
            .into_iter()
            .map(|e| (e.matricula, e.ativo))
            .collect();
        Ok(EmployeeSnapshot { active })
    }
}

/// 登记簿快照：matricula → 是否在职
#[derive(Debug, Clone, Default)]
pub struct EmployeeSnapshot {
    active: HashMap<String, bool>,
}

impl RegisteredLookup for EmployeeSnapshot {
    fn is_active_matricula(&self, matricula: &str) -> bool {
        self.active.get(matricula).copied().unwrap_or(false)
    }
}
