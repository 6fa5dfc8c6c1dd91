// ==========================================
// manobrista 产能报表 - 报表行模型
// ==========================================
// 职责: 汇总行 / 车辆明细行 / 汇总指标
// ==========================================

use crate::domain::types::Category;
use serde::{Deserialize, Serialize, Serializer};

// ==========================================
// SummaryRow - 每个 manobrista 一行
// ==========================================
// 序列化字段名与导出表头一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "MATRICULA")]
    pub matricula: String,
    #[serde(rename = "MANOBRISTA")]
    pub manobrista: String,
    #[serde(rename = "EM SAIDA")]
    pub em_saida: u64,
    #[serde(rename = "PARQUEADOS")]
    pub parqueados: u64,
    /// 包含未分类状态的行，因此 >= em_saida + parqueados
    #[serde(rename = "TOTAL")]
    pub total: u64,
}

impl SummaryRow {
    pub fn new(matricula: impl Into<String>, manobrista: impl Into<String>) -> Self {
        Self {
            matricula: matricula.into(),
            manobrista: manobrista.into(),
            em_saida: 0,
            parqueados: 0,
            total: 0,
        }
    }

    /// 未落入任何桶的行数
    pub fn unclassified(&self) -> u64 {
        self.total.saturating_sub(self.em_saida + self.parqueados)
    }
}

// ==========================================
// VehicleDetailRow - 钻取明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VehicleDetailRow {
    #[serde(rename = "Chassi")]
    pub chassis: String,
    #[serde(rename = "Versão")]
    pub model_version: String,
    #[serde(rename = "Cor")]
    pub color: String,
    #[serde(rename = "Descrição")]
    pub description: String,
    /// 原始大小写
    #[serde(rename = "Status")]
    pub status: String,
    /// JSON 与 CSV 一致，输出本地化标签
    #[serde(rename = "Tipo", serialize_with = "serialize_tipo")]
    pub category: Option<Category>,
}

fn serialize_tipo<S: Serializer>(
    category: &Option<Category>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(category.map(|c| c.label()).unwrap_or(""))
}

impl VehicleDetailRow {
    /// Tipo 列的渲染；未分类为空串
    pub fn tipo_label(&self) -> &'static str {
        self.category.map(|c| c.label()).unwrap_or("")
    }
}

// ==========================================
// SummaryMetrics - 仪表盘指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_operators: usize,
    pub total_vehicles: u64,
    pub total_in_dispatch: u64,
    pub total_parked: u64,
    pub average_per_operator: f64,
}

// ==========================================
// DetailBreakdown - 单个 manobrista 的明细计数
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailBreakdown {
    pub total: usize,
    pub in_dispatch: usize,
    pub parked: usize,
    pub unclassified: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_row(status: &str, category: Option<Category>) -> VehicleDetailRow {
        VehicleDetailRow {
            chassis: "9BW001".to_string(),
            model_version: "GOL 1.0".to_string(),
            color: "BRANCO".to_string(),
            description: "ENTREGA".to_string(),
            status: status.to_string(),
            category,
        }
    }

    #[test]
    fn test_detail_row_json_uses_tipo_label() {
        let rows = vec![
            detail_row("Em Saída", Some(Category::InDispatch)),
            detail_row("Parqueado", Some(Category::Parked)),
            detail_row("Lavagem", None),
        ];

        let json = serde_json::to_value(&rows).unwrap();
        assert_eq!(json[0]["Tipo"], "EM SAÍDA");
        assert_eq!(json[1]["Tipo"], "PARQUEADO");
        assert_eq!(json[2]["Tipo"], "");
        assert_eq!(json[0]["Versão"], "GOL 1.0");
        assert_eq!(json[2]["Status"], "Lavagem");
    }

    #[test]
    fn test_summary_row_unclassified() {
        let row = SummaryRow {
            matricula: "1".to_string(),
            manobrista: "ANA".to_string(),
            em_saida: 2,
            parqueados: 1,
            total: 5,
        };
        assert_eq!(row.unclassified(), 2);
    }
}
