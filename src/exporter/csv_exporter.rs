// ==========================================
// manobrista 产能报表 - 导出器
// ==========================================
// 汇总表头: MATRICULA,MANOBRISTA,EM SAIDA,PARQUEADOS,TOTAL
// 明细表头: Chassi,Versão,Cor,Descrição,Status,Tipo
// ==========================================

use crate::domain::report::{SummaryRow, VehicleDetailRow};
use csv::WriterBuilder;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use thiserror::Error;

pub const SUMMARY_HEADERS: [&str; 5] = ["MATRICULA", "MANOBRISTA", "EM SAIDA", "PARQUEADOS", "TOTAL"];
pub const DETAIL_HEADERS: [&str; 6] = ["Chassi", "Versão", "Cor", "Descrição", "Status", "Tipo"];

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("导出写入失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 导出失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON 导出失败: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// 汇总表写为分隔文本
pub fn write_summary_csv<W: Write>(rows: &[SummaryRow], writer: W) -> ExportResult<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(SUMMARY_HEADERS)?;
    for row in rows {
        let em_saida = row.em_saida.to_string();
        let parqueados = row.parqueados.to_string();
        let total = row.total.to_string();
        csv_writer.write_record([
            row.matricula.as_str(),
            row.manobrista.as_str(),
            em_saida.as_str(),
            parqueados.as_str(),
            total.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// 明细表写为分隔文本；Tipo 为本地化标签
pub fn write_detail_csv<W: Write>(rows: &[VehicleDetailRow], writer: W) -> ExportResult<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    csv_writer.write_record(DETAIL_HEADERS)?;
    for row in rows {
        csv_writer.write_record([
            row.chassis.as_str(),
            row.model_version.as_str(),
            row.color.as_str(),
            row.description.as_str(),
            row.status.as_str(),
            row.tipo_label(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// 创建导出文件（上级目录不存在时一并创建）
fn create_output(path: &Path) -> ExportResult<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}

pub fn export_summary_file<P: AsRef<Path>>(rows: &[SummaryRow], path: P) -> ExportResult<()> {
    write_summary_csv(rows, create_output(path.as_ref())?)
}

pub fn export_detail_file<P: AsRef<Path>>(rows: &[VehicleDetailRow], path: P) -> ExportResult<()> {
    write_detail_csv(rows, create_output(path.as_ref())?)
}

/// 任意可序列化结果写为格式化 JSON
pub fn write_json<T: serde::Serialize + ?Sized, W: Write>(value: &T, writer: W) -> ExportResult<()> {
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Category;

    #[test]
    fn test_summary_csv_headers_and_rows() {
        let rows = vec![SummaryRow {
            matricula: "111".into(),
            manobrista: "ANA".into(),
            em_saida: 1,
            parqueados: 1,
            total: 2,
        }];
        let mut buffer = Vec::new();
        write_summary_csv(&rows, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(
            text,
            "MATRICULA,MANOBRISTA,EM SAIDA,PARQUEADOS,TOTAL\n111,ANA,1,1,2\n"
        );
    }

    #[test]
    fn test_empty_summary_still_has_headers() {
        let mut buffer = Vec::new();
        write_summary_csv(&[], &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "MATRICULA,MANOBRISTA,EM SAIDA,PARQUEADOS,TOTAL\n"
        );
    }

    #[test]
    fn test_detail_csv_tipo_labels() {
        let rows = vec![
            VehicleDetailRow {
                chassis: "9BW".into(),
                model_version: "POLO TSI".into(),
                color: "PRATA".into(),
                description: "Lote, 3".into(),
                status: "Em Saída".into(),
                category: Some(Category::InDispatch),
            },
            VehicleDetailRow {
                chassis: "9BX".into(),
                model_version: String::new(),
                color: String::new(),
                description: String::new(),
                status: "Lavagem".into(),
                category: None,
            },
        ];
        let mut buffer = Vec::new();
        write_detail_csv(&rows, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Chassi,Versão,Cor,Descrição,Status,Tipo");
        assert_eq!(lines[1], "9BW,POLO TSI,PRATA,\"Lote, 3\",Em Saída,EM SAÍDA");
        assert_eq!(lines[2], "9BX,,,,Lavagem,");
    }

    #[test]
    fn test_json_uses_export_names() {
        let rows = vec![SummaryRow::new("1", "ANA")];
        let mut buffer = Vec::new();
        write_json(&rows, &mut buffer).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value[0]["EM SAIDA"], 0);
        assert_eq!(value[0]["MANOBRISTA"], "ANA");
    }
}
