// ==========================================
// manobrista 产能报表 - 导出层
// ==========================================
// 职责: 汇总表 / 明细表写为 CSV 或 JSON
// ==========================================

pub mod csv_exporter;

pub use csv_exporter::{
    export_detail_file, export_summary_file, write_detail_csv, write_json, write_summary_csv,
    ExportError, ExportResult, DETAIL_HEADERS, SUMMARY_HEADERS,
};
