// ==========================================
// manobrista 产能报表 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xls，仅第一个工作表) / CSV (.csv)
// ==========================================

use crate::domain::record::RawTable;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::{debug, instrument};

/// 检查文件存在与扩展名
fn check_source(path: &Path, allowed: &[&str]) -> ImportResult<String> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !allowed.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }

    Ok(path.display().to_string())
}

/// 拆分表头与数据行，并跳过完全空白的行
fn build_table(source: String, mut rows: Vec<Vec<String>>, has_headers: bool) -> RawTable {
    rows.retain(|row| row.iter().any(|cell| !cell.is_empty()));

    let headers = if has_headers && !rows.is_empty() {
        rows.remove(0)
    } else {
        Vec::new()
    };

    debug!(source = %source, columns = headers.len(), rows = rows.len(), "表格读取完成");
    RawTable::new(source, headers, rows)
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser {
    pub has_headers: bool,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self { has_headers: true }
    }
}

impl FileParser for CsvParser {
    #[instrument(skip(self))]
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let source = check_source(file_path, &["csv"])?;

        let file = File::open(file_path).map_err(|e| ImportError::source_read(&source, e))?;
        // 表头也按普通行读取，由 build_table 统一处理
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| ImportError::source_read(&source, e))?;
            rows.push(record.iter().map(|v| v.trim().to_string()).collect());
        }

        Ok(build_table(source, rows, self.has_headers))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser {
    pub has_headers: bool,
}

impl Default for ExcelParser {
    fn default() -> Self {
        Self { has_headers: true }
    }
}

impl FileParser for ExcelParser {
    #[instrument(skip(self))]
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let source = check_source(file_path, &["xlsx", "xls"])?;

        let mut workbook =
            open_workbook_auto(file_path).map_err(|e| ImportError::source_read(&source, e))?;

        // 只读第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::source_read(&source, "Excel 文件无工作表"))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::source_read(&source, e))?;

        let rows = range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string().trim().to_string()).collect())
            .collect();

        Ok(build_table(source, rows, self.has_headers))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser {
    pub has_headers: bool,
}

impl Default for UniversalFileParser {
    fn default() -> Self {
        Self { has_headers: true }
    }
}

impl UniversalFileParser {
    pub fn new(has_headers: bool) -> Self {
        Self { has_headers }
    }

    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser {
                has_headers: self.has_headers,
            }
            .parse_to_table(path),
            "xlsx" | "xls" => ExcelParser {
                has_headers: self.has_headers,
            }
            .parse_to_table(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_with_suffix(suffix: &str) -> tempfile::NamedTempFile {
        Builder::new().suffix(suffix).tempfile().unwrap()
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let mut temp_file = temp_with_suffix(".csv");
        writeln!(temp_file, "Chassi,Status,Manobrista").unwrap();
        writeln!(temp_file, "9BW001, Em Saída ,111 - ana").unwrap();
        writeln!(temp_file, "9BW002,Parqueado,222 - BIA").unwrap();

        let table = CsvParser::default()
            .parse_to_table(temp_file.path())
            .unwrap();

        assert_eq!(table.headers, vec!["Chassi", "Status", "Manobrista"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1], "Em Saída");
    }

    #[test]
    fn test_csv_parser_without_headers() {
        let mut temp_file = temp_with_suffix(".csv");
        writeln!(temp_file, "a,b,c").unwrap();
        writeln!(temp_file, "d,e").unwrap();

        let table = CsvParser { has_headers: false }
            .parse_to_table(temp_file.path())
            .unwrap();

        assert!(table.headers.is_empty());
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.width(), 3);
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser::default().parse_to_table(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let mut temp_file = temp_with_suffix(".csv");
        writeln!(temp_file, "Status,Manobrista").unwrap();
        writeln!(temp_file, "PARQUEADO,ANA").unwrap();
        writeln!(temp_file, ",").unwrap();
        writeln!(temp_file, "SAIDA,BIA").unwrap();

        let table = CsvParser::default()
            .parse_to_table(temp_file.path())
            .unwrap();

        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_excel_parser_corrupt_file() {
        let mut temp_file = temp_with_suffix(".xlsx");
        temp_file.write_all(b"isto nao e uma planilha").unwrap();

        let result = ExcelParser::default().parse_to_table(temp_file.path());
        assert!(matches!(result, Err(ImportError::SourceReadError { .. })));
    }

    #[test]
    fn test_universal_parser_unsupported_format() {
        let temp_file = temp_with_suffix(".txt");
        let result = UniversalFileParser::default().parse(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
