// ==========================================
// manobrista 产能报表 - 导入层
// ==========================================
// 职责: 外部表格导入,生成聚合输入与明细保留集
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod column_resolver;
pub mod data_cleaner;
pub mod error;
pub mod file_parser;
pub mod importer_trait;
pub mod source_loader;

// 重导出核心类型
pub use column_resolver::ColumnResolver;
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use source_loader::{IngestOutcome, LoadedSource, SourceFailure, SourceLoader};

// 重导出 Trait 接口
pub use importer_trait::{FileParser, RecordNormalizer};
