// ==========================================
// manobrista 产能报表 - 输入源加载器
// ==========================================
// 职责: 整合导入流程，从文件到聚合输入
// 流程: 解析 → 列解析 → 清洗（约简 + 保留完整行）
// 多源: 每个源独立成败；全部失败时整体失败
// ==========================================

use crate::domain::record::{NormalizedRow, RawTable, RecordSet};
use crate::importer::column_resolver::ColumnResolver;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::RecordNormalizer;
use serde::Serialize;
use std::path::Path;
use tracing::{error, info, instrument, warn};

/// 单个源加载成功的结果
#[derive(Debug, Clone)]
pub struct LoadedSource {
    /// 明细钻取用的完整记录
    pub record_set: RecordSet,
    /// 聚合用的约简行
    pub normalized: Vec<NormalizedRow>,
}

/// 单个源的失败记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub source: String,
    pub message: String,
}

/// 多源加载结果（允许部分成功）
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub sources: Vec<LoadedSource>,
    pub failures: Vec<SourceFailure>,
}

impl IngestOutcome {
    /// 按输入顺序取出各源的约简行
    pub fn normalized_sets(&self) -> Vec<Vec<NormalizedRow>> {
        self.sources.iter().map(|s| s.normalized.clone()).collect()
    }

    pub fn record_sets(&self) -> Vec<RecordSet> {
        self.sources.iter().map(|s| s.record_set.clone()).collect()
    }
}

// ==========================================
// SourceLoader
// ==========================================
pub struct SourceLoader {
    parser: UniversalFileParser,
    resolver: ColumnResolver,
    cleaner: DataCleaner,
}

impl Default for SourceLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SourceLoader {
    /// # 参数
    /// - has_headers: 第一行是否为表头
    pub fn new(has_headers: bool) -> Self {
        Self {
            parser: UniversalFileParser::new(has_headers),
            resolver: ColumnResolver::new(),
            cleaner: DataCleaner,
        }
    }

    /// 加载一个已在内存中的表格
    pub fn load_table(&self, table: &RawTable) -> ImportResult<LoadedSource> {
        let column_map = self.resolver.resolve_table(table)?;
        for (field, column) in column_map.iter() {
            if column.is_fallback() {
                info!(source = %table.source, field = %field, index = column.index(), "列按固定位置解析");
            }
        }

        let normalized = self.cleaner.normalize(table, &column_map);
        let record_set = self.cleaner.retain_full(table, &column_map);

        Ok(LoadedSource {
            record_set,
            normalized,
        })
    }

    /// 加载一个文件
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn load_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<LoadedSource> {
        let table = self.parser.parse(file_path.as_ref())?;
        let loaded = self.load_table(&table)?;
        info!(
            rows = table.rows.len(),
            normalized = loaded.normalized.len(),
            "输入源加载完成"
        );
        Ok(loaded)
    }

    /// 批量加载多个文件
    ///
    /// # 返回
    /// - Ok(IngestOutcome): 至少一个源成功；失败的源记录在 failures
    /// - Err(NoUsableSource): 所有源均失败（或没有输入）
    pub fn ingest_sources<P: AsRef<Path>>(&self, file_paths: &[P]) -> ImportResult<IngestOutcome> {
        let mut outcome = IngestOutcome::default();

        for path in file_paths {
            let path = path.as_ref();
            match self.load_file(path) {
                Ok(loaded) => outcome.sources.push(loaded),
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "输入源加载失败，跳过");
                    outcome.failures.push(SourceFailure {
                        source: path.display().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Self::require_any(outcome)
    }

    /// 批量加载内存中的表格（规则同 ingest_sources）
    pub fn ingest_tables(&self, tables: &[RawTable]) -> ImportResult<IngestOutcome> {
        let mut outcome = IngestOutcome::default();

        for table in tables {
            match self.load_table(table) {
                Ok(loaded) => outcome.sources.push(loaded),
                Err(e) => {
                    warn!(source = %table.source, error = %e, "输入源加载失败，跳过");
                    outcome.failures.push(SourceFailure {
                        source: table.source.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Self::require_any(outcome)
    }

    fn require_any(outcome: IngestOutcome) -> ImportResult<IngestOutcome> {
        if outcome.sources.is_empty() {
            error!(failures = outcome.failures.len(), "没有可用的输入源");
            return Err(ImportError::NoUsableSource {
                failures: outcome.failures.len(),
            });
        }
        Ok(outcome)
    }
}
