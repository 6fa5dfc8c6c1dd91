// ==========================================
// manobrista 产能报表 - 报表会话
// ==========================================
// 职责: 持有一次上传对应的全部中间结果
//       （保留的完整记录、汇总表、失败源）
// 生命周期: 每次上传新文件先 reset，再加载
// ==========================================

use crate::config::KeywordConfig;
use crate::domain::record::{RawTable, RecordSet};
use crate::domain::report::{SummaryRow, VehicleDetailRow};
use crate::engine::{AggregationEngine, DetailExtractor, StatusClassifier};
use crate::importer::{ImportResult, IngestOutcome, SourceFailure, SourceLoader};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{info, instrument};
use uuid::Uuid;

pub struct ReportSession {
    id: Uuid,
    created_at: DateTime<Utc>,
    loaded_at: Option<DateTime<Utc>>,
    classifier: StatusClassifier,
    loader: SourceLoader,
    record_sets: Vec<RecordSet>,
    summary: Vec<SummaryRow>,
    failures: Vec<SourceFailure>,
}

impl ReportSession {
    pub fn new(keywords: &KeywordConfig, has_headers: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            loaded_at: None,
            classifier: StatusClassifier::new(keywords),
            loader: SourceLoader::new(has_headers),
            record_sets: Vec::new(),
            summary: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// 最近一次成功加载的时间
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn classifier(&self) -> &StatusClassifier {
        &self.classifier
    }

    /// 清空上一次上传的全部结果
    pub fn reset(&mut self) {
        self.loaded_at = None;
        self.record_sets.clear();
        self.summary.clear();
        self.failures.clear();
    }

    /// 加载一批文件并聚合
    ///
    /// 全部源失败时返回 NoUsableSource，会话保持为空
    #[instrument(skip(self, file_paths), fields(session = %self.id, files = file_paths.len()))]
    pub fn load_sources<P: AsRef<Path>>(&mut self, file_paths: &[P]) -> ImportResult<&[SummaryRow]> {
        self.reset();
        let outcome = self.loader.ingest_sources(file_paths)?;
        Ok(self.absorb(outcome))
    }

    /// 加载内存中的表格并聚合（规则同 load_sources）
    pub fn load_tables(&mut self, tables: &[RawTable]) -> ImportResult<&[SummaryRow]> {
        self.reset();
        let outcome = self.loader.ingest_tables(tables)?;
        Ok(self.absorb(outcome))
    }

    fn absorb(&mut self, outcome: IngestOutcome) -> &[SummaryRow] {
        let normalized = outcome.normalized_sets();
        self.summary = AggregationEngine::new(&self.classifier).aggregate(&normalized);
        self.record_sets = outcome.record_sets();
        self.failures = outcome.failures;
        self.loaded_at = Some(Utc::now());

        info!(
            operators = self.summary.len(),
            sources = self.record_sets.len(),
            failures = self.failures.len(),
            "会话数据已加载"
        );
        &self.summary
    }

    /// 以过滤后的汇总替换当前汇总（只允许删行）
    pub fn replace_summary(&mut self, rows: Vec<SummaryRow>) {
        self.summary = rows;
    }

    pub fn has_data(&self) -> bool {
        !self.record_sets.is_empty()
    }

    pub fn summary(&self) -> &[SummaryRow] {
        &self.summary
    }

    pub fn record_sets(&self) -> &[RecordSet] {
        &self.record_sets
    }

    pub fn failures(&self) -> &[SourceFailure] {
        &self.failures
    }

    /// 所选 manobrista 的车辆明细
    ///
    /// # 返回
    /// - None: 会话中尚无数据
    /// - Some(rows): 匹配结果（可能为空）
    pub fn detail(&self, operator: &str) -> Option<Vec<VehicleDetailRow>> {
        if !self.has_data() {
            return None;
        }
        Some(DetailExtractor::new(&self.classifier).extract(operator, &self.record_sets))
    }
}
