// ==========================================
// manobrista 产能报表 - 报表 API
// ==========================================
// 职责: 上传处理（聚合 + 可选过滤）、明细钻取、导出
// 会话: 每个 ReportApi 持有一个 ReportSession；新上传覆盖旧数据
// ==========================================

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::app::session::ReportSession;
use crate::config::AppConfig;
use crate::domain::record::RawTable;
use crate::domain::report::{DetailBreakdown, SummaryMetrics, SummaryRow, VehicleDetailRow};
use crate::engine::{
    detail_breakdown, operator_choices, summary_metrics, RegistryFilter, ThirdPartyFilter,
};
use crate::exporter;
use crate::importer::SourceFailure;
use crate::repository::EmployeeRegistry;

/// 汇总过滤选项
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// 排除外包 manobrista（按关键词）
    pub exclude_third_party: bool,
    /// 只保留已登记的在职员工
    pub only_registered: bool,
}

/// 过滤执行情况
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FiltersApplied {
    pub third_party_removed: usize,
    /// 登记过滤是否生效（无人登记时不生效）
    pub registry_applied: bool,
    pub registry_removed: usize,
}

/// 一次上传的处理结果
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    pub summary: Vec<SummaryRow>,
    pub metrics: SummaryMetrics,
    pub filters_applied: FiltersApplied,
    pub failures: Vec<SourceFailure>,
}

/// 单个 manobrista 的明细
#[derive(Debug, Clone, Serialize)]
pub struct VehicleDetailReport {
    pub operator: String,
    pub rows: Vec<VehicleDetailRow>,
    pub breakdown: DetailBreakdown,
}

// ==========================================
// ReportApi
// ==========================================
pub struct ReportApi {
    employees: Arc<EmployeeRegistry>,
    third_party: ThirdPartyFilter,
    session: ReportSession,
}

impl ReportApi {
    pub fn new(config: &AppConfig, employees: Arc<EmployeeRegistry>) -> Self {
        Self {
            employees,
            third_party: ThirdPartyFilter::new(&config.third_party_keywords),
            session: ReportSession::new(&config.keywords, config.has_headers),
        }
    }

    pub fn session(&self) -> &ReportSession {
        &self.session
    }

    /// 处理一批上传文件
    ///
    /// # 返回
    /// - Ok(ReportOutcome): 至少一个源成功
    /// - Err(ApiError::Import): 没有可用的源
    #[instrument(skip(self, file_paths), fields(files = file_paths.len()))]
    pub fn process_files<P: AsRef<Path>>(
        &mut self,
        file_paths: &[P],
        options: ReportOptions,
    ) -> ApiResult<ReportOutcome> {
        if file_paths.is_empty() {
            return Err(ApiError::InvalidInput("nenhum arquivo informado".to_string()));
        }
        self.session.load_sources(file_paths)?;
        self.finish(options)
    }

    /// 处理内存中的表格（规则同 process_files）
    pub fn process_tables(
        &mut self,
        tables: &[RawTable],
        options: ReportOptions,
    ) -> ApiResult<ReportOutcome> {
        self.session.load_tables(tables)?;
        self.finish(options)
    }

    fn finish(&mut self, options: ReportOptions) -> ApiResult<ReportOutcome> {
        let mut rows = self.session.summary().to_vec();
        let mut filters_applied = FiltersApplied::default();

        if options.exclude_third_party {
            let outcome = self.third_party.apply(rows);
            filters_applied.third_party_removed = outcome.removed;
            rows = outcome.rows;
        }

        if options.only_registered {
            let snapshot = self.employees.snapshot()?;
            let outcome = RegistryFilter::new(&snapshot).apply(rows);
            filters_applied.registry_applied = outcome.applied;
            filters_applied.registry_removed = outcome.removed;
            rows = outcome.rows;
        }

        self.session.replace_summary(rows.clone());
        let metrics = summary_metrics(&rows);
        info!(
            operators = metrics.total_operators,
            vehicles = metrics.total_vehicles,
            "报表处理完成"
        );

        Ok(ReportOutcome {
            summary: rows,
            metrics,
            filters_applied,
            failures: self.session.failures().to_vec(),
        })
    }

    /// 当前汇总
    pub fn summary(&self) -> ApiResult<&[SummaryRow]> {
        if !self.session.has_data() {
            return Err(ApiError::NoSessionData);
        }
        Ok(self.session.summary())
    }

    /// 明细钻取的候选 manobrista（去重、排序）
    pub fn operator_choices(&self) -> ApiResult<Vec<String>> {
        Ok(operator_choices(self.summary()?))
    }

    /// 所选 manobrista 的车辆明细
    #[instrument(skip(self))]
    pub fn vehicle_detail(&self, operator: &str) -> ApiResult<VehicleDetailReport> {
        if operator.trim().is_empty() {
            return Err(ApiError::InvalidInput("manobrista não informado".to_string()));
        }
        let rows = self
            .session
            .detail(operator)
            .ok_or(ApiError::NoSessionData)?;

        Ok(VehicleDetailReport {
            operator: operator.trim().to_uppercase(),
            breakdown: detail_breakdown(&rows),
            rows,
        })
    }

    pub fn export_summary_csv<P: AsRef<Path>>(&self, path: P) -> ApiResult<()> {
        exporter::export_summary_file(self.summary()?, path.as_ref())?;
        info!(path = %path.as_ref().display(), "汇总表已导出");
        Ok(())
    }

    pub fn export_detail_csv<P: AsRef<Path>>(&self, operator: &str, path: P) -> ApiResult<()> {
        let report = self.vehicle_detail(operator)?;
        exporter::export_detail_file(&report.rows, path.as_ref())?;
        info!(path = %path.as_ref().display(), rows = report.rows.len(), "明细表已导出");
        Ok(())
    }

    pub fn write_summary_json<W: Write>(&self, writer: W) -> ApiResult<()> {
        exporter::write_json(self.summary()?, writer)?;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }
}
