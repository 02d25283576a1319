// ==========================================
// JIT 窗口分配系统 - 分配 API
// ==========================================
// 职责: 串联 配置 → 窗口计划导入 → 订单导入 → 批次分配 → 导出
// 红线: 参考时刻在一次运行开始时解析一次, 所有文件/订单共用
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{AppConfig, ElapsedCheck};
use crate::domain::assignment::{AssignmentRecord, AssignmentSummary};
use crate::engine::AssignmentEngine;
use crate::exporter::AssignmentExporter;
use crate::importer::{
    FieldMapper, FileParser, ImportedOrders, ImportedSchedule, JitCallImporter, OrderImporter,
    ScheduleImporter, UniversalFileParser,
};
use chrono::NaiveDateTime;
use futures::future::join_all;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// 请求 / 结果
// ==========================================

/// 一次分配运行的请求
#[derive(Debug, Clone)]
pub struct AssignmentRequest {
    pub schedule: PathBuf,
    pub orders: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    /// 覆盖配置中的过期检查策略
    pub elapsed_check: Option<ElapsedCheck>,
}

/// 单个订单文件的分配结果
#[derive(Debug, Clone, Serialize)]
pub struct FileAssignment {
    pub source: PathBuf,
    pub records: Vec<AssignmentRecord>,
    pub summary: AssignmentSummary,
}

/// 一次运行的结果
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentRun {
    pub run_id: String,
    pub reference_time: Option<NaiveDateTime>,
    pub files: Vec<FileAssignment>,
    pub failed_files: Vec<(PathBuf, String)>,
    pub summary: AssignmentSummary,
}

impl AssignmentRun {
    /// 所有文件的记录（按文件顺序拼接）
    pub fn records(&self) -> Vec<AssignmentRecord> {
        self.files
            .iter()
            .flat_map(|f| f.records.iter().cloned())
            .collect()
    }
}

// ==========================================
// AssignmentApi
// ==========================================
pub struct AssignmentApi {
    config: AppConfig,
    order_importer: OrderImporter,
    schedule_importer: ScheduleImporter,
}

impl AssignmentApi {
    pub fn new(config: AppConfig) -> Self {
        Self::with_parser(config, Arc::new(UniversalFileParser))
    }

    /// 指定文件解析器（测试可注入）
    pub fn with_parser(config: AppConfig, parser: Arc<dyn FileParser>) -> Self {
        let mapper = Arc::new(FieldMapper::new(
            config.order_columns.clone(),
            config.window_columns.clone(),
        ));
        Self {
            order_importer: OrderImporter::new(parser.clone(), mapper.clone()),
            schedule_importer: ScheduleImporter::new(parser, mapper),
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 导入窗口计划
    pub fn load_schedule(&self, path: &Path) -> ApiResult<ImportedSchedule> {
        self.schedule_importer
            .import(path)
            .map_err(ApiError::ScheduleImport)
    }

    /// 执行一次分配运行
    ///
    /// # 流程
    /// 1. 导入窗口计划（失败则整体失败）
    /// 2. 解析参考时刻（仅一次）
    /// 3. 并发导入订单文件（单文件失败不影响其他文件）
    /// 4. 每个文件在独立 blocking 任务中分配
    /// 5. 可选导出
    #[instrument(skip(self, request), fields(run_id = tracing::field::Empty))]
    pub async fn run(&self, request: AssignmentRequest) -> ApiResult<AssignmentRun> {
        if request.orders.is_empty() {
            return Err(ApiError::InvalidInput("未指定订单文件".to_string()));
        }

        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        let imported = self.load_schedule(&request.schedule)?;
        let engine = AssignmentEngine::new(Arc::new(imported.schedule));

        let policy = request.elapsed_check.unwrap_or(self.config.elapsed_check);
        let reference_time = policy.resolve();
        info!(
            run_id = %run_id,
            reference_time = ?reference_time,
            files = request.orders.len(),
            "开始分配运行"
        );

        let mut imported_files = Vec::new();
        let mut failed_files = Vec::new();
        for (path, result) in self.order_importer.batch_import(request.orders).await {
            match result {
                Ok(orders) => imported_files.push(orders),
                Err(reason) => failed_files.push((path, reason)),
            }
        }

        if imported_files.is_empty() {
            let reasons = failed_files
                .iter()
                .map(|(p, r)| format!("{}: {}", p.display(), r))
                .collect();
            return Err(ApiError::NoOrdersImported(reasons));
        }

        let files = Self::assign_files(&engine, imported_files, reference_time).await?;
        let records: Vec<AssignmentRecord> = files
            .iter()
            .flat_map(|f| f.records.iter().cloned())
            .collect();
        let summary = AssignmentSummary::from_records(&records);

        if let Some(output) = &request.output {
            AssignmentExporter::new(self.config.locale.clone()).export_to_file(&records, output)?;
        }
        if !failed_files.is_empty() {
            warn!(failed = failed_files.len(), "部分订单文件导入失败");
        }
        info!(
            run_id = %run_id,
            total = summary.total,
            matched = summary.matched,
            no_date = summary.no_date,
            out_of_window = summary.out_of_window,
            "分配运行完成"
        );

        Ok(AssignmentRun {
            run_id,
            reference_time,
            files,
            failed_files,
            summary,
        })
    }

    /// 各文件并发分配（共享窗口表与参考时刻）
    async fn assign_files(
        engine: &AssignmentEngine,
        imported_files: Vec<ImportedOrders>,
        reference_time: Option<NaiveDateTime>,
    ) -> ApiResult<Vec<FileAssignment>> {
        let tasks = imported_files.into_iter().map(|imported| {
            let engine = engine.clone();
            tokio::task::spawn_blocking(move || {
                let records = engine.assign_batch(&imported.orders, reference_time);
                let summary = AssignmentSummary::from_records(&records);
                FileAssignment {
                    source: imported.source,
                    records,
                    summary,
                }
            })
        });

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.map_err(|e| ApiError::TaskFailed(e.to_string())))
            .collect()
    }
}
