// ==========================================
// JIT 窗口分配系统 - 订单导入器实现
// ==========================================
// 流程: 解析 → 列校验 → 映射（含时间标准化）→ 行级统计
// 并发: 多文件导入时每个文件一个 blocking 任务
// ==========================================

use crate::domain::order::Order;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::importer_trait::{FileParser, JitCallImporter};
use async_trait::async_trait;
use futures::future::join_all;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

// ==========================================
// ImportedOrders - 单文件导入结果
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct ImportedOrders {
    pub source: PathBuf,
    pub orders: Vec<Order>,
    pub missing_date: usize,   // 日期无法解析的行数
    pub missing_time: usize,   // 时间无法解析的行数
    pub missing_vendor: usize, // 供应商为空的行数
}

// ==========================================
// OrderImporter - 订单导入器
// ==========================================
#[derive(Clone)]
pub struct OrderImporter {
    file_parser: Arc<dyn FileParser>,
    field_mapper: Arc<FieldMapper>,
}

impl OrderImporter {
    pub fn new(file_parser: Arc<dyn FileParser>, field_mapper: Arc<FieldMapper>) -> Self {
        Self {
            file_parser,
            field_mapper,
        }
    }

    /// 同步导入（供 blocking 任务与测试调用）
    #[instrument(skip(self, file_path), fields(file = %file_path.display()))]
    pub fn import_blocking(&self, file_path: &Path) -> ImportResult<ImportedOrders> {
        let sheet = self.file_parser.parse(file_path)?;
        let columns = self
            .field_mapper
            .resolve_order_columns(&sheet.headers, &file_path.display().to_string())?;

        let orders: Vec<Order> = sheet
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.field_mapper.map_order(row, &columns, idx + 1))
            .collect();

        let missing_date = orders.iter().filter(|o| o.required_date.is_none()).count();
        let missing_time = orders.iter().filter(|o| o.required_time.is_none()).count();
        let missing_vendor = orders.iter().filter(|o| o.vendor.is_empty()).count();

        if missing_date + missing_time > 0 {
            warn!(missing_date, missing_time, "部分订单日期/时间无法解析，将标记为无日期");
        }
        info!(orders = orders.len(), "订单文件导入完成");

        Ok(ImportedOrders {
            source: file_path.to_path_buf(),
            orders,
            missing_date,
            missing_time,
            missing_vendor,
        })
    }
}

#[async_trait]
impl JitCallImporter for OrderImporter {
    async fn import_orders(&self, file_path: PathBuf) -> ImportResult<ImportedOrders> {
        let importer = self.clone();
        tokio::task::spawn_blocking(move || importer.import_blocking(&file_path))
            .await
            .map_err(|e| ImportError::TaskFailed(e.to_string()))?
    }

    async fn batch_import(
        &self,
        file_paths: Vec<PathBuf>,
    ) -> Vec<(PathBuf, Result<ImportedOrders, String>)> {
        let tasks = file_paths.into_iter().map(|path| async move {
            let result = self
                .import_orders(path.clone())
                .await
                .map_err(|e| e.to_string());
            if let Err(reason) = &result {
                warn!(file = %path.display(), error = %reason, "订单文件导入失败");
            }
            (path, result)
        });

        join_all(tasks).await
    }
}
