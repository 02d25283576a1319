// ==========================================
// JIT 窗口分配系统 - 导入接口 Trait
// ==========================================
// 职责: 定义文件解析与订单导入接口（不包含实现）
// ==========================================

use crate::importer::error::ImportResult;
use crate::importer::file_parser::ParsedSheet;
use crate::importer::order_importer::ImportedOrders;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为表头 + 原始行记录
    ///
    /// # 返回
    /// - Ok(ParsedSheet): 表头已 TRIM，全空行已跳过
    /// - Err: 文件不存在、格式不支持、读取失败
    fn parse(&self, file_path: &Path) -> ImportResult<ParsedSheet>;
}

// ==========================================
// JitCallImporter Trait
// ==========================================
// 实现者: OrderImporter
#[async_trait]
pub trait JitCallImporter: Send + Sync {
    /// 导入单个订单文件
    ///
    /// # 返回
    /// - Ok(ImportedOrders): 订单列表 + 行级统计
    /// - Err: 文件级错误（文件/格式/必需列缺失）
    async fn import_orders(&self, file_path: PathBuf) -> ImportResult<ImportedOrders>;

    /// 批量导入多个订单文件（并发执行）
    ///
    /// # 说明
    /// - 每个文件的导入互相独立
    /// - 某个文件失败不影响其他文件，失败原因以字符串返回
    /// - 返回顺序与输入顺序一致
    async fn batch_import(
        &self,
        file_paths: Vec<PathBuf>,
    ) -> Vec<(PathBuf, Result<ImportedOrders, String>)>;
}
