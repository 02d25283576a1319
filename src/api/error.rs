// ==========================================
// JIT 窗口分配系统 - API层错误类型
// ==========================================
// 职责: 汇总导入/配置/导出错误, 给出带原因的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::exporter::ExportError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("窗口计划导入失败: {0}")]
    ScheduleImport(#[source] ImportError),

    #[error("所有订单文件均导入失败: {}", .0.join("; "))]
    NoOrdersImported(Vec<String>),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("后台任务失败: {0}")]
    TaskFailed(String),
}

/// API层 Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
