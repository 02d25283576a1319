// ==========================================
// JIT 窗口分配系统 - 导出层
// ==========================================
// 职责: 分配结果 → CSV / JSON 文件
// ==========================================

pub mod assignment_exporter;

pub use assignment_exporter::{AssignmentExporter, DisplayRow, ExportError, ExportFormat};
