// ==========================================
// JIT 窗口分配系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含文件读取逻辑, 不含匹配逻辑
// ==========================================

pub mod assignment;
pub mod order;
pub mod types;
pub mod window;

// 重导出核心类型
pub use assignment::{AssignmentOutcome, AssignmentRecord, AssignmentSummary};
pub use order::Order;
pub use types::{CellValue, UnknownWeekday, Weekday, WindowAssignment};
pub use window::WindowDefinition;
