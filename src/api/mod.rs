// ==========================================
// JIT 窗口分配系统 - API 层
// ==========================================
// 职责: 对外业务接口（CLI 等调用方只依赖这一层）
// ==========================================

pub mod assignment_api;
pub mod error;

pub use assignment_api::{AssignmentApi, AssignmentRequest, AssignmentRun, FileAssignment};
pub use error::{ApiError, ApiResult};
