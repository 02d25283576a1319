// ==========================================
// JIT 窗口分配系统 - 核心库
// ==========================================
// 职责: 按供应商周计划为 JIT Call 订单分配收货时间窗
// 技术栈: Rust + calamine/csv + chrono
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 时间标准化与窗口匹配
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 结果文件
pub mod exporter;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AssignmentOutcome, AssignmentRecord, AssignmentSummary, CellValue, Order, Weekday,
    WindowAssignment, WindowDefinition,
};

// 引擎
pub use engine::{assign_window, AssignmentEngine, WindowMatcher, WindowSchedule};

// API
pub use api::{AssignmentApi, AssignmentRequest, AssignmentRun};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "JIT Call 收货窗口分配系统";
