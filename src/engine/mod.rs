// ==========================================
// JIT 窗口分配系统 - 引擎层
// ==========================================
// 职责: 时间标准化 + 窗口匹配 + 批次分配
// 红线: 引擎不读文件、不读配置, 纯计算, 从不报错
// ==========================================

pub mod assignment_engine;
pub mod time_normalizer;
pub mod window_matcher;

// 重导出核心引擎
pub use assignment_engine::AssignmentEngine;
pub use time_normalizer::{
    combine_date_time, decimal_fraction_of_day, hour_fraction, normalize_time_of_day,
    previous_weekday, required_timestamp, weekday_name,
};
pub use window_matcher::{assign_window, WindowMatcher, WindowSchedule};
