// ==========================================
// JIT 窗口分配系统 - 配置层
// ==========================================
// 职责: 列名映射、过期检查策略、输出语言
// 存储: JSON 配置文件
// ==========================================

pub mod app_config;
pub mod config_manager;

// 重导出核心配置类型
pub use app_config::{AppConfig, ColumnSpec, ElapsedCheck, OrderColumns, WindowColumns};
pub use config_manager::{default_config_path, ConfigError, ConfigManager};
