// ==========================================
// JIT 窗口分配系统 - 配置项定义
// ==========================================
// 职责: 列名映射、过期检查策略、输出语言等配置结构
// 存储: JSON 文件（见 ConfigManager）
// ==========================================

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// ColumnSpec - 单列映射（主列名 + 别名）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl ColumnSpec {
    pub fn new(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// 主列名 + 别名（按优先级）
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

// ==========================================
// OrderColumns - 订单文件列映射
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderColumns {
    pub id: ColumnSpec,
    pub vendor: ColumnSpec,
    pub required_date: ColumnSpec,
    pub required_time: ColumnSpec,
}

impl Default for OrderColumns {
    fn default() -> Self {
        Self {
            id: ColumnSpec::new("JIT Call No", &["JIT Call", "Order", "Orden"]),
            vendor: ColumnSpec::new("Vendor", &["Proveedor", "Supplier"]),
            required_date: ColumnSpec::new("Require Date", &["Required Date", "Fecha"]),
            required_time: ColumnSpec::new("Require Time", &["Required Time", "Hora"]),
        }
    }
}

// ==========================================
// WindowColumns - 窗口计划文件列映射
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowColumns {
    pub vendor: ColumnSpec,
    pub weekday: ColumnSpec,
    pub window_name: ColumnSpec,
    pub start_time: ColumnSpec,
    pub end_time: ColumnSpec,
}

impl Default for WindowColumns {
    fn default() -> Self {
        Self {
            vendor: ColumnSpec::new("Vendor", &["Proveedor", "Supplier"]),
            weekday: ColumnSpec::new("Day", &["Dia", "Día", "Weekday"]),
            window_name: ColumnSpec::new("Ventana", &["Window"]),
            start_time: ColumnSpec::new("Init Time", &["Start Time", "Inicio"]),
            end_time: ColumnSpec::new("Fin Time", &["End Time", "Fin"]),
        }
    }
}

// ==========================================
// ElapsedCheck - "已过期"检查策略
// ==========================================
// 序列化: {"mode": "disabled"} / {"mode": "system_clock"} /
//         {"mode": "fixed", "at": "2025-01-06T08:00:00"}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "at", rename_all = "snake_case")]
pub enum ElapsedCheck {
    #[default]
    Disabled,
    SystemClock,
    Fixed(NaiveDateTime),
}

impl ElapsedCheck {
    /// 解析为批次参考时刻
    ///
    /// 每个批次只能调用一次，结果在批内共享
    pub fn resolve(&self) -> Option<NaiveDateTime> {
        match self {
            ElapsedCheck::Disabled => None,
            ElapsedCheck::SystemClock => Some(Local::now().naive_local()),
            ElapsedCheck::Fixed(at) => Some(*at),
        }
    }
}

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub order_columns: OrderColumns,
    pub window_columns: WindowColumns,
    pub elapsed_check: ElapsedCheck,
    pub locale: String,        // 输出标签语言（en / es / zh-CN）
    pub preview_rows: usize,   // CLI 预览行数
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            order_columns: OrderColumns::default(),
            window_columns: WindowColumns::default(),
            elapsed_check: ElapsedCheck::default(),
            locale: "en".to_string(),
            preview_rows: 20,
        }
    }
}
