// ==========================================
// JIT 窗口分配系统 - 收货窗口领域模型
// ==========================================
// 职责: 供应商周计划中的一行窗口定义
// 红线: 同一供应商/星期的窗口按输入顺序保存，首个命中者胜出
// ==========================================

use crate::domain::types::Weekday;
use serde::{Deserialize, Serialize};

// ==========================================
// WindowDefinition - 窗口定义
// ==========================================
// start_fraction > end_fraction 表示跨零点窗口（挂在开始那一天）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowDefinition {
    pub vendor: String,                  // 供应商
    pub weekday: Option<Weekday>,        // 星期（无法识别 → None，永不命中）
    pub window_name: String,             // 窗口显示名
    pub start_fraction: Option<f64>,     // 开始时刻（一天的比例，[0,1)）
    pub end_fraction: Option<f64>,       // 结束时刻（一天的比例，[0,1)）
    pub row_number: usize,               // 源文件行号
}

impl WindowDefinition {
    pub fn new(
        vendor: impl Into<String>,
        weekday: Weekday,
        window_name: impl Into<String>,
        start_fraction: f64,
        end_fraction: f64,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            weekday: Some(weekday),
            window_name: window_name.into(),
            start_fraction: Some(start_fraction),
            end_fraction: Some(end_fraction),
            row_number: 0,
        }
    }

    /// 两个边界都可用时返回 (start, end)
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.start_fraction.zip(self.end_fraction)
    }
}
