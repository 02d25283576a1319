// ==========================================
// JIT 窗口分配系统 - 分配结果模型
// ==========================================
// 职责: 单个订单的分配结果 + 批次汇总
// 用途: 引擎层写入, 导出层/CLI 只读
// ==========================================

use crate::domain::types::{WindowAssignment, Weekday};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// AssignmentOutcome - 匹配器输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    pub window: WindowAssignment,       // 窗口名 / NO_DATE / OUT_OF_WINDOW
    pub weekday: Option<Weekday>,       // 命中窗口所属星期
}

impl AssignmentOutcome {
    pub fn matched(name: impl Into<String>, weekday: Weekday) -> Self {
        Self {
            window: WindowAssignment::Window(name.into()),
            weekday: Some(weekday),
        }
    }

    pub fn no_date() -> Self {
        Self {
            window: WindowAssignment::NoDate,
            weekday: None,
        }
    }

    pub fn out_of_window(weekday: Option<Weekday>) -> Self {
        Self {
            window: WindowAssignment::OutOfWindow,
            weekday,
        }
    }
}

// ==========================================
// AssignmentRecord - 扁平输出记录
// ==========================================
// 对齐导出列: JIT Call No / Vendor / 交付时间 / 星期 / 分配窗口 / 窗口星期
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRecord {
    pub order_id: String,
    pub vendor: String,
    pub required_timestamp: Option<NaiveDateTime>,
    pub weekday: Option<Weekday>,
    pub assigned_window: WindowAssignment,
    pub assigned_weekday: Option<Weekday>,
}

// ==========================================
// AssignmentSummary - 批次汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentSummary {
    pub total: usize,
    pub matched: usize,
    pub no_date: usize,
    pub out_of_window: usize,
}

impl AssignmentSummary {
    pub fn from_records(records: &[AssignmentRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.total += 1;
            match r.assigned_window {
                WindowAssignment::Window(_) => acc.matched += 1,
                WindowAssignment::NoDate => acc.no_date += 1,
                WindowAssignment::OutOfWindow => acc.out_of_window += 1,
            }
            acc
        })
    }
}
