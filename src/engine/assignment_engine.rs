// ==========================================
// JIT 窗口分配系统 - 批次分配引擎
// ==========================================
// 职责: 对一批订单逐个执行窗口匹配, 生成扁平输出记录
// 红线: 参考时刻 now 在批次开始时确定一次, 批内所有订单共用
// ==========================================

use crate::domain::assignment::{AssignmentRecord, AssignmentSummary};
use crate::domain::order::Order;
use crate::engine::time_normalizer::{required_timestamp, weekday_name};
use crate::engine::window_matcher::{WindowMatcher, WindowSchedule};
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{debug, info, instrument};

// ==========================================
// AssignmentEngine - 批次分配引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct AssignmentEngine {
    schedule: Arc<WindowSchedule>,
}

impl AssignmentEngine {
    /// 创建引擎（窗口表在整个运行期间只读共享）
    pub fn new(schedule: Arc<WindowSchedule>) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &WindowSchedule {
        &self.schedule
    }

    /// 单个订单分配（内部使用）
    pub fn assign_one(&self, order: &Order, now: Option<NaiveDateTime>) -> AssignmentRecord {
        let outcome = WindowMatcher::new(&self.schedule).assign(order, now);
        let timestamp = required_timestamp(order);

        AssignmentRecord {
            order_id: order.id.clone(),
            vendor: order.vendor.clone(),
            required_timestamp: timestamp,
            weekday: weekday_name(timestamp.as_ref()),
            assigned_window: outcome.window,
            assigned_weekday: outcome.weekday,
        }
    }

    /// 批量分配
    ///
    /// # 参数
    /// - orders: 订单列表（输出顺序与输入一致）
    /// - now: 批次参考时刻（None 表示不做"已过期"检查）
    ///
    /// # 返回
    /// - 每个订单恰好一条记录，单个订单从不阻断批次
    #[instrument(skip(self, orders), fields(count = orders.len(), elapsed_check = now.is_some()))]
    pub fn assign_batch(
        &self,
        orders: &[Order],
        now: Option<NaiveDateTime>,
    ) -> Vec<AssignmentRecord> {
        let records: Vec<AssignmentRecord> = orders
            .iter()
            .map(|order| self.assign_one(order, now))
            .collect();

        let summary = AssignmentSummary::from_records(&records);
        info!(
            total = summary.total,
            matched = summary.matched,
            no_date = summary.no_date,
            out_of_window = summary.out_of_window,
            "批次分配完成"
        );
        debug!(windows = self.schedule.len(), "使用窗口表");

        records
    }
}
