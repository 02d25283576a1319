// ==========================================
// JIT 窗口分配系统 - 窗口匹配引擎
// ==========================================
// 职责: 为单个订单找到所属收货窗口
// 输入: Order + WindowSchedule + 可选参考时刻 now
// 输出: AssignmentOutcome（窗口名 + 窗口星期 / NO_DATE / OUT_OF_WINDOW）
// ==========================================
// 匹配顺序:
// 1) 无时间戳 → NO_DATE
// 2) 提供 now 且时间戳 < now → OUT_OF_WINDOW（保留订单星期）
// 3) 当天窗口: 普通窗口闭区间 / 跨零点窗口只看 >= start
// 4) 前一天窗口: 只看跨零点窗口的 <= end 尾段
// 5) 都不命中 → OUT_OF_WINDOW
// ==========================================

use crate::domain::assignment::AssignmentOutcome;
use crate::domain::order::Order;
use crate::domain::types::Weekday;
use crate::domain::window::WindowDefinition;
use crate::engine::time_normalizer::{hour_fraction, previous_weekday, required_timestamp};
use chrono::{Datelike, NaiveDateTime};
use std::collections::HashMap;
use tracing::{trace, warn};

// ==========================================
// WindowSchedule - 按 (供应商, 星期) 分组的有序窗口表
// ==========================================
// 组内保持输入顺序（首个命中者胜出）
#[derive(Debug, Clone, Default)]
pub struct WindowSchedule {
    windows: HashMap<(String, Weekday), Vec<WindowDefinition>>,
    total: usize,
}

impl WindowSchedule {
    /// 由窗口定义列表构建
    ///
    /// 星期无法识别的行直接丢弃（永远不会命中）
    pub fn new(definitions: impl IntoIterator<Item = WindowDefinition>) -> Self {
        let mut schedule = Self::default();
        for definition in definitions {
            schedule.push(definition);
        }
        schedule
    }

    pub fn push(&mut self, definition: WindowDefinition) {
        let Some(weekday) = definition.weekday else {
            warn!(
                row_number = definition.row_number,
                vendor = %definition.vendor,
                window = %definition.window_name,
                "窗口星期无法识别，已忽略"
            );
            return;
        };
        self.windows
            .entry((vendor_key(&definition.vendor), weekday))
            .or_default()
            .push(definition);
        self.total += 1;
    }

    /// 某供应商某星期的窗口（输入顺序）
    pub fn windows_for(&self, vendor: &str, weekday: Weekday) -> &[WindowDefinition] {
        self.windows
            .get(&(vendor_key(vendor), weekday))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// 去重后的供应商数
    pub fn vendor_count(&self) -> usize {
        let mut vendors: Vec<&str> = self.windows.keys().map(|(v, _)| v.as_str()).collect();
        vendors.sort_unstable();
        vendors.dedup();
        vendors.len()
    }
}

impl FromIterator<WindowDefinition> for WindowSchedule {
    fn from_iter<T: IntoIterator<Item = WindowDefinition>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// 供应商比较键（TRIM + UPPER）
fn vendor_key(vendor: &str) -> String {
    vendor.trim().to_uppercase()
}

// ==========================================
// WindowMatcher - 窗口匹配器
// ==========================================
pub struct WindowMatcher<'a> {
    schedule: &'a WindowSchedule,
}

impl<'a> WindowMatcher<'a> {
    pub fn new(schedule: &'a WindowSchedule) -> Self {
        Self { schedule }
    }

    /// 为订单分配窗口
    ///
    /// # 参数
    /// - order: 订单
    /// - now: 参考时刻（None 时跳过"已过期"检查）；同一批次必须使用同一个值
    pub fn assign(&self, order: &Order, now: Option<NaiveDateTime>) -> AssignmentOutcome {
        let Some(timestamp) = required_timestamp(order) else {
            return AssignmentOutcome::no_date();
        };
        let weekday = Weekday::from(timestamp.weekday());

        if let Some(now) = now {
            if timestamp < now {
                trace!(order_id = %order.id, %timestamp, %now, "订单交付时间已过");
                return AssignmentOutcome::out_of_window(Some(weekday));
            }
        }

        let fraction = hour_fraction(&timestamp);

        // 当天窗口
        let same_day = self.schedule.windows_for(&order.vendor, weekday);
        if let Some(window) = same_day.iter().find(|w| matches_same_day(w, fraction)) {
            return AssignmentOutcome::matched(window.window_name.clone(), weekday);
        }

        // 前一天跨零点窗口的尾段
        let previous_day = previous_weekday(weekday.index());
        let previous = self.schedule.windows_for(&order.vendor, previous_day);
        if let Some(window) = previous.iter().find(|w| matches_previous_day(w, fraction)) {
            trace!(
                order_id = %order.id,
                window = %window.window_name,
                day = %previous_day,
                "命中前一天跨零点窗口"
            );
            return AssignmentOutcome::matched(window.window_name.clone(), previous_day);
        }

        AssignmentOutcome::out_of_window(None)
    }
}

/// 当天窗口判定
///
/// 普通窗口（start < end）: start <= f <= end
/// 跨零点窗口（start >= end）: f >= start（零点后的部分归前一天判定）
fn matches_same_day(window: &WindowDefinition, fraction: f64) -> bool {
    match window.bounds() {
        Some((start, end)) if start < end => start <= fraction && fraction <= end,
        Some((start, _)) => fraction >= start,
        None => false,
    }
}

/// 前一天窗口判定: 仅跨零点窗口（start > end），f <= end
fn matches_previous_day(window: &WindowDefinition, fraction: f64) -> bool {
    match window.bounds() {
        Some((start, end)) => start > end && fraction <= end,
        None => false,
    }
}

/// 对完整窗口表执行一次匹配
pub fn assign_window(
    order: &Order,
    schedule: &WindowSchedule,
    now: Option<NaiveDateTime>,
) -> AssignmentOutcome {
    WindowMatcher::new(schedule).assign(order, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::WindowAssignment;
    use chrono::{Duration, NaiveDate};

    // 2025-01-06 周一, 2025-01-07 周二
    fn order_at(vendor: &str, day: u32, h: i64, m: i64) -> Order {
        Order::new(
            "JC001",
            vendor,
            NaiveDate::from_ymd_opt(2025, 1, day),
            Some(Duration::hours(h) + Duration::minutes(m)),
        )
    }

    fn night_schedule() -> WindowSchedule {
        WindowSchedule::new(vec![WindowDefinition::new(
            "V1",
            Weekday::Monday,
            "NIGHT",
            0.9167,
            0.1667,
        )])
    }

    #[test]
    fn test_no_date_short_circuits() {
        let order = Order::new("JC001", "V1", None, Some(Duration::hours(8)));
        let outcome = assign_window(&order, &night_schedule(), None);
        assert_eq!(outcome, AssignmentOutcome::no_date());
    }

    #[test]
    fn test_non_wrapping_bounds_inclusive() {
        let schedule = WindowSchedule::new(vec![WindowDefinition::new(
            "V1",
            Weekday::Tuesday,
            "MIDDAY",
            0.375,
            0.625,
        )]);
        let at_start = assign_window(&order_at("V1", 7, 9, 0), &schedule, None);
        let at_end = assign_window(&order_at("V1", 7, 15, 0), &schedule, None);
        assert_eq!(at_start, AssignmentOutcome::matched("MIDDAY", Weekday::Tuesday));
        assert_eq!(at_end, AssignmentOutcome::matched("MIDDAY", Weekday::Tuesday));

        let before = Order::new(
            "JC002",
            "V1",
            NaiveDate::from_ymd_opt(2025, 1, 7),
            Some(Duration::hours(9) - Duration::seconds(1)),
        );
        let after = Order::new(
            "JC003",
            "V1",
            NaiveDate::from_ymd_opt(2025, 1, 7),
            Some(Duration::hours(15) + Duration::seconds(1)),
        );
        assert_eq!(
            assign_window(&before, &schedule, None).window,
            WindowAssignment::OutOfWindow
        );
        assert_eq!(
            assign_window(&after, &schedule, None).window,
            WindowAssignment::OutOfWindow
        );
    }

    #[test]
    fn test_wrapping_window_same_day_late_part() {
        let outcome = assign_window(&order_at("V1", 6, 23, 30), &night_schedule(), None);
        assert_eq!(outcome, AssignmentOutcome::matched("NIGHT", Weekday::Monday));
    }

    #[test]
    fn test_wrapping_window_previous_day_fallback() {
        let outcome = assign_window(&order_at("V1", 7, 1, 0), &night_schedule(), None);
        assert_eq!(outcome, AssignmentOutcome::matched("NIGHT", Weekday::Monday));
    }

    #[test]
    fn test_wrapping_window_early_part_not_matched_on_start_day() {
        // 周一 01:00 不属于周一 22:00 开始的窗口
        let outcome = assign_window(&order_at("V1", 6, 1, 0), &night_schedule(), None);
        assert_eq!(outcome, AssignmentOutcome::out_of_window(None));
    }

    #[test]
    fn test_previous_day_ignores_non_wrapping_windows() {
        let schedule = WindowSchedule::new(vec![WindowDefinition::new(
            "V1",
            Weekday::Monday,
            "EARLY",
            0.0,
            0.25,
        )]);
        let outcome = assign_window(&order_at("V1", 7, 2, 0), &schedule, None);
        assert_eq!(outcome, AssignmentOutcome::out_of_window(None));
    }

    #[test]
    fn test_equal_bounds_treated_as_wrapping_on_same_day_only() {
        let schedule = WindowSchedule::new(vec![WindowDefinition::new(
            "V1",
            Weekday::Monday,
            "FLAT",
            0.5,
            0.5,
        )]);
        assert_eq!(
            assign_window(&order_at("V1", 6, 20, 0), &schedule, None),
            AssignmentOutcome::matched("FLAT", Weekday::Monday)
        );
        assert_eq!(
            assign_window(&order_at("V1", 7, 6, 0), &schedule, None),
            AssignmentOutcome::out_of_window(None)
        );
    }

    #[test]
    fn test_elapsed_check_keeps_order_weekday() {
        let now = NaiveDate::from_ymd_opt(2025, 1, 8)
            .unwrap()
            .and_hms_opt(0, 0, 0);
        let outcome = assign_window(&order_at("V1", 6, 23, 30), &night_schedule(), now);
        assert_eq!(outcome, AssignmentOutcome::out_of_window(Some(Weekday::Monday)));
    }

    #[test]
    fn test_elapsed_check_equal_instant_not_elapsed() {
        let order = order_at("V1", 6, 23, 30);
        let now = NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(23, 30, 0);
        let outcome = assign_window(&order, &night_schedule(), now);
        assert_eq!(outcome, AssignmentOutcome::matched("NIGHT", Weekday::Monday));
    }

    #[test]
    fn test_first_match_wins() {
        let schedule = WindowSchedule::new(vec![
            WindowDefinition::new("V1", Weekday::Tuesday, "FIRST", 0.25, 0.75),
            WindowDefinition::new("V1", Weekday::Tuesday, "SECOND", 0.375, 0.625),
        ]);
        let outcome = assign_window(&order_at("V1", 7, 10, 0), &schedule, None);
        assert_eq!(outcome, AssignmentOutcome::matched("FIRST", Weekday::Tuesday));
    }

    #[test]
    fn test_vendor_case_insensitive() {
        let schedule = WindowSchedule::new(vec![WindowDefinition::new(
            "ACME",
            Weekday::Tuesday,
            "MIDDAY",
            0.375,
            0.625,
        )]);
        let outcome = assign_window(&order_at("acme", 7, 10, 0), &schedule, None);
        assert_eq!(outcome, AssignmentOutcome::matched("MIDDAY", Weekday::Tuesday));
    }

    #[test]
    fn test_window_with_missing_bound_skipped() {
        let mut broken = WindowDefinition::new("V1", Weekday::Tuesday, "BROKEN", 0.0, 0.99);
        broken.end_fraction = None;
        let schedule = WindowSchedule::new(vec![
            broken,
            WindowDefinition::new("V1", Weekday::Tuesday, "MIDDAY", 0.375, 0.625),
        ]);
        let outcome = assign_window(&order_at("V1", 7, 10, 0), &schedule, None);
        assert_eq!(outcome, AssignmentOutcome::matched("MIDDAY", Weekday::Tuesday));
    }

    #[test]
    fn test_schedule_drops_unknown_weekday() {
        let mut unknown = WindowDefinition::new("V1", Weekday::Monday, "X", 0.1, 0.2);
        unknown.weekday = None;
        let schedule = WindowSchedule::new(vec![unknown, night_schedule_row()]);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule.vendor_count(), 1);
    }

    fn night_schedule_row() -> WindowDefinition {
        WindowDefinition::new("v1 ", Weekday::Monday, "NIGHT", 0.9167, 0.1667)
    }

    #[test]
    fn test_sunday_order_falls_back_to_saturday() {
        let schedule = WindowSchedule::new(vec![WindowDefinition::new(
            "V1",
            Weekday::Saturday,
            "WEEKEND_NIGHT",
            0.875,
            0.125,
        )]);
        // 2025-01-12 周日
        let outcome = assign_window(&order_at("V1", 12, 2, 0), &schedule, None);
        assert_eq!(
            outcome,
            AssignmentOutcome::matched("WEEKEND_NIGHT", Weekday::Saturday)
        );
    }
}
