// ==========================================
// 窗口匹配引擎集成测试
// ==========================================
// 测试目标: 验证同日匹配、跨零点回退、过期检查与边界包含性
// ==========================================


use chrono::{Duration, NaiveDate};
use jit_window_assign::{
    assign_window, AssignmentOutcome, Order, Weekday, WindowAssignment, WindowSchedule,
};
use test_helpers::{day_after_monday, monday, order, window};

fn night_schedule() -> WindowSchedule {
    WindowSchedule::new(vec![window("V1", Weekday::Monday, "NIGHT", 0.9167, 0.1667)])
}

fn midday_schedule() -> WindowSchedule {
    WindowSchedule::new(vec![window("V1", Weekday::Tuesday, "MIDDAY", 0.375, 0.625)])
}

// ==========================================
// 场景: MIDDAY
// ==========================================

#[test]
fn test_midday_window_matches_on_same_day() {
    let tuesday_ten = order("JC1", "V1", day_after_monday(1), 10, 0);
    let outcome = assign_window(&tuesday_ten, &midday_schedule(), None);
    assert_eq!(outcome, AssignmentOutcome::matched("MIDDAY", Weekday::Tuesday));
}

#[test]
fn test_evening_order_without_window_is_out_of_window() {
    let tuesday_evening = order("JC2", "V1", day_after_monday(1), 20, 0);
    let outcome = assign_window(&tuesday_evening, &midday_schedule(), None);
    assert_eq!(outcome.window, WindowAssignment::OutOfWindow);
    assert_eq!(outcome.weekday, None);
}

// ==========================================
// 场景: NIGHT（跨零点）
// ==========================================

#[test]
fn test_night_window_late_part_on_start_day() {
    let outcome = assign_window(&order("JC3", "V1", monday(), 23, 30), &night_schedule(), None);
    assert_eq!(outcome, AssignmentOutcome::matched("NIGHT", Weekday::Monday));

    let outcome = assign_window(&order("JC4", "V1", monday(), 23, 0), &night_schedule(), None);
    assert_eq!(outcome, AssignmentOutcome::matched("NIGHT", Weekday::Monday));
}

#[test]
fn test_night_window_tail_found_via_previous_day() {
    for (hour, minute) in [(1, 0), (2, 0)] {
        let outcome = assign_window(
            &order("JC5", "V1", day_after_monday(1), hour, minute),
            &night_schedule(),
            None,
        );
        assert_eq!(outcome, AssignmentOutcome::matched("NIGHT", Weekday::Monday));
    }
}

#[test]
fn test_tuesday_noon_without_tuesday_window() {
    let tuesday_noon = order("JC6", "V1", day_after_monday(1), 12, 0);
    let outcome = assign_window(&tuesday_noon, &night_schedule(), None);
    assert_eq!(outcome, AssignmentOutcome::out_of_window(None));
}

#[test]
fn test_require_time_past_midnight_rolls_to_next_day() {
    // 周一日期 + 25:00 → 周二 01:00 → 回退命中周一 NIGHT
    let order = Order::new("JC7", "V1", Some(monday()), Some(Duration::hours(25)));
    let outcome = assign_window(&order, &night_schedule(), None);
    assert_eq!(outcome, AssignmentOutcome::matched("NIGHT", Weekday::Monday));
}

// ==========================================
// 性质测试
// ==========================================

#[test]
fn test_absent_timestamp_always_no_date() {
    let orders = [
        Order::new("A", "V1", None, Some(Duration::hours(1))),
        Order::new("B", "V1", Some(monday()), None),
        Order::new("C", "V1", None, None),
    ];
    for o in &orders {
        assert_eq!(assign_window(o, &night_schedule(), None), AssignmentOutcome::no_date());
        // 过期检查不影响无日期订单
        let now = monday().and_hms_opt(0, 0, 0);
        assert_eq!(assign_window(o, &night_schedule(), now), AssignmentOutcome::no_date());
    }
}

#[test]
fn test_reference_after_timestamp_overrides_windows() {
    let now = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap().and_hms_opt(0, 0, 0);
    let o = order("JC8", "V1", day_after_monday(1), 10, 0);
    let outcome = assign_window(&o, &midday_schedule(), now);
    assert_eq!(outcome, AssignmentOutcome::out_of_window(Some(Weekday::Tuesday)));
}

#[test]
fn test_reference_before_timestamp_does_not_interfere() {
    let now = monday().and_hms_opt(0, 0, 0);
    let o = order("JC9", "V1", day_after_monday(1), 10, 0);
    let outcome = assign_window(&o, &midday_schedule(), now);
    assert_eq!(outcome, AssignmentOutcome::matched("MIDDAY", Weekday::Tuesday));
}

#[test]
fn test_idempotent_without_reference() {
    let schedule = night_schedule();
    let o = order("JC10", "V1", day_after_monday(1), 3, 59);
    assert_eq!(assign_window(&o, &schedule, None), assign_window(&o, &schedule, None));
}

#[test]
fn test_first_configured_overlap_wins() {
    let schedule = WindowSchedule::new(vec![
        window("V1", Weekday::Tuesday, "A", 0.3, 0.7),
        window("V1", Weekday::Tuesday, "B", 0.3, 0.7),
    ]);
    let outcome = assign_window(&order("JC11", "V1", day_after_monday(1), 12, 0), &schedule, None);
    assert_eq!(outcome.window, WindowAssignment::Window("A".to_string()));

    let reversed = WindowSchedule::new(vec![
        window("V1", Weekday::Tuesday, "B", 0.3, 0.7),
        window("V1", Weekday::Tuesday, "A", 0.3, 0.7),
    ]);
    let outcome = assign_window(&order("JC11", "V1", day_after_monday(1), 12, 0), &reversed, None);
    assert_eq!(outcome.window, WindowAssignment::Window("B".to_string()));
}

#[test]
fn test_vendor_match_ignores_case() {
    let schedule = WindowSchedule::new(vec![window(
        "acme",
        Weekday::Tuesday,
        "MIDDAY",
        0.375,
        0.625,
    )]);
    let upper_vendor = order("JC12", "ACME", day_after_monday(1), 10, 0);
    let outcome = assign_window(&upper_vendor, &schedule, None);
    assert_eq!(outcome, AssignmentOutcome::matched("MIDDAY", Weekday::Tuesday));
}

#[test]
fn test_unknown_vendor_falls_through() {
    let no_vendor = order("JC13", "", day_after_monday(1), 10, 0);
    let outcome = assign_window(&no_vendor, &midday_schedule(), None);
    assert_eq!(outcome, AssignmentOutcome::out_of_window(None));
}
