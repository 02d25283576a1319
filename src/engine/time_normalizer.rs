// ==========================================
// JIT 窗口分配系统 - 时间标准化
// ==========================================
// 职责: 异构时间表示 → 距零点时长 / 一天的比例
// 输入: CellValue（小数天 / "H:M:S" 文本 / 时刻）
// 输出: Option, 任何无法识别的输入都归为 None, 从不报错
// ==========================================
// 订单用完整时长（可跨天）; 窗口边界用时钟时刻（[0,1)）
// ==========================================

use crate::domain::order::Order;
use crate::domain::types::{CellValue, Weekday};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

const MICROS_PER_DAY: f64 = 86_400_000_000.0;
const MILLIS_PER_DAY: i64 = 86_400_000;

// Duration::seconds 的上限（毫秒精度内部表示）
const MAX_DURATION_SECONDS: i64 = i64::MAX / 1_000;

/// 将 Require Time 单元格标准化为距零点的时长
///
/// # 规则
/// - 数字: 按天解释（0.5 → 12h），精度到微秒
/// - 时长单元格（[h]:mm:ss）: 原值
/// - 文本: 必须恰好是三段冒号分隔的非负整数 H:M:S，小时可超过 23
/// - 时刻: 取时/分/秒
/// - 其他: None
pub fn normalize_time_of_day(raw: &CellValue) -> Option<Duration> {
    match raw {
        CellValue::Number(days) => days_to_duration(*days),
        CellValue::Duration(d) => Some(*d),
        CellValue::Text(text) => {
            let (h, m, s) = parse_hms(text)?;
            if h < 0 || m < 0 || s < 0 {
                return None;
            }
            let total = h
                .checked_mul(3_600)?
                .checked_add(m.checked_mul(60)?)?
                .checked_add(s)?;
            if total > MAX_DURATION_SECONDS {
                return None;
            }
            Some(Duration::seconds(total))
        }
        CellValue::Time(t) => Some(Duration::seconds(i64::from(
            t.hour() * 3_600 + t.minute() * 60 + t.second(),
        ))),
        _ => None,
    }
}

/// 日期 + 时长 → 交付时间戳（任一缺失则 None）
///
/// 时长超过 24h 时顺延到后续日期
pub fn combine_date_time(
    date: Option<NaiveDate>,
    duration: Option<Duration>,
) -> Option<NaiveDateTime> {
    let (date, duration) = date.zip(duration)?;
    date.and_time(NaiveTime::MIN).checked_add_signed(duration)
}

/// 订单交付时间戳
pub fn required_timestamp(order: &Order) -> Option<NaiveDateTime> {
    combine_date_time(order.required_date, order.required_time)
}

/// 将时钟时刻转换为一天的比例: h/24 + m/1440 + s/86400
///
/// 仅用于窗口边界。数字单元格视为已换算好的比例，须落在 [0,1)。
pub fn decimal_fraction_of_day(raw: &CellValue) -> Option<f64> {
    match raw {
        CellValue::Text(text) => {
            let (h, m, s) = parse_hms(text)?;
            let in_clock_range =
                (0..24).contains(&h) && (0..60).contains(&m) && (0..60).contains(&s);
            in_clock_range.then(|| fraction_of_day(h as u32, m as u32, s as u32))
        }
        CellValue::Time(t) => Some(time_fraction(t)),
        CellValue::DateTime(dt) => Some(time_fraction(&dt.time())),
        CellValue::Number(v) => (v.is_finite() && (0.0..1.0).contains(v)).then_some(*v),
        CellValue::Duration(d) => {
            let millis = d.num_milliseconds();
            (0..MILLIS_PER_DAY)
                .contains(&millis)
                .then(|| millis as f64 / MILLIS_PER_DAY as f64)
        }
        _ => None,
    }
}

/// 时间戳的时刻部分 → 一天的比例（秒以下忽略）
pub fn hour_fraction(timestamp: &NaiveDateTime) -> f64 {
    time_fraction(&timestamp.time())
}

/// 时间戳所在星期
pub fn weekday_name(timestamp: Option<&NaiveDateTime>) -> Option<Weekday> {
    timestamp.map(|ts| Weekday::from(ts.weekday()))
}

/// 前一天: (index - 1 + 7) mod 7
pub fn previous_weekday(weekday_index: u32) -> Weekday {
    Weekday::from_index(weekday_index).previous()
}

// ==========================================
// 内部工具
// ==========================================

fn fraction_of_day(hour: u32, minute: u32, second: u32) -> f64 {
    f64::from(hour) / 24.0 + f64::from(minute) / 1440.0 + f64::from(second) / 86400.0
}

fn time_fraction(t: &NaiveTime) -> f64 {
    fraction_of_day(t.hour(), t.minute(), t.second())
}

fn days_to_duration(days: f64) -> Option<Duration> {
    if !days.is_finite() {
        return None;
    }
    let micros = (days * MICROS_PER_DAY).round();
    // 超出 i64 微秒可表示范围
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(Duration::microseconds(micros as i64))
}

/// 解析 "H:M:S"（恰好三段, 每段为整数, 段内允许首尾空白）
fn parse_hms(text: &str) -> Option<(i64, i64, i64)> {
    let mut parts = text.split(':');
    let h = parts.next()?.trim().parse::<i64>().ok()?;
    let m = parts.next()?.trim().parse::<i64>().ok()?;
    let s = parts.next()?.trim().parse::<i64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((h, m, s))
}
