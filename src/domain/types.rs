// ==========================================
// JIT 窗口分配系统 - 领域类型定义
// ==========================================
// 职责: 星期枚举、分配结果标签、原始单元格值
// 红线: 核心只认 7 值星期枚举, 本地化名称只在适配层出现
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ==========================================
// 星期 (Weekday)
// ==========================================
// 索引: 0=MONDAY .. 6=SUNDAY
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// 星期索引（0=周一 .. 6=周日）
    pub fn index(self) -> u32 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    /// 由索引取星期，索引按 7 取模
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index % 7) as usize]
    }

    /// 前一天: (index - 1 + 7) mod 7
    pub fn previous(self) -> Self {
        Self::from_index(self.index() + 6)
    }

    /// 规范名称（MONDAY..SUNDAY）
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "MONDAY",
            Weekday::Tuesday => "TUESDAY",
            Weekday::Wednesday => "WEDNESDAY",
            Weekday::Thursday => "THURSDAY",
            Weekday::Friday => "FRIDAY",
            Weekday::Saturday => "SATURDAY",
            Weekday::Sunday => "SUNDAY",
        }
    }

    /// i18n 键（weekday.monday ..）
    pub fn i18n_key(self) -> String {
        format!("weekday.{}", self.as_str().to_lowercase())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        Self::from_index(day.num_days_from_monday())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 星期名称解析错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("无法识别的星期名称: {0}")]
pub struct UnknownWeekday(pub String);

impl FromStr for Weekday {
    type Err = UnknownWeekday;

    /// 解析星期标签
    ///
    /// 支持: 英文/西班牙文全称、三字母缩写，大小写不敏感，重音可省略
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .trim()
            .to_uppercase()
            .chars()
            .map(|c| match c {
                'Á' => 'A',
                'É' => 'E',
                'Í' => 'I',
                'Ó' => 'O',
                'Ú' => 'U',
                other => other,
            })
            .collect();

        let day = match folded.as_str() {
            "MONDAY" | "MON" | "LUNES" | "LUN" => Weekday::Monday,
            "TUESDAY" | "TUE" | "TUES" | "MARTES" | "MAR" => Weekday::Tuesday,
            "WEDNESDAY" | "WED" | "MIERCOLES" | "MIE" => Weekday::Wednesday,
            "THURSDAY" | "THU" | "THUR" | "THURS" | "JUEVES" | "JUE" => Weekday::Thursday,
            "FRIDAY" | "FRI" | "VIERNES" | "VIE" => Weekday::Friday,
            "SATURDAY" | "SAT" | "SABADO" | "SAB" => Weekday::Saturday,
            "SUNDAY" | "SUN" | "DOMINGO" | "DOM" => Weekday::Sunday,
            _ => return Err(UnknownWeekday(s.to_string())),
        };
        Ok(day)
    }
}

// ==========================================
// 分配结果标签 (Window Assignment)
// ==========================================
// 三种结果之一: 窗口名 / 无日期 / 窗口外
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowAssignment {
    Window(String),
    NoDate,
    OutOfWindow,
}

impl WindowAssignment {
    pub const NO_DATE: &'static str = "NO_DATE";
    pub const OUT_OF_WINDOW: &'static str = "OUT_OF_WINDOW";
}

impl fmt::Display for WindowAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowAssignment::Window(name) => write!(f, "{}", name),
            WindowAssignment::NoDate => write!(f, "{}", Self::NO_DATE),
            WindowAssignment::OutOfWindow => write!(f, "{}", Self::OUT_OF_WINDOW),
        }
    }
}

// ==========================================
// 原始单元格值 (Cell Value)
// ==========================================
// 适配层边界: 文件解析器输出, 字段映射器输入
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Time(NaiveTime),
    /// 时长单元格（[h]:mm:ss）
    Duration(Duration),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 文本形式（用于 ID/供应商/窗口名等字符串字段）
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            // 整数值的数字单元格不带小数点输出（如 JIT Call No）
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                Some(format!("{}", *n as i64))
            }
            CellValue::Number(n) => Some(n.to_string()),
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Date(d) => Some(d.to_string()),
            CellValue::DateTime(dt) => Some(dt.to_string()),
            CellValue::Time(t) => Some(t.to_string()),
            CellValue::Duration(d) => Some(format!("{}s", d.num_seconds())),
        }
    }
}
