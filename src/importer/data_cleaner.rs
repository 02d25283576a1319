// ==========================================
// JIT 窗口分配系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 日期与星期解析 / 数字文本转换
// 红线: 清洗失败一律返回 None, 不报错
// ==========================================

use crate::domain::types::{CellValue, Weekday};
use crate::importer::file_parser::excel_serial_to_datetime;
use chrono::{NaiveDate, NaiveDateTime};

/// 文本日期格式（按优先级）
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%d/%m/%Y", "%Y/%m/%d"];

/// 文本日期时间格式（取日期部分）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

// Excel 序列号合理区间（1900-01-01 .. 9999-12-31）
const EXCEL_SERIAL_MIN: f64 = 1.0;
const EXCEL_SERIAL_MAX: f64 = 2_958_465.0;

pub struct DataCleaner;

impl DataCleaner {
    /// 标准化 NULL 值（空字符串/空白 → None）
    pub fn normalize_null(&self, value: Option<String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 单元格 → 文本（空 → None）
    pub fn cell_text(&self, cell: Option<&CellValue>) -> Option<String> {
        self.normalize_null(cell.and_then(CellValue::as_text))
    }

    /// 解析星期标签（英文/西文, 大小写不敏感）
    pub fn parse_weekday(&self, cell: Option<&CellValue>) -> Option<Weekday> {
        self.cell_text(cell)?.parse().ok()
    }

    /// 解析日历日期
    ///
    /// # 规则
    /// - 日期单元格: 原值
    /// - 日期时间单元格: 取日期部分
    /// - 文本: 依次尝试 DATE_FORMATS / DATETIME_FORMATS
    /// - 数字: 视为 Excel 序列号
    pub fn parse_date(&self, cell: Option<&CellValue>) -> Option<NaiveDate> {
        match cell? {
            CellValue::Date(d) => Some(*d),
            CellValue::DateTime(dt) => Some(dt.date()),
            CellValue::Text(text) => {
                let text = text.trim();
                DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                    .or_else(|| {
                        DATETIME_FORMATS
                            .iter()
                            .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                            .map(|dt| dt.date())
                    })
            }
            CellValue::Number(serial)
                if (EXCEL_SERIAL_MIN..=EXCEL_SERIAL_MAX).contains(serial) =>
            {
                excel_serial_to_datetime(serial.floor()).map(|dt| dt.date())
            }
            _ => None,
        }
    }

    /// 时间列的文本数字转为数字单元格（CSV 中的小数天）
    ///
    /// 其余单元格原样返回
    pub fn coerce_numeric_text(&self, cell: Option<&CellValue>) -> CellValue {
        match cell {
            Some(CellValue::Text(text)) => {
                let trimmed = text.trim();
                let looks_numeric = trimmed.chars().any(|c| c.is_ascii_digit())
                    && trimmed
                        .chars()
                        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
                match trimmed.parse::<f64>() {
                    Ok(v) if looks_numeric && v.is_finite() => CellValue::Number(v),
                    _ => CellValue::Text(trimmed.to_string()),
                }
            }
            Some(other) => other.clone(),
            None => CellValue::Empty,
        }
    }
}
