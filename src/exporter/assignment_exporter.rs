// ==========================================
// JIT 窗口分配系统 - 分配结果导出器
// ==========================================
// 支持: CSV (.csv) / JSON (.json)
// 职责: 记录 → 本地化显示文本 → 文件
// ==========================================

use crate::domain::assignment::AssignmentRecord;
use crate::domain::types::Weekday;
use crate::i18n::{assignment_label, t_in, weekday_label};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// 导出时间戳格式
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 导出错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("导出格式不支持: {0}（仅支持 .csv/.json）")]
    UnsupportedFormat(String),

    #[error("文件写入失败: {0}")]
    WriteError(String),

    #[error("CSV 写入失败: {0}")]
    CsvError(#[from] csv::Error),

    #[error("JSON 序列化失败: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::WriteError(err.to_string())
    }
}

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// 根据扩展名判断导出格式
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => Err(ExportError::UnsupportedFormat(ext)),
        }
    }
}

/// 一行显示文本（与导出列顺序一致）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayRow {
    pub order_id: String,
    pub vendor: String,
    pub required_at: String,
    pub weekday: String,
    pub assigned_window: String,
    pub window_day: String,
}

impl DisplayRow {
    pub fn cells(&self) -> [&str; 6] {
        [
            self.order_id.as_str(),
            self.vendor.as_str(),
            self.required_at.as_str(),
            self.weekday.as_str(),
            self.assigned_window.as_str(),
            self.window_day.as_str(),
        ]
    }
}

// ==========================================
// AssignmentExporter - 分配结果导出器
// ==========================================
pub struct AssignmentExporter {
    locale: String,
}

impl AssignmentExporter {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    /// 表头（本地化）
    pub fn headers(&self) -> [String; 6] {
        [
            "export.order_id",
            "export.vendor",
            "export.required_at",
            "export.weekday",
            "export.assigned_window",
            "export.window_day",
        ]
        .map(|key| t_in(key, &self.locale))
    }

    /// 记录 → 显示文本
    pub fn display_row(&self, record: &AssignmentRecord) -> DisplayRow {
        let day = |d: Option<Weekday>| {
            d.map(|d| weekday_label(d, &self.locale)).unwrap_or_default()
        };
        DisplayRow {
            order_id: record.order_id.clone(),
            vendor: record.vendor.clone(),
            required_at: record
                .required_timestamp
                .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
                .unwrap_or_default(),
            weekday: day(record.weekday),
            assigned_window: assignment_label(&record.assigned_window, &self.locale),
            window_day: day(record.assigned_weekday),
        }
    }

    /// 写出 CSV
    pub fn write_csv<W: Write>(
        &self,
        records: &[AssignmentRecord],
        writer: W,
    ) -> Result<(), ExportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.headers())?;
        for record in records {
            csv_writer.write_record(self.display_row(record).cells())?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    /// 写出 JSON（数组, 每个元素为显示文本行）
    pub fn write_json<W: Write>(
        &self,
        records: &[AssignmentRecord],
        writer: W,
    ) -> Result<(), ExportError> {
        let rows: Vec<DisplayRow> = records.iter().map(|r| self.display_row(r)).collect();
        serde_json::to_writer_pretty(writer, &rows)?;
        Ok(())
    }

    /// 按扩展名导出到文件
    pub fn export_to_file(
        &self,
        records: &[AssignmentRecord],
        path: &Path,
    ) -> Result<(), ExportError> {
        let format = ExportFormat::from_path(path)?;
        let mut writer = BufWriter::new(File::create(path)?);
        match format {
            ExportFormat::Csv => self.write_csv(records, &mut writer)?,
            ExportFormat::Json => self.write_json(records, &mut writer)?,
        }
        writer.flush()?;

        info!(path = %path.display(), rows = records.len(), "分配结果已导出");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::WindowAssignment;
    use chrono::NaiveDate;

    fn records() -> Vec<AssignmentRecord> {
        vec![
            AssignmentRecord {
                order_id: "JC001".to_string(),
                vendor: "V1".to_string(),
                required_timestamp: NaiveDate::from_ymd_opt(2025, 1, 7)
                    .unwrap()
                    .and_hms_opt(1, 0, 0),
                weekday: Some(Weekday::Tuesday),
                assigned_window: WindowAssignment::Window("NIGHT".to_string()),
                assigned_weekday: Some(Weekday::Monday),
            },
            AssignmentRecord {
                order_id: "JC002".to_string(),
                vendor: "V1".to_string(),
                required_timestamp: None,
                weekday: None,
                assigned_window: WindowAssignment::NoDate,
                assigned_weekday: None,
            },
        ]
    }

    #[test]
    fn test_write_csv_english() {
        let mut buf = Vec::new();
        AssignmentExporter::new("en")
            .write_csv(&records(), &mut buf)
            .unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "JIT Call No,Vendor,Required At,Weekday,Assigned Window,Window Day"
        );
        assert_eq!(lines[1], "JC001,V1,2025-01-07 01:00:00,TUESDAY,NIGHT,MONDAY");
        assert_eq!(lines[2], "JC002,V1,,,NO_DATE,");
    }

    #[test]
    fn test_display_row_spanish() {
        let exporter = AssignmentExporter::new("es");
        let row = exporter.display_row(&records()[1]);
        assert_eq!(row.assigned_window, "Sin fecha");
        let row = exporter.display_row(&records()[0]);
        assert_eq!(row.weekday, "MARTES");
        assert_eq!(row.window_day, "LUNES");
    }

    #[test]
    fn test_write_json() {
        let mut buf = Vec::new();
        AssignmentExporter::new("en")
            .write_json(&records(), &mut buf)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["assigned_window"], "NIGHT");
        assert_eq!(value[1]["assigned_window"], "NO_DATE");
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out.CSV")).unwrap(),
            ExportFormat::Csv
        );
        assert!(ExportFormat::from_path(Path::new("out.xlsx")).is_err());
    }
}
