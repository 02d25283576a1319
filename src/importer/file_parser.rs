// ==========================================
// JIT 窗口分配系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: 表头 + 行记录（列名 → CellValue）
// ==========================================
// Excel 单元格保留类型（数字/时刻/日期）; CSV 单元格一律为文本,
// 由字段映射器按列决定如何解释
// ==========================================

use crate::domain::types::CellValue;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Data, ExcelDateTime, ExcelDateTimeType, Reader};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::debug;

// 时长单元格可接受的最大天数
const MAX_DURATION_DAYS: f64 = 1e8;

/// 原始行记录
pub type RawRow = HashMap<String, CellValue>;

/// 解析结果: 表头（已 TRIM）+ 数据行（已跳过全空行）
#[derive(Debug, Clone, Default)]
pub struct ParsedSheet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row = RawRow::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    let trimmed = value.trim();
                    let cell = if trimmed.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(trimmed.to_string())
                    };
                    row.insert(header.clone(), cell);
                }
            }

            // 跳过完全空白的行
            if row.values().all(CellValue::is_empty) {
                continue;
            }
            rows.push(row);
        }

        debug!(file = %file_path.display(), rows = rows.len(), "CSV 解析完成");
        Ok(ParsedSheet { headers, rows })
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        ensure_exists(file_path)?;

        let ext = extension_of(file_path);
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut sheet_rows = range.rows();
        let header_row = sheet_rows
            .next()
            .ok_or_else(|| ImportError::MissingHeader(file_path.display().to_string()))?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for data_row in sheet_rows {
            let mut row = RawRow::new();
            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row.insert(header.clone(), excel_cell_value(cell));
                }
            }

            if row.values().all(CellValue::is_empty) {
                continue;
            }
            rows.push(row);
        }

        debug!(
            file = %file_path.display(),
            sheet = %sheet_name,
            rows = rows.len(),
            "Excel 解析完成"
        );
        Ok(ParsedSheet { headers, rows })
    }
}

/// calamine 单元格 → CellValue
fn excel_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(trimmed.to_string())
            }
        }
        Data::DateTime(dt) => excel_datetime_value(dt),
        Data::DateTimeIso(s) => iso_value(s),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    }
}

/// 日期格式单元格 → 时长 / 时刻 / 日期 / 日期时间
///
/// 日期系统（1900/1904）由 calamine 按工作簿设置换算;
/// 小于 1 的序列号只有时刻部分（时间格式单元格）
fn excel_datetime_value(dt: &ExcelDateTime) -> CellValue {
    let serial = dt.as_f64();
    if !serial.is_finite() {
        return CellValue::Empty;
    }
    if dt.is_duration() {
        // 超出毫秒 i64 范围时 calamine 换算会溢出
        if serial.abs() >= MAX_DURATION_DAYS {
            return CellValue::Empty;
        }
        return dt.as_duration().map_or(CellValue::Empty, CellValue::Duration);
    }
    if serial < 0.0 {
        return CellValue::Empty;
    }

    match dt.as_datetime() {
        Some(datetime) if serial < 1.0 => CellValue::Time(datetime.time()),
        Some(datetime) if datetime.time() == NaiveTime::MIN => CellValue::Date(datetime.date()),
        Some(datetime) => CellValue::DateTime(datetime),
        None => CellValue::Empty,
    }
}

/// 无格式信息的数字按 1900 日期系统序列号换算（CSV / 常规格式单元格）
pub(crate) fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    ExcelDateTime::new(serial, ExcelDateTimeType::DateTime, false).as_datetime()
}

fn iso_value(s: &str) -> CellValue {
    let trimmed = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return CellValue::DateTime(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return CellValue::Date(d);
    }
    if let Ok(t) = NaiveTime::parse_from_str(trimmed, "%H:%M:%S%.f") {
        return CellValue::Time(t);
    }
    CellValue::Text(trimmed.to_string())
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse(&self, file_path: &Path) -> ImportResult<ParsedSheet> {
        match extension_of(file_path).as_str() {
            "csv" => CsvParser.parse(file_path),
            "xlsx" | "xls" => ExcelParser.parse(file_path),
            other => Err(ImportError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&[
            " JIT Call No ,Vendor,Require Date,Require Time",
            "JC001,V1,2025-01-07,10:00:00",
            "JC002,V2,2025-01-07,0.5",
        ]);

        let sheet = CsvParser.parse(temp_file.path()).unwrap();

        assert_eq!(sheet.headers[0], "JIT Call No");
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(
            sheet.rows[0].get("JIT Call No"),
            Some(&CellValue::Text("JC001".to_string()))
        );
        assert_eq!(
            sheet.rows[1].get("Require Time"),
            Some(&CellValue::Text("0.5".to_string()))
        );
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let temp_file = csv_file(&["Vendor,Day", "V1,MONDAY", ",", "V2,TUESDAY"]);
        let sheet = CsvParser.parse(temp_file.path()).unwrap();
        assert_eq!(sheet.rows.len(), 2);
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let result = UniversalFileParser.parse(Path::new("orders.txt"));
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }

    fn excel_date(serial: f64, is_1904: bool) -> Data {
        Data::DateTime(ExcelDateTime::new(serial, ExcelDateTimeType::DateTime, is_1904))
    }

    #[test]
    fn test_excel_serial_time_only() {
        // 0.75 → 18:00
        assert_eq!(
            excel_cell_value(&excel_date(0.75, false)),
            CellValue::Time(NaiveTime::from_hms_opt(18, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_excel_serial_date_and_datetime() {
        // 45663 → 2025-01-06
        assert_eq!(
            excel_cell_value(&excel_date(45663.0, false)),
            CellValue::Date(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap())
        );
        assert_eq!(
            excel_cell_value(&excel_date(45663.5, false)),
            CellValue::DateTime(
                NaiveDate::from_ymd_opt(2025, 1, 6)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap()
            )
        );
    }

    #[test]
    fn test_excel_serial_1904_date_system() {
        // 1904 日期系统: 44201 → 2025-01-06
        assert_eq!(
            excel_cell_value(&excel_date(44201.0, true)),
            CellValue::Date(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap())
        );
    }

    #[test]
    fn test_excel_duration_cell() {
        // [h]:mm:ss 25:00:00
        let cell = Data::DateTime(ExcelDateTime::new(
            25.0 / 24.0,
            ExcelDateTimeType::TimeDelta,
            false,
        ));
        assert_eq!(
            excel_cell_value(&cell),
            CellValue::Duration(chrono::Duration::hours(25))
        );
    }

    #[test]
    fn test_excel_duration_out_of_range_is_empty() {
        let cell = Data::DateTime(ExcelDateTime::new(-1e300, ExcelDateTimeType::TimeDelta, false));
        assert_eq!(excel_cell_value(&cell), CellValue::Empty);
    }

    #[test]
    fn test_serial_without_format_uses_1900_system() {
        assert_eq!(
            excel_serial_to_datetime(45663.0).map(|dt| dt.date()),
            NaiveDate::from_ymd_opt(2025, 1, 6)
        );
    }

    #[test]
    fn test_excel_cell_conversion() {
        assert_eq!(excel_cell_value(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(excel_cell_value(&Data::Empty), CellValue::Empty);
        assert_eq!(
            excel_cell_value(&Data::String(" ACME ".to_string())),
            CellValue::Text("ACME".to_string())
        );
        assert_eq!(
            excel_cell_value(&Data::DateTimeIso("2025-01-06".to_string())),
            CellValue::Date(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap())
        );
    }
}
