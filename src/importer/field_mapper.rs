// ==========================================
// JIT 窗口分配系统 - 字段映射器实现
// ==========================================
// 职责: 列存在性校验 + 源列 → 领域字段映射 + 类型转换
// 红线: 列缺失报错; 单元格无法解析只会得到 None
// ==========================================

use crate::config::app_config::{ColumnSpec, OrderColumns, WindowColumns};
use crate::domain::order::Order;
use crate::domain::types::CellValue;
use crate::domain::window::WindowDefinition;
use crate::engine::time_normalizer::{decimal_fraction_of_day, normalize_time_of_day};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;

/// 解析后的订单列（文件中的实际列名）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOrderColumns {
    pub id: Option<String>,
    pub vendor: String,
    pub required_date: String,
    pub required_time: String,
}

/// 解析后的窗口列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWindowColumns {
    pub vendor: String,
    pub weekday: String,
    pub window_name: String,
    pub start_time: String,
    pub end_time: String,
}

pub struct FieldMapper {
    order_columns: OrderColumns,
    window_columns: WindowColumns,
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new(order_columns: OrderColumns, window_columns: WindowColumns) -> Self {
        Self {
            order_columns,
            window_columns,
            cleaner: DataCleaner,
        }
    }

    // ==========================================
    // 列存在性校验
    // ==========================================

    /// 校验订单文件列
    ///
    /// 订单号列可缺失（缺失时使用行号）；供应商/日期/时间必须存在
    pub fn resolve_order_columns(
        &self,
        headers: &[String],
        file: &str,
    ) -> ImportResult<ResolvedOrderColumns> {
        let cols = &self.order_columns;
        let mut missing = Vec::new();

        let vendor = require(headers, &cols.vendor, &mut missing);
        let required_date = require(headers, &cols.required_date, &mut missing);
        let required_time = require(headers, &cols.required_time, &mut missing);

        match (vendor, required_date, required_time) {
            (Some(vendor), Some(required_date), Some(required_time)) => Ok(ResolvedOrderColumns {
                id: find_column(headers, &cols.id),
                vendor,
                required_date,
                required_time,
            }),
            _ => Err(ImportError::MissingColumns {
                file: file.to_string(),
                columns: missing,
            }),
        }
    }

    /// 校验窗口计划文件列（全部必需）
    pub fn resolve_window_columns(
        &self,
        headers: &[String],
        file: &str,
    ) -> ImportResult<ResolvedWindowColumns> {
        let cols = &self.window_columns;
        let mut missing = Vec::new();

        let vendor = require(headers, &cols.vendor, &mut missing);
        let weekday = require(headers, &cols.weekday, &mut missing);
        let window_name = require(headers, &cols.window_name, &mut missing);
        let start_time = require(headers, &cols.start_time, &mut missing);
        let end_time = require(headers, &cols.end_time, &mut missing);

        match (vendor, weekday, window_name, start_time, end_time) {
            (Some(vendor), Some(weekday), Some(window_name), Some(start_time), Some(end_time)) => {
                Ok(ResolvedWindowColumns {
                    vendor,
                    weekday,
                    window_name,
                    start_time,
                    end_time,
                })
            }
            _ => Err(ImportError::MissingColumns {
                file: file.to_string(),
                columns: missing,
            }),
        }
    }

    // ==========================================
    // 行映射
    // ==========================================

    /// 原始行 → Order
    ///
    /// # 参数
    /// - row_number: 行号（1 起，不含表头）
    pub fn map_order(
        &self,
        row: &RawRow,
        columns: &ResolvedOrderColumns,
        row_number: usize,
    ) -> Order {
        let id = columns
            .id
            .as_ref()
            .and_then(|c| self.cleaner.cell_text(row.get(c)))
            .unwrap_or_else(|| format!("ROW-{}", row_number));
        let vendor = self
            .cleaner
            .cell_text(row.get(&columns.vendor))
            .unwrap_or_default();
        let time_cell = self.cleaner.coerce_numeric_text(row.get(&columns.required_time));

        Order {
            id,
            vendor,
            required_date: self.cleaner.parse_date(row.get(&columns.required_date)),
            required_time: normalize_time_of_day(&time_cell),
            row_number,
        }
    }

    /// 原始行 → WindowDefinition
    pub fn map_window(
        &self,
        row: &RawRow,
        columns: &ResolvedWindowColumns,
        row_number: usize,
    ) -> WindowDefinition {
        let boundary = |column: &String| -> Option<f64> {
            let cell = self.cleaner.coerce_numeric_text(row.get(column));
            decimal_fraction_of_day(&cell)
        };

        WindowDefinition {
            vendor: self
                .cleaner
                .cell_text(row.get(&columns.vendor))
                .unwrap_or_default(),
            weekday: self.cleaner.parse_weekday(row.get(&columns.weekday)),
            window_name: self
                .cleaner
                .cell_text(row.get(&columns.window_name))
                .unwrap_or_default(),
            start_fraction: boundary(&columns.start_time),
            end_fraction: boundary(&columns.end_time),
            row_number,
        }
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new(OrderColumns::default(), WindowColumns::default())
    }
}

/// 在表头中查找列（主列名优先, 再试别名; TRIM + 大小写不敏感）
fn find_column(headers: &[String], spec: &ColumnSpec) -> Option<String> {
    spec.candidates().find_map(|candidate| {
        let wanted = candidate.trim();
        headers
            .iter()
            .find(|h| h.trim().eq_ignore_ascii_case(wanted))
            .cloned()
    })
}

fn require(headers: &[String], spec: &ColumnSpec, missing: &mut Vec<String>) -> Option<String> {
    let found = find_column(headers, spec);
    if found.is_none() {
        missing.push(spec.name.clone());
    }
    found
}
