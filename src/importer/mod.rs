// ==========================================
// JIT 窗口分配系统 - 导入层
// ==========================================
// 职责: 外部文件 → 类型化的 Order / WindowDefinition
// 支持: Excel, CSV
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod order_importer;
pub mod schedule_importer;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, ParsedSheet, RawRow, UniversalFileParser};
pub use order_importer::{ImportedOrders, OrderImporter};
pub use schedule_importer::{ImportedSchedule, ScheduleImporter};

// 重导出 Trait 接口
pub use importer_trait::{FileParser, JitCallImporter};
