// ==========================================
// JIT 窗口分配系统 - 窗口计划导入器
// ==========================================
// 流程: 解析 → 列校验 → 映射 → 构建 WindowSchedule
// 红线: 边界或星期无法解析的行保留计数, 不阻断导入
// ==========================================

use crate::domain::window::WindowDefinition;
use crate::engine::window_matcher::WindowSchedule;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::importer_trait::FileParser;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// 窗口计划导入结果
#[derive(Debug, Clone)]
pub struct ImportedSchedule {
    pub schedule: WindowSchedule,
    pub total_rows: usize,
    pub unknown_weekday: usize,   // 星期无法识别（已丢弃）
    pub missing_bounds: usize,    // 开始/结束时刻无法解析（匹配时跳过）
}

pub struct ScheduleImporter {
    file_parser: Arc<dyn FileParser>,
    field_mapper: Arc<FieldMapper>,
}

impl ScheduleImporter {
    pub fn new(file_parser: Arc<dyn FileParser>, field_mapper: Arc<FieldMapper>) -> Self {
        Self {
            file_parser,
            field_mapper,
        }
    }

    /// 导入窗口计划文件
    #[instrument(skip(self, file_path), fields(file = %file_path.display()))]
    pub fn import(&self, file_path: &Path) -> ImportResult<ImportedSchedule> {
        let sheet = self.file_parser.parse(file_path)?;
        let columns = self
            .field_mapper
            .resolve_window_columns(&sheet.headers, &file_path.display().to_string())?;

        let definitions: Vec<WindowDefinition> = sheet
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.field_mapper.map_window(row, &columns, idx + 1))
            .collect();

        let total_rows = definitions.len();
        let unknown_weekday = definitions.iter().filter(|d| d.weekday.is_none()).count();
        let missing_bounds = definitions.iter().filter(|d| d.bounds().is_none()).count();
        if missing_bounds > 0 {
            warn!(missing_bounds, "部分窗口开始/结束时刻无法解析，匹配时将跳过");
        }

        let schedule = WindowSchedule::new(definitions);
        info!(
            windows = schedule.len(),
            vendors = schedule.vendor_count(),
            "窗口计划导入完成"
        );

        Ok(ImportedSchedule {
            schedule,
            total_rows,
            unknown_weekday,
            missing_bounds,
        })
    }
}
