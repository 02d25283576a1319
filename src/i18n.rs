// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）、西班牙文、中文
// 只用于导出/预览的显示文本, 核心值始终是规范枚举
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use crate::domain::types::{WindowAssignment, Weekday};

/// 支持的语言
pub const SUPPORTED_LOCALES: &[&str] = &["en", "es", "zh-CN"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en" / "es" / "zh-CN"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 是否为支持的语言
pub fn is_supported(locale: &str) -> bool {
    SUPPORTED_LOCALES.contains(&locale)
}

/// 翻译消息（指定语言）
pub fn t_in(key: &str, locale: &str) -> String {
    rust_i18n::t!(key, locale = locale).to_string()
}

/// 星期显示名
pub fn weekday_label(day: Weekday, locale: &str) -> String {
    t_in(&day.i18n_key(), locale)
}

/// 分配结果显示名（窗口名原样输出，哨兵值翻译）
pub fn assignment_label(assignment: &WindowAssignment, locale: &str) -> String {
    match assignment {
        WindowAssignment::Window(name) => name.clone(),
        WindowAssignment::NoDate => t_in("assignment.no_date", locale),
        WindowAssignment::OutOfWindow => t_in("assignment.out_of_window", locale),
    }
}
