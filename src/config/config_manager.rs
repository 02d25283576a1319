// ==========================================
// JIT 窗口分配系统 - 配置管理器
// ==========================================
// 职责: 配置加载、保存、默认路径
// 存储: JSON 文件（缺失时使用默认配置）
// ==========================================

use crate::config::app_config::AppConfig;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置目录名
pub const CONFIG_DIR_NAME: &str = "jit-window-assign";

/// 配置文件名
pub const CONFIG_FILE_NAME: &str = "config.json";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置文件写入失败 ({path}): {message}")]
    Write { path: String, message: String },

    #[error("无法确定配置目录")]
    NoConfigDir,
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AppConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用默认配置
    pub fn with_defaults() -> Self {
        Self {
            config: AppConfig::default(),
            source: None,
        }
    }

    /// 从指定文件加载
    ///
    /// # 返回
    /// - Err(Read): 文件不存在或无法读取
    /// - Err(Parse): JSON 格式错误
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: AppConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;

        info!(path = %path.display(), "已加载配置文件");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// 加载配置: 显式路径优先, 否则默认路径, 文件不存在时使用默认配置
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match default_config_path() {
            Ok(default_path) if default_path.exists() => Self::load(&default_path),
            _ => {
                debug!("未找到配置文件，使用默认配置");
                Ok(Self::with_defaults())
            }
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// 配置来源文件（默认配置时为 None）
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 保存配置到文件（自动创建父目录）
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |message: String| ConfigError::Write {
            path: path.display().to_string(),
            message,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        let json =
            serde_json::to_string_pretty(&self.config).map_err(|e| write_err(e.to_string()))?;
        fs::write(path, json).map_err(|e| write_err(e.to_string()))?;

        info!(path = %path.display(), "配置文件已保存");
        Ok(())
    }
}

/// 默认配置路径: <config_dir>/jit-window-assign/config.json
///
/// 平台无用户配置目录时返回 NoConfigDir
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    config_path_in(dirs::config_dir())
}

fn config_path_in(config_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    config_dir
        .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::app_config::ElapsedCheck;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"{{"locale": "es", "elapsed_check": {{"mode": "system_clock"}}}}"#
        )
        .unwrap();

        let manager = ConfigManager::load(temp_file.path()).unwrap();
        assert_eq!(manager.config().locale, "es");
        assert_eq!(manager.config().elapsed_check, ElapsedCheck::SystemClock);
        assert_eq!(manager.source(), Some(temp_file.path()));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "{{ not json").unwrap();

        let result = ConfigManager::load(temp_file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let result = ConfigManager::load(Path::new("no_such_config.json"));
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_config_path_requires_config_dir() {
        assert!(matches!(config_path_in(None), Err(ConfigError::NoConfigDir)));

        let path = config_path_in(Some(PathBuf::from("/home/ops/.config"))).unwrap();
        assert!(path.ends_with("jit-window-assign/config.json"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut manager = ConfigManager::with_defaults();
        manager.config_mut().preview_rows = 5;
        manager.save(&path).unwrap();

        let reloaded = ConfigManager::load(&path).unwrap();
        assert_eq!(reloaded.config().preview_rows, 5);
        assert_eq!(reloaded.config().window_columns.window_name.name, "Ventana");
    }
}
