// ==========================================
// 乳腺癌治疗规划系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 来源优先级: 显式文件 > 用户配置目录 > 内置默认值
// 存储: JSON 文件 (AppConfig)
// ==========================================

use crate::config::app_config::{AppConfig, LogFormat};
use crate::domain::types::TherapyArm;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const APP_CONFIG_DIR: &str = "onco-planner";
const CONFIG_FILE_NAME: &str = "config.json";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    FileRead { path: String, message: String },

    #[error("配置文件解析失败 ({path}): {message}")]
    Parse { path: String, message: String },

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("未知配置键: {0}")]
    UnknownKey(String),
}

// ==========================================
// ConfigSource - 配置来源
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),        // 显式指定的文件
    UserDefault(PathBuf), // 用户配置目录下的 config.json
    BuiltIn,              // 内置默认值
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AppConfig,
    source: ConfigSource,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            source: ConfigSource::BuiltIn,
        }
    }
}

impl ConfigManager {
    /// 按优先级加载配置
    ///
    /// # 参数
    /// - explicit_path: 命令行指定的配置文件（指定则必须存在）
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                let config = read_config_file(&path)?;
                info!(path = %path.display(), "已加载用户配置");
                Ok(Self {
                    config,
                    source: ConfigSource::UserDefault(path),
                })
            }
            _ => {
                debug!("未找到配置文件, 使用内置默认值");
                Ok(Self::default())
            }
        }
    }

    /// 从指定 JSON 文件加载
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = read_config_file(path)?;
        info!(path = %path.display(), "已加载配置文件");
        Ok(Self {
            config,
            source: ConfigSource::File(path.to_path_buf()),
        })
    }

    /// 从内存中的配置构建（已做校验）
    pub fn from_config(config: AppConfig) -> Result<Self, ConfigError> {
        validate(&config)?;
        Ok(Self {
            config,
            source: ConfigSource::BuiltIn,
        })
    }

    /// 用户配置目录下的默认路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn into_config(self) -> AppConfig {
        self.config
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// 按键读取配置值（字符串形式）
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let c = &self.config;
        let value = match key {
            config_keys::DEFAULT_ARM => c.default_arm.as_code().to_string(),
            config_keys::COMPARE_ALL_ARMS => c.compare_all_arms.to_string(),
            config_keys::LOG_FILTER => c.log_filter.clone(),
            config_keys::LOG_FORMAT => c.log_format.to_string(),
            config_keys::BATCH_ROW_LIMIT => c.batch_row_limit.to_string(),
            config_keys::CSV_DELIMITER => c.csv_delimiter.to_string(),
            config_keys::PRETTY_JSON => c.pretty_json.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        };
        Ok(value)
    }

    /// 按键覆写配置值（命令行 --set key=value）
    ///
    /// 覆写失败时原配置保持不变
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut next = self.config.clone();
        let invalid = |message: &str| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            message: message.to_string(),
        };

        match key {
            config_keys::DEFAULT_ARM => {
                next.default_arm =
                    TherapyArm::parse(value).ok_or_else(|| invalid("未知治疗方案编码"))?;
            }
            config_keys::COMPARE_ALL_ARMS => {
                next.compare_all_arms = parse_bool(value).ok_or_else(|| invalid("期望 true/false"))?;
            }
            config_keys::LOG_FILTER => next.log_filter = value.trim().to_string(),
            config_keys::LOG_FORMAT => {
                next.log_format =
                    LogFormat::from_str(value).ok_or_else(|| invalid("期望 pretty/json"))?;
            }
            config_keys::BATCH_ROW_LIMIT => {
                next.batch_row_limit = value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| invalid("期望正整数"))?;
            }
            config_keys::CSV_DELIMITER => {
                let mut chars = value.chars();
                next.csv_delimiter = match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => return Err(invalid("期望单个字符")),
                };
            }
            config_keys::PRETTY_JSON => {
                next.pretty_json = parse_bool(value).ok_or_else(|| invalid("期望 true/false"))?;
            }
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }

        validate(&next)?;
        debug!(key, value, "配置已覆写");
        self.config = next;
        Ok(())
    }

    /// 获取配置快照（JSON格式）
    pub fn snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.config)
    }
}

fn read_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let config: AppConfig = serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    validate(&config)?;
    Ok(config)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// 配置值校验
fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.batch_row_limit == 0 {
        return Err(ConfigError::InvalidValue {
            key: config_keys::BATCH_ROW_LIMIT.to_string(),
            value: "0".to_string(),
            message: "必须大于 0".to_string(),
        });
    }

    let d = config.csv_delimiter;
    if !d.is_ascii() || d.is_ascii_alphanumeric() || d == '"' || d == '\n' || d == '\r' {
        return Err(ConfigError::InvalidValue {
            key: config_keys::CSV_DELIMITER.to_string(),
            value: d.to_string(),
            message: "必须为 ASCII 标点或空白".to_string(),
        });
    }

    if config.log_filter.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            key: config_keys::LOG_FILTER.to_string(),
            value: config.log_filter.clone(),
            message: "不能为空".to_string(),
        });
    }

    Ok(())
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 评估
    pub const DEFAULT_ARM: &str = "default_arm";
    pub const COMPARE_ALL_ARMS: &str = "compare_all_arms";

    // 日志
    pub const LOG_FILTER: &str = "log_filter";
    pub const LOG_FORMAT: &str = "log_format";

    // 批量录入
    pub const BATCH_ROW_LIMIT: &str = "batch_row_limit";
    pub const CSV_DELIMITER: &str = "csv_delimiter";

    // 输出
    pub const PRETTY_JSON: &str = "pretty_json";

    pub const ALL: [&str; 7] = [
        DEFAULT_ARM,
        COMPARE_ALL_ARMS,
        LOG_FILTER,
        LOG_FORMAT,
        BATCH_ROW_LIMIT,
        CSV_DELIMITER,
        PRETTY_JSON,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let manager = ConfigManager::default();
        assert_eq!(manager.config().default_arm, TherapyArm::Combined);
        assert_eq!(manager.source(), &ConfigSource::BuiltIn);
        for key in config_keys::ALL {
            assert!(manager.get(key).is_ok(), "key={}", key);
        }
    }

    #[test]
    fn test_from_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"default_arm": "targetHormonal", "csv_delimiter": ";"}"#).unwrap();

        let manager = ConfigManager::load(Some(&path)).unwrap();
        assert_eq!(manager.config().default_arm, TherapyArm::TargetHormonal);
        assert_eq!(manager.config().csv_delimiter_byte(), b';');
        // 未写字段取默认值
        assert_eq!(manager.config().batch_row_limit, 10_000);
        assert_eq!(manager.source(), &ConfigSource::File(path));
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            ConfigManager::from_file(&missing),
            Err(ConfigError::FileRead { .. })
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(
            ConfigManager::from_file(&broken),
            Err(ConfigError::Parse { .. })
        ));

        let invalid = dir.path().join("invalid.json");
        fs::write(&invalid, r#"{"batch_row_limit": 0}"#).unwrap();
        assert!(matches!(
            ConfigManager::from_file(&invalid),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_set_and_get() {
        let mut manager = ConfigManager::default();

        manager.set(config_keys::DEFAULT_ARM, "targetImmuno").unwrap();
        manager.set(config_keys::LOG_FORMAT, "JSON").unwrap();
        manager.set(config_keys::BATCH_ROW_LIMIT, "50").unwrap();

        assert_eq!(manager.get(config_keys::DEFAULT_ARM).unwrap(), "targetImmuno");
        assert_eq!(manager.get(config_keys::LOG_FORMAT).unwrap(), "json");
        assert_eq!(manager.config().batch_row_limit, 50);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut manager = ConfigManager::default();

        assert!(manager.set(config_keys::DEFAULT_ARM, "surgery").is_err());
        assert!(manager.set(config_keys::CSV_DELIMITER, "ab").is_err());
        assert!(manager.set(config_keys::CSV_DELIMITER, "x").is_err());
        assert!(manager.set(config_keys::BATCH_ROW_LIMIT, "0").is_err());
        assert!(matches!(
            manager.set("season_mode", "auto"),
            Err(ConfigError::UnknownKey(_))
        ));

        // 失败不改动原配置
        assert_eq!(manager.config(), &AppConfig::default());
    }

    #[test]
    fn test_snapshot_round_trip() {
        let manager = ConfigManager::default();
        let json = manager.snapshot().unwrap();
        let restored: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(&restored, manager.config());
    }
}
