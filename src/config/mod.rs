// ==========================================
// 乳腺癌治疗规划系统 - 配置层
// ==========================================
// 职责: 系统配置管理, 支持文件加载与命令行覆写
// 存储: JSON 文件
// ==========================================

pub mod app_config;
pub mod config_manager;

// 重导出核心配置管理器
pub use app_config::{AppConfig, LogFormat};
pub use config_manager::{config_keys, ConfigError, ConfigManager, ConfigSource};
