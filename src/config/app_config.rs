use crate::domain::types::TherapyArm;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl LogFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// 应用配置（持久化对象）
///
/// 存储位置：JSON 文件，缺失字段取默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 未指定方案时使用的治疗方案
    pub default_arm: TherapyArm,

    /// 单条评估时是否附带四方案对比
    pub compare_all_arms: bool,

    /// tracing EnvFilter 表达式（RUST_LOG 优先）
    pub log_filter: String,

    /// 日志格式（pretty/json）
    pub log_format: LogFormat,

    /// CSV 单批最大数据行数
    pub batch_row_limit: usize,

    /// CSV 分隔符（单个 ASCII 字符）
    pub csv_delimiter: char,

    /// JSON 输出是否缩进
    pub pretty_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_arm: TherapyArm::Combined,
            compare_all_arms: false,
            log_filter: "onco_planner=info".to_string(),
            log_format: LogFormat::Pretty,
            batch_row_limit: 10_000,
            csv_delimiter: ',',
            pretty_json: true,
        }
    }
}

impl AppConfig {
    /// CSV 分隔符字节（校验通过后必为 ASCII）
    pub fn csv_delimiter_byte(&self) -> u8 {
        if self.csv_delimiter.is_ascii() {
            self.csv_delimiter as u8
        } else {
            b','
        }
    }
}
