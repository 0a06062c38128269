// ==========================================
// 乳腺癌治疗规划系统 - 录入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分两层: ValidationError (单字段) / ImportError (文件/批次)
// ==========================================

use serde::Serialize;
use thiserror::Error;

/// 单字段校验错误 (一条记录可同时产生多条)
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("必填字段缺失: {field}")]
    MissingField { field: String },

    #[error("数值格式错误 (字段 {field}): {value}")]
    InvalidNumber { field: String, value: String },

    #[error("数值超出范围 (字段 {field}): 值 {value} 不在 {range} 内")]
    OutOfRange {
        field: String,
        value: f64,
        range: String,
    },

    #[error("无法识别的取值 (字段 {field}): {value}")]
    UnrecognizedValue { field: String, value: String },
}

impl ValidationError {
    /// 出错字段名
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::InvalidNumber { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::UnrecognizedValue { field, .. } => field,
        }
    }
}

/// 录入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 批次错误 =====
    #[error("批次行数超限: 已读取 {rows} 行 (上限 {limit})")]
    RowLimitExceeded { rows: usize, limit: usize },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_field() {
        let err = ValidationError::OutOfRange {
            field: "ki67_pct".to_string(),
            value: 130.0,
            range: "[0, 100]".to_string(),
        };
        assert_eq!(err.field(), "ki67_pct");
        assert!(err.to_string().contains("130"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ImportError = io.into();
        assert!(matches!(err, ImportError::FileReadError(_)));
    }
}
