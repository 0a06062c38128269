// ==========================================
// 乳腺癌治疗规划系统 - API层错误类型
// ==========================================
// 职责: 汇总录入/配置错误, 转换为调用方可读的错误消息
// 红线: 每条错误必须带显式原因 (字段 / 行号 / 取值)
// ==========================================

use crate::config::ConfigError;
use crate::importer::{ImportError, ValidationError};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    /// 单条记录校验失败 (全部字段错误)
    #[error("数据验证失败: {}", summarize(.0))]
    ValidationFailed(Vec<ValidationError>),

    // ==========================================
    // 录入与配置错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportFailed(#[from] ImportError),

    #[error("配置错误: {0}")]
    ConfigFailed(#[from] ConfigError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<Vec<ValidationError>> for ApiError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ApiError::ValidationFailed(errors)
    }
}

impl ApiError {
    /// 校验错误明细 (非校验错误返回空)
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ApiError::ValidationFailed(errors) => errors,
            _ => &[],
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type ApiResult<T> = Result<T, ApiError>;
