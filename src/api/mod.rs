// ==========================================
// 乳腺癌治疗规划系统 - API层
// ==========================================
// 职责: 对外调用入口 (CLI / 嵌入方), 汇总录入、引擎与隐私模块
// ==========================================

pub mod assessment_api;
pub mod dto;
pub mod error;

pub use assessment_api::AssessmentApi;
pub use dto::{
    AssessmentRequest, AssessmentResponse, BatchReport, RowAssessment, RowFailure,
};
pub use error::{ApiError, ApiResult};
