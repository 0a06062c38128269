// ==========================================
// 乳腺癌治疗规划系统 - 核心库
// ==========================================
// 技术栈: Rust + serde + tracing
// 系统定位: 决策支持系统 (医生最终决策)
// 红线: 引擎层全部为纯函数, 同一输入必得同一输出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分型/指南/曲线/概率/建议
pub mod engine;

// 录入层 - 外部数据校验
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 隐私保护 - PII 筛查与脱敏
pub mod privacy;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    CancerStage, MenopauseStatus, PrognosisBand, Sex, SubtypeCode, TherapyArm, TherapyType,
};

// 领域实体
pub use domain::{
    ArmOutcome, BiomarkerPanel, MolecularSubtype, PatientAssessment, PatientProfile,
    PrognosisCurve, PrognosisCurveSet, RawPatientRecord, RiskProbabilities, TreatmentPlan,
};

// 引擎
pub use engine::{
    AssessmentOrchestrator, PrognosisCurveGenerator, RecommendationNarrator,
    RiskProbabilityEstimator, SubtypeClassifier, TreatmentCatalog,
};

// API
pub use api::{ApiError, ApiResult, AssessmentApi, AssessmentRequest, AssessmentResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "乳腺癌治疗规划系统";
