// ==========================================
// 乳腺癌治疗规划系统 - 引擎层
// ==========================================
// 职责: 分型 / 查表 / 曲线 / 概率 / 建议, 全部为纯函数
// 红线: 引擎不读文件、不持有可变状态, 所有规则必须可追溯
// ==========================================

pub mod narrator;
pub mod orchestrator;
pub mod prognosis_curve;
pub mod risk_estimator;
pub mod subtype_classifier;
pub mod treatment_catalog;

// 重导出核心引擎
pub use narrator::RecommendationNarrator;
pub use orchestrator::AssessmentOrchestrator;
pub use prognosis_curve::PrognosisCurveGenerator;
pub use risk_estimator::{arm_multipliers, RiskProbabilityEstimator};
pub use subtype_classifier::{SubtypeClassifier, SubtypeRule, SUBTYPE_RULES};
pub use treatment_catalog::TreatmentCatalog;
