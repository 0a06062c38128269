// ==========================================
// 乳腺癌治疗规划系统 - 领域模型层
// ==========================================
// 职责: 定义患者画像、分型、方案与预后结果类型
// 红线: 不含引擎逻辑, 不含文件/界面逻辑
// ==========================================

pub mod outcome;
pub mod patient;
pub mod subtype;
pub mod types;

// 重导出核心类型
pub use outcome::{
    ArmMultipliers, ArmOutcome, PatientAssessment, PrognosisCurve, PrognosisCurveSet,
    ProfileContext, RiskEstimate, RiskFactor, RiskProbabilities, HORIZON_MONTHS,
};
pub use patient::{BiomarkerPanel, PatientProfile, RawPatientRecord};
pub use subtype::{MolecularSubtype, TreatmentPlan};
pub use types::{
    CancerStage, MenopauseStatus, PrognosisBand, Sex, SubtypeCode, TherapyArm, TherapyType,
};
