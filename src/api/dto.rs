// ==========================================
// 乳腺癌治疗规划系统 - API 请求/响应结构
// ==========================================
// 红线: 响应中不出现原始姓名, 只出现显示名与患者编码
// ==========================================

use crate::domain::outcome::{ArmOutcome, PrognosisCurveSet};
use crate::domain::patient::{PatientProfile, RawPatientRecord};
use crate::domain::subtype::{MolecularSubtype, TreatmentPlan};
use crate::importer::ValidationError;
use crate::privacy::PiiKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单条评估请求
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentRequest {
    /// 原始录入记录 (含可选姓名)
    pub record: RawPatientRecord,

    /// 选择的治疗方案编码, 缺省取配置 default_arm
    #[serde(default)]
    pub arm: Option<String>,

    /// 是否附带四方案对比, 缺省取配置 compare_all_arms
    #[serde(default)]
    pub compare: Option<bool>,
}

impl AssessmentRequest {
    pub fn new(record: RawPatientRecord) -> Self {
        Self {
            record,
            arm: None,
            compare: None,
        }
    }

    pub fn with_arm(mut self, arm: &str) -> Self {
        self.arm = Some(arm.to_string());
        self
    }

    pub fn with_compare(mut self, compare: bool) -> Self {
        self.compare = Some(compare);
        self
    }
}

/// 单条评估响应
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentResponse {
    pub assessment_id: String,
    pub assessed_at: DateTime<Utc>,

    // ===== 身份 (已脱敏) =====
    pub patient_code: String,
    pub display_name: String,
    /// 姓名字段命中的 PII 类别 (仅提示)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pii_warnings: Vec<PiiKind>,

    // ===== 画像 + 分型 + 指南 =====
    pub profile: PatientProfile,
    pub subtype: MolecularSubtype,
    pub matched_rule: String,
    pub plan: TreatmentPlan,

    // ===== 方案模拟 =====
    pub selected: ArmOutcome,
    /// 四条曲线 (对比图)
    pub curves: PrognosisCurveSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Vec<ArmOutcome>>,
}

/// 批量评估中被拒绝的行
#[derive(Debug, Clone, Serialize)]
pub struct RowFailure {
    pub row_number: usize,
    pub errors: Vec<ValidationError>,
}

/// 批量评估中通过的行
#[derive(Debug, Clone, Serialize)]
pub struct RowAssessment {
    pub row_number: usize,
    pub response: AssessmentResponse,
}

/// 批量评估报告
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_id: String,
    pub source: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub total_rows: usize,
    pub assessed: Vec<RowAssessment>,
    pub failed: Vec<RowFailure>,
}
