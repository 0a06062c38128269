// ==========================================
// 乳腺癌治疗规划系统 - 预后结果领域模型
// ==========================================
// 职责: 核心引擎输出结构 (曲线 / 概率 / 评估汇总)
// 红线: 所有结果按需重算, 不持久化, 不回指 UI 状态
// ==========================================

use crate::domain::subtype::{MolecularSubtype, TreatmentPlan};
use crate::domain::types::{PrognosisBand, TherapyArm};
use serde::{Deserialize, Serialize};

/// 预测时间跨度 (月)
pub const HORIZON_MONTHS: u32 = 60;

// ==========================================
// PrognosisCurve - 单方案肿瘤大小轨迹
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrognosisCurve {
    pub arm: TherapyArm,
    pub months: Vec<u32>,    // 0..=60
    pub sizes_cm: Vec<f64>,  // 与 months 一一对应, 保留一位小数
}

impl PrognosisCurve {
    /// 指定月份的大小
    pub fn size_at_month(&self, month: u32) -> Option<f64> {
        self.months
            .iter()
            .position(|m| *m == month)
            .and_then(|idx| self.sizes_cm.get(idx).copied())
    }

    /// 第 60 个月的大小
    pub fn final_size(&self) -> Option<f64> {
        self.sizes_cm.last().copied()
    }
}

// ==========================================
// PrognosisCurveSet - 四方案对比
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrognosisCurveSet {
    pub months: Vec<u32>,
    pub none: Vec<f64>,
    pub target_immuno: Vec<f64>,
    pub target_hormonal: Vec<f64>,
    pub combined: Vec<f64>,
}

impl PrognosisCurveSet {
    /// 取出指定方案的曲线
    pub fn curve(&self, arm: TherapyArm) -> PrognosisCurve {
        let sizes = match arm {
            TherapyArm::None => &self.none,
            TherapyArm::TargetImmuno => &self.target_immuno,
            TherapyArm::TargetHormonal => &self.target_hormonal,
            TherapyArm::Combined => &self.combined,
        };
        PrognosisCurve {
            arm,
            months: self.months.clone(),
            sizes_cm: sizes.clone(),
        }
    }
}

// ==========================================
// RiskProbabilities - 结局概率 (%)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProbabilities {
    pub survival_pct: u8,   // 5 年生存
    pub metastasis_pct: u8, // 转移
    pub success_pct: u8,    // 治疗成功
}

// ==========================================
// ArmMultipliers - 方案乘数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmMultipliers {
    pub survival: f64,
    pub metastasis: f64,
    pub success: f64,
}

// ==========================================
// RiskFactor - 评分调整项 (可解释性)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub code: String,         // 规则编码, 如 AGE_OVER_60
    pub survival_delta: i32,
    pub metastasis_delta: i32,
    pub success_delta: i32,
}

// ==========================================
// RiskEstimate - 概率 + 调整轨迹
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEstimate {
    pub arm: TherapyArm,
    pub probabilities: RiskProbabilities,
    pub factors: Vec<RiskFactor>,     // 按应用顺序
    pub multipliers: ArmMultipliers,
}

// ==========================================
// ProfileContext - 画像派生上下文
// ==========================================
// 取代原前端挂在画像上的 subtype / plan 缓存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileContext {
    pub subtype: MolecularSubtype,
    pub matched_rule: String, // 命中的分型规则
    pub plan: TreatmentPlan,
}

// ==========================================
// ArmOutcome - 单方案模拟结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmOutcome {
    pub arm: TherapyArm,
    pub curve: PrognosisCurve,
    pub probabilities: RiskProbabilities,
    pub factors: Vec<RiskFactor>,
    pub band: PrognosisBand,
    pub narrative: String,
}

// ==========================================
// PatientAssessment - 完整评估
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientAssessment {
    pub context: ProfileContext,
    pub selected: ArmOutcome,
}
