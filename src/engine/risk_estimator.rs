// ==========================================
// 乳腺癌治疗规划系统 - 结局概率估算引擎
// ==========================================
// 职责: 患者画像 + 治疗方案 → 生存/转移/成功概率 (%)
// 模型: 加性启发式评分 → 方案乘数 → 取整 → 钳制到 [0,100]
// 红线: 所有调整项必须输出到 factors (可解释性)
// ==========================================

use crate::domain::outcome::{ArmMultipliers, RiskEstimate, RiskFactor, RiskProbabilities};
use crate::domain::patient::PatientProfile;
use crate::domain::types::TherapyArm;
use tracing::{debug, instrument};

// ===== 基础值 =====
const BASE_SURVIVAL: i32 = 85;
const BASE_METASTASIS: i32 = 25;
const BASE_SUCCESS: i32 = 70;

// ===== 年龄阈值 =====
const AGE_PENALTY_THRESHOLD: u32 = 60;
const AGE_SEVERE_PENALTY_THRESHOLD: u32 = 70;

// 注意: 阈值 30 与录入范围 (0,20] cm 单位不一致 (原始表单以 mm 录入),
// 校验后的输入永远不会触发该项。保留原值, 待临床确认单位后再调整。
const TUMOR_SIZE_PENALTY_THRESHOLD: f64 = 30.0;

// ===== Ki67 阈值 (高阈值优先判定, 互斥) =====
const KI67_HIGH_THRESHOLD: f64 = 30.0;
const KI67_MODERATE_THRESHOLD: f64 = 20.0;

/// 方案乘数表
pub fn arm_multipliers(arm: TherapyArm) -> ArmMultipliers {
    match arm {
        TherapyArm::None => ArmMultipliers {
            survival: 0.6,
            metastasis: 1.8,
            success: 0.3,
        },
        TherapyArm::TargetImmuno => ArmMultipliers {
            survival: 1.1,
            metastasis: 0.7,
            success: 1.2,
        },
        TherapyArm::TargetHormonal => ArmMultipliers {
            survival: 1.2,
            metastasis: 0.6,
            success: 1.3,
        },
        TherapyArm::Combined => ArmMultipliers {
            survival: 1.4,
            metastasis: 0.4,
            success: 1.5,
        },
    }
}

/// 乘数后取整并钳制
fn scale_and_clamp(base: i32, factor: f64) -> u8 {
    (base as f64 * factor).round().clamp(0.0, 100.0) as u8
}

// ==========================================
// 评分累加器
// ==========================================
struct ScoreSheet {
    survival: i32,
    metastasis: i32,
    success: i32,
    factors: Vec<RiskFactor>,
}

impl ScoreSheet {
    fn new() -> Self {
        Self {
            survival: BASE_SURVIVAL,
            metastasis: BASE_METASTASIS,
            success: BASE_SUCCESS,
            factors: Vec::new(),
        }
    }

    fn apply(&mut self, code: &str, survival: i32, metastasis: i32, success: i32) {
        self.survival += survival;
        self.metastasis += metastasis;
        self.success += success;
        self.factors.push(RiskFactor {
            code: code.to_string(),
            survival_delta: survival,
            metastasis_delta: metastasis,
            success_delta: success,
        });
    }
}

// ==========================================
// RiskProbabilityEstimator - 结局概率估算引擎
// ==========================================
pub struct RiskProbabilityEstimator {
    // 无状态引擎
}

impl Default for RiskProbabilityEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskProbabilityEstimator {
    pub fn new() -> Self {
        Self {}
    }

    /// 估算结局概率
    pub fn estimate(&self, profile: &PatientProfile, arm: TherapyArm) -> RiskProbabilities {
        self.estimate_with_factors(profile, arm).probabilities
    }

    /// 按原始方案编码估算, 未识别编码使用 none 方案乘数
    pub fn estimate_for_code(&self, profile: &PatientProfile, arm_code: &str) -> RiskProbabilities {
        self.estimate(profile, TherapyArm::from_code(arm_code))
    }

    /// 估算结局概率并返回调整轨迹
    ///
    /// 规则 (顺序累加):
    /// 1) 基础值 survival=85, metastasis=25, success=70
    /// 2) age>60 → survival-10; age>70 → 再 survival-5
    /// 3) tumour_size_cm>30 → survival-15, metastasis+20, success-10
    /// 4) ki67>30 → -15/+15/-10; 否则 ki67>20 → -8/+8/-5
    /// 5) ER+ 且内分泌方案 → survival+10, success+15;
    ///    HER2+ 且免疫方案 → survival+8, success+12
    /// 6) 乘以方案乘数, 取整, 钳制到 [0,100]
    #[instrument(skip(self, profile), fields(age = profile.age, ki67 = profile.ki67_pct))]
    pub fn estimate_with_factors(&self, profile: &PatientProfile, arm: TherapyArm) -> RiskEstimate {
        let mut sheet = ScoreSheet::new();

        // 年龄 (两项独立累加)
        if profile.age > AGE_PENALTY_THRESHOLD {
            sheet.apply("AGE_OVER_60", -10, 0, 0);
        }
        if profile.age > AGE_SEVERE_PENALTY_THRESHOLD {
            sheet.apply("AGE_OVER_70", -5, 0, 0);
        }

        // 肿瘤大小
        if profile.tumour_size_cm > TUMOR_SIZE_PENALTY_THRESHOLD {
            sheet.apply("TUMOR_SIZE_OVER_30", -15, 20, -10);
        }

        // 增殖指数
        if profile.ki67_pct > KI67_HIGH_THRESHOLD {
            sheet.apply("KI67_OVER_30", -15, 15, -10);
        } else if profile.ki67_pct > KI67_MODERATE_THRESHOLD {
            sheet.apply("KI67_OVER_20", -8, 8, -5);
        }

        // 敏感性加成 (两项独立)
        if profile.er_positive && arm.is_hormonal() {
            sheet.apply("ER_HORMONAL_SENSITIVITY", 10, 0, 15);
        }
        if profile.her2_positive && arm.is_immuno() {
            sheet.apply("HER2_IMMUNO_SENSITIVITY", 8, 0, 12);
        }

        let multipliers = arm_multipliers(arm);
        let probabilities = RiskProbabilities {
            survival_pct: scale_and_clamp(sheet.survival, multipliers.survival),
            metastasis_pct: scale_and_clamp(sheet.metastasis, multipliers.metastasis),
            success_pct: scale_and_clamp(sheet.success, multipliers.success),
        };

        debug!(
            arm = %arm,
            survival = probabilities.survival_pct,
            metastasis = probabilities.metastasis_pct,
            success = probabilities.success_pct,
            factor_count = sheet.factors.len(),
            "结局概率估算完成"
        );

        RiskEstimate {
            arm,
            probabilities,
            factors: sheet.factors,
            multipliers,
        }
    }
}
