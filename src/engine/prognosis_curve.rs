// ==========================================
// 乳腺癌治疗规划系统 - 预后曲线生成器
// ==========================================
// 职责: 初始肿瘤大小 + 治疗方案 → 60 个月肿瘤大小轨迹
// 模型: 闭式指数增长/衰减 + 分段下限
// 红线: 下限按月逐点生效; 不得输出负数或非有限值
// ==========================================

use crate::domain::outcome::{PrognosisCurve, PrognosisCurveSet, HORIZON_MONTHS};
use crate::domain::types::TherapyArm;
use tracing::debug;

// ===== 模型参数 =====
const UNTREATED_GROWTH_RATE: f64 = 0.02;
const IMMUNO_EARLY_DECAY_RATE: f64 = 0.05;
const IMMUNO_RESPONSE_MONTH: u32 = 12;
const IMMUNO_RESIDUAL_FRACTION: f64 = 0.3;
const IMMUNO_LATE_DECAY_RATE: f64 = 0.01;
const IMMUNO_FLOOR: f64 = 5.0;
const HORMONAL_DECAY_RATE: f64 = 0.03;
const COMBINED_DECAY_RATE: f64 = 0.08;
const COMBINED_FLOOR: f64 = 2.0;

/// 四舍五入到一位小数
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ==========================================
// PrognosisCurveGenerator - 预后曲线生成器
// ==========================================
pub struct PrognosisCurveGenerator {
    // 无状态引擎
}

impl Default for PrognosisCurveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PrognosisCurveGenerator {
    pub fn new() -> Self {
        Self {}
    }

    /// 指定月份的肿瘤大小 (未取整)
    ///
    /// 非有限或负的初始值按 0 处理
    pub fn size_at(&self, initial_size_cm: f64, arm: TherapyArm, month: u32) -> f64 {
        let initial = if initial_size_cm.is_finite() && initial_size_cm > 0.0 {
            initial_size_cm
        } else {
            0.0
        };
        let m = month as f64;

        match arm {
            TherapyArm::None => initial * (UNTREATED_GROWTH_RATE * m).exp(),
            TherapyArm::TargetImmuno => {
                if month < IMMUNO_RESPONSE_MONTH {
                    initial * (-IMMUNO_EARLY_DECAY_RATE * m).exp()
                } else {
                    let elapsed = (month - IMMUNO_RESPONSE_MONTH) as f64;
                    let residual = initial
                        * IMMUNO_RESIDUAL_FRACTION
                        * (-IMMUNO_LATE_DECAY_RATE * elapsed).exp();
                    residual.max(IMMUNO_FLOOR)
                }
            }
            TherapyArm::TargetHormonal => initial * (-HORMONAL_DECAY_RATE * m).exp(),
            TherapyArm::Combined => {
                (initial * (-COMBINED_DECAY_RATE * m).exp()).max(COMBINED_FLOOR)
            }
        }
    }

    /// 单方案曲线 (月份 0..=60, 保留一位小数)
    pub fn generate_for_arm(&self, initial_size_cm: f64, arm: TherapyArm) -> PrognosisCurve {
        let months: Vec<u32> = (0..=HORIZON_MONTHS).collect();
        let sizes_cm = months
            .iter()
            .map(|m| round_one_decimal(self.size_at(initial_size_cm, arm, *m)))
            .collect();

        PrognosisCurve {
            arm,
            months,
            sizes_cm,
        }
    }

    /// 四方案曲线 (对比视图)
    pub fn generate(&self, initial_size_cm: f64) -> PrognosisCurveSet {
        debug!(initial_size_cm, "生成四方案预后曲线");

        let [none, target_immuno, target_hormonal, combined] =
            TherapyArm::ALL.map(|arm| self.generate_for_arm(initial_size_cm, arm).sizes_cm);

        PrognosisCurveSet {
            months: (0..=HORIZON_MONTHS).collect(),
            none,
            target_immuno,
            target_hormonal,
            combined,
        }
    }
}
