// ==========================================
// 乳腺癌治疗规划系统 - 建议文本生成
// ==========================================
// 职责: 成功概率 + 治疗方案 → 面向医生的建议文本
// 红线: 阈值严格大于 (>), success=80 落入第二档
// ==========================================

use crate::domain::outcome::RiskProbabilities;
use crate::domain::patient::PatientProfile;
use crate::domain::types::{PrognosisBand, TherapyArm};
use crate::engine::risk_estimator::RiskProbabilityEstimator;

const EXCELLENT_SUCCESS_THRESHOLD: u8 = 80;
const GOOD_SUCCESS_THRESHOLD: u8 = 60;

pub const UNTREATED_ADVICE: &str =
    "Consider active treatment options to improve the prognosis.";
pub const EXCELLENT_ADVICE: &str =
    "Excellent prognosis! The selected regimen is recommended with regular monitoring.";
pub const GOOD_ADVICE: &str =
    "Good prognosis. The selected therapy is recommended with the option of dose adjustment.";
pub const RECONSIDER_ADVICE: &str =
    "Consider alternative regimens or combined approaches to improve outcomes.";

pub struct RecommendationNarrator {
    estimator: RiskProbabilityEstimator,
}

impl Default for RecommendationNarrator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationNarrator {
    pub fn new() -> Self {
        Self {
            estimator: RiskProbabilityEstimator::new(),
        }
    }

    /// 预后分档 (none 方案忽略成功概率)
    pub fn band(success_pct: u8, arm: TherapyArm) -> PrognosisBand {
        if arm == TherapyArm::None {
            PrognosisBand::Untreated
        } else if success_pct > EXCELLENT_SUCCESS_THRESHOLD {
            PrognosisBand::Excellent
        } else if success_pct > GOOD_SUCCESS_THRESHOLD {
            PrognosisBand::Good
        } else {
            PrognosisBand::Reconsider
        }
    }

    pub fn advice(band: PrognosisBand) -> &'static str {
        match band {
            PrognosisBand::Untreated => UNTREATED_ADVICE,
            PrognosisBand::Excellent => EXCELLENT_ADVICE,
            PrognosisBand::Good => GOOD_ADVICE,
            PrognosisBand::Reconsider => RECONSIDER_ADVICE,
        }
    }

    /// 估算概率后生成建议
    pub fn narrate(&self, profile: &PatientProfile, arm: TherapyArm) -> String {
        let probabilities = self.estimator.estimate(profile, arm);
        self.narrate_probabilities(&probabilities, arm)
    }

    /// 基于已有概率生成建议
    pub fn narrate_probabilities(
        &self,
        probabilities: &RiskProbabilities,
        arm: TherapyArm,
    ) -> String {
        Self::advice(Self::band(probabilities.success_pct, arm)).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CancerStage, MenopauseStatus, Sex};

    fn probabilities(success_pct: u8) -> RiskProbabilities {
        RiskProbabilities {
            survival_pct: 50,
            metastasis_pct: 20,
            success_pct,
        }
    }

    #[test]
    fn test_band_thresholds_strict() {
        let arm = TherapyArm::Combined;
        assert_eq!(RecommendationNarrator::band(81, arm), PrognosisBand::Excellent);
        assert_eq!(RecommendationNarrator::band(80, arm), PrognosisBand::Good);
        assert_eq!(RecommendationNarrator::band(61, arm), PrognosisBand::Good);
        assert_eq!(RecommendationNarrator::band(60, arm), PrognosisBand::Reconsider);
        assert_eq!(RecommendationNarrator::band(0, arm), PrognosisBand::Reconsider);
    }

    #[test]
    fn test_untreated_ignores_success() {
        let narrator = RecommendationNarrator::new();
        assert_eq!(
            narrator.narrate_probabilities(&probabilities(100), TherapyArm::None),
            UNTREATED_ADVICE
        );
    }

    #[test]
    fn test_narrate_from_profile() {
        let narrator = RecommendationNarrator::new();
        let profile = PatientProfile {
            age: 45,
            sex: Sex::Female,
            weight_kg: Some(64.0),
            height_cm: Some(168.0),
            cancer_stage: CancerStage::Stage1,
            menopause_status: MenopauseStatus::Pre,
            tumour_size_cm: 1.8,
            distant_metastasis_count: 0,
            ki67_pct: 12.0,
            er_positive: true,
            pr_positive: true,
            her2_positive: false,
        };

        // 70*1.5=105 → 100
        assert_eq!(narrator.narrate(&profile, TherapyArm::Combined), EXCELLENT_ADVICE);
        // 70*1.2=84 → 84
        assert_eq!(narrator.narrate(&profile, TherapyArm::TargetImmuno), EXCELLENT_ADVICE);
        assert_eq!(narrator.narrate(&profile, TherapyArm::None), UNTREATED_ADVICE);
    }

    #[test]
    fn test_reconsider_band_text() {
        let narrator = RecommendationNarrator::new();
        let text = narrator.narrate_probabilities(&probabilities(55), TherapyArm::TargetImmuno);
        assert_eq!(text, RECONSIDER_ADVICE);
    }
}
