// ==========================================
// 乳腺癌治疗规划系统 - 引擎编排器
// ==========================================
// 用途: 协调五个核心引擎的执行顺序
// 流程: 画像 → 分型 → 指南方案 (ProfileContext)
//       → 每次选择方案: 曲线 + 概率 + 建议 (ArmOutcome)
// 红线: 无状态, 不缓存跨输入结果
// ==========================================

use crate::domain::outcome::{ArmOutcome, PatientAssessment, ProfileContext};
use crate::domain::patient::PatientProfile;
use crate::domain::types::TherapyArm;
use crate::engine::{
    PrognosisCurveGenerator, RecommendationNarrator, RiskProbabilityEstimator, SubtypeClassifier,
    TreatmentCatalog,
};
use tracing::{debug, instrument};

// ==========================================
// AssessmentOrchestrator - 引擎编排器
// ==========================================
pub struct AssessmentOrchestrator {
    classifier: SubtypeClassifier,
    catalog: TreatmentCatalog,
    curves: PrognosisCurveGenerator,
    estimator: RiskProbabilityEstimator,
    narrator: RecommendationNarrator,
}

impl Default for AssessmentOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentOrchestrator {
    pub fn new() -> Self {
        Self {
            classifier: SubtypeClassifier::new(),
            catalog: TreatmentCatalog::new(),
            curves: PrognosisCurveGenerator::new(),
            estimator: RiskProbabilityEstimator::new(),
            narrator: RecommendationNarrator::new(),
        }
    }

    /// 步骤1+2: 分子分型 + 指南方案
    #[instrument(skip(self, profile))]
    pub fn prepare(&self, profile: &PatientProfile) -> ProfileContext {
        let (subtype, rule_id) = self.classifier.classify_with_rule(&profile.biomarkers());
        let plan = self.catalog.lookup(subtype.code);

        debug!(
            subtype = %subtype.code,
            therapy_type = %plan.therapy_type,
            "指南方案匹配完成"
        );

        ProfileContext {
            subtype,
            matched_rule: rule_id.to_string(),
            plan,
        }
    }

    /// 步骤3: 单方案模拟 (曲线 + 概率 + 建议)
    #[instrument(skip(self, profile))]
    pub fn evaluate_arm(&self, profile: &PatientProfile, arm: TherapyArm) -> ArmOutcome {
        let curve = self.curves.generate_for_arm(profile.tumour_size_cm, arm);
        let estimate = self.estimator.estimate_with_factors(profile, arm);
        let band = RecommendationNarrator::band(estimate.probabilities.success_pct, arm);
        let narrative = self.narrator.narrate_probabilities(&estimate.probabilities, arm);

        ArmOutcome {
            arm,
            curve,
            probabilities: estimate.probabilities,
            factors: estimate.factors,
            band,
            narrative,
        }
    }

    /// 完整评估 (指定方案)
    pub fn assess(&self, profile: &PatientProfile, arm: TherapyArm) -> PatientAssessment {
        PatientAssessment {
            context: self.prepare(profile),
            selected: self.evaluate_arm(profile, arm),
        }
    }

    /// 四方案对比 (按 TherapyArm::ALL 顺序)
    pub fn compare_arms(&self, profile: &PatientProfile) -> Vec<ArmOutcome> {
        TherapyArm::ALL
            .iter()
            .map(|arm| self.evaluate_arm(profile, *arm))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CancerStage, MenopauseStatus, PrognosisBand, Sex, SubtypeCode};

    fn luminal_b_profile() -> PatientProfile {
        PatientProfile {
            age: 58,
            sex: Sex::Female,
            weight_kg: Some(70.0),
            height_cm: Some(165.0),
            cancer_stage: CancerStage::Stage2,
            menopause_status: MenopauseStatus::Post,
            tumour_size_cm: 3.2,
            distant_metastasis_count: 0,
            ki67_pct: 24.0,
            er_positive: true,
            pr_positive: true,
            her2_positive: false,
        }
    }

    #[test]
    fn test_prepare_links_subtype_and_plan() {
        let ctx = AssessmentOrchestrator::new().prepare(&luminal_b_profile());
        assert_eq!(ctx.subtype.code, SubtypeCode::LuminalBHer2Neg);
        assert_eq!(ctx.plan.subtype_code, SubtypeCode::LuminalBHer2Neg);
        assert_eq!(ctx.matched_rule, "R3B_LUMINAL_B_HER2_NEG");
    }

    #[test]
    fn test_evaluate_arm_consistent_with_components() {
        let orchestrator = AssessmentOrchestrator::new();
        let profile = luminal_b_profile();
        let outcome = orchestrator.evaluate_arm(&profile, TherapyArm::TargetHormonal);

        assert_eq!(
            outcome.probabilities,
            RiskProbabilityEstimator::new().estimate(&profile, TherapyArm::TargetHormonal)
        );
        assert_eq!(
            outcome.narrative,
            RecommendationNarrator::new().narrate(&profile, TherapyArm::TargetHormonal)
        );
        assert_eq!(outcome.curve.sizes_cm[0], 3.2);
        assert_eq!(outcome.band, PrognosisBand::Excellent);
    }

    #[test]
    fn test_compare_arms_order() {
        let outcomes = AssessmentOrchestrator::new().compare_arms(&luminal_b_profile());
        let arms: Vec<TherapyArm> = outcomes.iter().map(|o| o.arm).collect();
        assert_eq!(arms, TherapyArm::ALL.to_vec());
        assert_eq!(outcomes[0].band, PrognosisBand::Untreated);
    }

    #[test]
    fn test_assess_is_idempotent() {
        let orchestrator = AssessmentOrchestrator::new();
        let profile = luminal_b_profile();
        assert_eq!(
            orchestrator.assess(&profile, TherapyArm::Combined),
            orchestrator.assess(&profile, TherapyArm::Combined)
        );
    }
}
