// ==========================================
// 评估API
// ==========================================
// 职责: 录入校验 → 引擎编排 → 脱敏 → 响应
// 每次调用独立, 不保留跨请求的会话状态
// ==========================================

use crate::api::dto::{
    AssessmentRequest, AssessmentResponse, BatchReport, RowAssessment, RowFailure,
};
use crate::api::error::{ApiError, ApiResult};
use crate::config::{AppConfig, ConfigManager};
use crate::domain::patient::PatientProfile;
use crate::domain::subtype::TreatmentPlan;
use crate::domain::types::TherapyArm;
use crate::engine::{AssessmentOrchestrator, PrognosisCurveGenerator, TreatmentCatalog};
use crate::importer::{PatientCsvImporter, ProfileValidator};
use crate::privacy::{self, PrivacyGuard};
use chrono::Utc;
use std::path::Path;
use tracing::{info, instrument};
use uuid::Uuid;

/// 评估API
pub struct AssessmentApi {
    config: AppConfig,
    validator: ProfileValidator,
    orchestrator: AssessmentOrchestrator,
    curves: PrognosisCurveGenerator,
    catalog: TreatmentCatalog,
    privacy: PrivacyGuard,
}

impl AssessmentApi {
    /// # 返回
    /// - Err(ApiError::ConfigFailed): 配置值不合法 (如行数上限为 0)
    pub fn new(config: AppConfig) -> ApiResult<Self> {
        let config = ConfigManager::from_config(config)?.into_config();
        let privacy = PrivacyGuard::new().map_err(|e| ApiError::Other(e.into()))?;

        Ok(Self {
            config,
            validator: ProfileValidator::new(),
            orchestrator: AssessmentOrchestrator::new(),
            curves: PrognosisCurveGenerator::new(),
            catalog: TreatmentCatalog::new(),
            privacy,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 单条评估
    ///
    /// # 返回
    /// - Ok(AssessmentResponse): 评估结果
    /// - Err(ApiError::ValidationFailed): 记录未通过校验 (含全部字段错误)
    #[instrument(skip(self, request))]
    pub fn evaluate(&self, request: AssessmentRequest) -> ApiResult<AssessmentResponse> {
        let profile = self.validator.validate(&request.record)?;

        let arm = match request.arm.as_deref() {
            Some(code) => TherapyArm::from_code(code),
            None => self.config.default_arm,
        };
        let compare = request.compare.unwrap_or(self.config.compare_all_arms);

        Ok(self.evaluate_profile(
            profile,
            request.record.patient_name.as_deref(),
            arm,
            compare,
        ))
    }

    /// 已校验画像的评估 (总是成功)
    pub fn evaluate_profile(
        &self,
        profile: PatientProfile,
        patient_name: Option<&str>,
        arm: TherapyArm,
        compare: bool,
    ) -> AssessmentResponse {
        let assessment = self.orchestrator.assess(&profile, arm);
        let context = assessment.context;

        let patient_code = privacy::patient_code(
            profile.age,
            context.subtype.code.as_code(),
            profile.cancer_stage.as_number(),
        );
        let pii_warnings = patient_name
            .map(|name| self.privacy.detect(name))
            .unwrap_or_default();
        let display_name = self.privacy.pseudonymize(patient_name);

        let curves = self.curves.generate(profile.tumour_size_cm);
        let comparison = compare.then(|| self.orchestrator.compare_arms(&profile));

        info!(
            patient_code = %patient_code,
            subtype = %context.subtype.code,
            arm = %arm.as_code(),
            success_pct = assessment.selected.probabilities.success_pct,
            "评估完成"
        );

        AssessmentResponse {
            assessment_id: Uuid::new_v4().to_string(),
            assessed_at: Utc::now(),
            patient_code,
            display_name,
            pii_warnings,
            profile,
            subtype: context.subtype,
            matched_rule: context.matched_rule,
            plan: context.plan,
            selected: assessment.selected,
            curves,
            comparison,
        }
    }

    /// CSV 批量评估
    ///
    /// 行级校验失败计入 failed, 不中断整批; 文件级错误直接返回 Err
    #[instrument(skip(self, file_path), fields(file = %file_path.display()))]
    pub fn evaluate_csv(&self, file_path: &Path) -> ApiResult<BatchReport> {
        let started_at = Utc::now();
        let importer =
            PatientCsvImporter::new(self.config.csv_delimiter_byte(), self.config.batch_row_limit);
        let batch = importer.import_file(file_path)?;
        let total_rows = batch.total_rows();

        let assessed: Vec<RowAssessment> = batch
            .accepted
            .into_iter()
            .map(|row| RowAssessment {
                row_number: row.row_number,
                response: self.evaluate_profile(
                    row.profile,
                    row.patient_name.as_deref(),
                    self.config.default_arm,
                    self.config.compare_all_arms,
                ),
            })
            .collect();

        let failed: Vec<RowFailure> = batch
            .rejected
            .into_iter()
            .map(|row| RowFailure {
                row_number: row.row_number,
                errors: row.errors,
            })
            .collect();

        info!(
            batch_id = %batch.batch_id,
            assessed = assessed.len(),
            failed = failed.len(),
            "批量评估完成"
        );

        Ok(BatchReport {
            batch_id: batch.batch_id,
            source: batch.source,
            started_at,
            finished_at: Utc::now(),
            total_rows,
            assessed,
            failed,
        })
    }

    /// 指南方案表
    pub fn catalog(&self) -> Vec<TreatmentPlan> {
        self.catalog.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::patient::RawPatientRecord;
    use crate::domain::types::{PrognosisBand, SubtypeCode};
    use crate::privacy::ANONYMOUS_DISPLAY_NAME;

    fn record() -> RawPatientRecord {
        RawPatientRecord {
            age: Some("72".to_string()),
            sex: Some("female".to_string()),
            cancer_stage: Some("3".to_string()),
            menopause_status: Some("post".to_string()),
            tumour_size_cm: Some("3.5".to_string()),
            ki67_pct: Some("45".to_string()),
            ..Default::default()
        }
    }

    fn api() -> AssessmentApi {
        AssessmentApi::new(AppConfig::default()).unwrap()
    }

    #[test]
    fn test_evaluate_defaults() {
        let response = api().evaluate(AssessmentRequest::new(record())).unwrap();

        assert_eq!(response.subtype.code, SubtypeCode::Tnbc);
        assert_eq!(response.selected.arm, TherapyArm::Combined);
        assert_eq!(response.display_name, ANONYMOUS_DISPLAY_NAME);
        assert!(response.patient_code.starts_with("BC_"));
        assert!(response.comparison.is_none());
        assert_eq!(response.curves.none[0], 3.5);
    }

    #[test]
    fn test_evaluate_none_arm_with_compare() {
        let request = AssessmentRequest::new(record())
            .with_arm("none")
            .with_compare(true);
        let response = api().evaluate(request).unwrap();

        assert_eq!(response.selected.band, PrognosisBand::Untreated);
        assert_eq!(response.comparison.map(|c| c.len()), Some(4));
    }

    #[test]
    fn test_evaluate_unknown_arm_falls_back() {
        let response = api()
            .evaluate(AssessmentRequest::new(record()).with_arm("surgery"))
            .unwrap();
        assert_eq!(response.selected.arm, TherapyArm::None);
    }

    #[test]
    fn test_evaluate_validation_failure() {
        let mut bad = record();
        bad.age = Some("200".to_string());
        bad.sex = None;

        let err = api().evaluate(AssessmentRequest::new(bad)).unwrap_err();
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = AppConfig {
            batch_row_limit: 0,
            ..AppConfig::default()
        };

        let result = AssessmentApi::new(config);
        assert!(matches!(result, Err(ApiError::ConfigFailed(_))));
    }

    #[test]
    fn test_catalog_has_five_entries() {
        assert_eq!(api().catalog().len(), 5);
    }
}
