// ==========================================
// 乳腺癌治疗规划系统 - 录入校验器
// ==========================================
// 职责: RawPatientRecord → PatientProfile
// 规则: 逐字段校验, 错误全部收集后一次返回 (不在首个错误处中断)
// 红线: 未通过校验的记录不得进入引擎层
// ==========================================

use crate::domain::patient::{PatientProfile, RawPatientRecord};
use crate::domain::types::{CancerStage, MenopauseStatus, Sex};
use crate::importer::error::ValidationError;
use tracing::debug;

// 取值范围
const AGE_MAX: f64 = 120.0;
const TUMOUR_SIZE_MAX_CM: f64 = 20.0;
const KI67_MAX: f64 = 100.0;
const WEIGHT_MAX_KG: f64 = 700.0;
const HEIGHT_MAX_CM: f64 = 300.0;

// 复选框取值
const FLAG_TRUE: [&str; 8] = ["true", "1", "yes", "y", "on", "positive", "pos", "+"];
const FLAG_FALSE: [&str; 8] = ["false", "0", "no", "n", "off", "negative", "neg", "-"];

pub struct ProfileValidator {
    // 无状态
}

impl Default for ProfileValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileValidator {
    pub fn new() -> Self {
        Self {}
    }

    /// 校验一条原始记录
    ///
    /// 成功返回 PatientProfile; 失败返回全部字段错误 (按字段顺序)
    pub fn validate(
        &self,
        record: &RawPatientRecord,
    ) -> Result<PatientProfile, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let age = collect(&mut errors, self.parse_age(record.age.as_deref()));
        let sex = collect(
            &mut errors,
            self.parse_enum("sex", record.sex.as_deref(), Sex::from_code),
        );
        let weight_kg = collect(
            &mut errors,
            self.parse_optional_positive("weight_kg", record.weight_kg.as_deref(), WEIGHT_MAX_KG),
        );
        let height_cm = collect(
            &mut errors,
            self.parse_optional_positive("height_cm", record.height_cm.as_deref(), HEIGHT_MAX_CM),
        );
        let cancer_stage = collect(
            &mut errors,
            self.parse_enum(
                "cancer_stage",
                record.cancer_stage.as_deref(),
                CancerStage::from_code,
            ),
        );
        let menopause_status = collect(
            &mut errors,
            self.parse_enum(
                "menopause_status",
                record.menopause_status.as_deref(),
                MenopauseStatus::from_code,
            ),
        );
        let tumour_size_cm = collect(
            &mut errors,
            self.parse_tumour_size(record.tumour_size_cm.as_deref()),
        );
        let distant_metastasis_count = collect(
            &mut errors,
            self.parse_count(
                "distant_metastasis_count",
                record.distant_metastasis_count.as_deref(),
            ),
        );
        let ki67_pct = collect(&mut errors, self.parse_ki67(record.ki67_pct.as_deref()));
        let er_positive = collect(
            &mut errors,
            self.parse_flag("er_status", record.er_status.as_deref()),
        );
        let pr_positive = collect(
            &mut errors,
            self.parse_flag("pr_status", record.pr_status.as_deref()),
        );
        let her2_positive = collect(
            &mut errors,
            self.parse_flag("her2_status", record.her2_status.as_deref()),
        );

        match (
            age,
            sex,
            weight_kg,
            height_cm,
            cancer_stage,
            menopause_status,
            tumour_size_cm,
            distant_metastasis_count,
            ki67_pct,
            er_positive,
            pr_positive,
            her2_positive,
        ) {
            (
                Some(age),
                Some(sex),
                Some(weight_kg),
                Some(height_cm),
                Some(cancer_stage),
                Some(menopause_status),
                Some(tumour_size_cm),
                Some(distant_metastasis_count),
                Some(ki67_pct),
                Some(er_positive),
                Some(pr_positive),
                Some(her2_positive),
            ) if errors.is_empty() => Ok(PatientProfile {
                age,
                sex,
                weight_kg,
                height_cm,
                cancer_stage,
                menopause_status,
                tumour_size_cm,
                distant_metastasis_count,
                ki67_pct,
                er_positive,
                pr_positive,
                her2_positive,
            }),
            _ => {
                debug!(
                    row = record.row_number,
                    error_count = errors.len(),
                    "记录校验未通过"
                );
                Err(errors)
            }
        }
    }

    // ==========================================
    // 字段解析
    // ==========================================

    /// 年龄: [0,120] 整数
    fn parse_age(&self, value: Option<&str>) -> Result<u32, ValidationError> {
        let age = self.parse_number("age", value)?;
        if age.fract() != 0.0 {
            return Err(ValidationError::InvalidNumber {
                field: "age".to_string(),
                value: age.to_string(),
            });
        }
        check_range("age", age, "[0, 120]", (0.0..=AGE_MAX).contains(&age))?;
        Ok(age as u32)
    }

    /// 肿瘤大小: (0,20] cm
    fn parse_tumour_size(&self, value: Option<&str>) -> Result<f64, ValidationError> {
        let size = self.parse_number("tumour_size_cm", value)?;
        check_range(
            "tumour_size_cm",
            size,
            "(0, 20]",
            size > 0.0 && size <= TUMOUR_SIZE_MAX_CM,
        )?;
        Ok(size)
    }

    /// Ki67: [0,100] %
    fn parse_ki67(&self, value: Option<&str>) -> Result<f64, ValidationError> {
        let ki67 = self.parse_number("ki67_pct", value)?;
        check_range("ki67_pct", ki67, "[0, 100]", (0.0..=KI67_MAX).contains(&ki67))?;
        Ok(ki67)
    }

    /// 可选正数 (体重/身高), 空值视为未填写
    fn parse_optional_positive(
        &self,
        field: &str,
        value: Option<&str>,
        max: f64,
    ) -> Result<Option<f64>, ValidationError> {
        match non_empty(value) {
            None => Ok(None),
            Some(_) => {
                let number = self.parse_number(field, value)?;
                check_range(
                    field,
                    number,
                    &format!("(0, {}]", max),
                    number > 0.0 && number <= max,
                )?;
                Ok(Some(number))
            }
        }
    }

    /// 可选非负整数, 缺省为 0
    fn parse_count(&self, field: &str, value: Option<&str>) -> Result<u32, ValidationError> {
        match non_empty(value) {
            None => Ok(0),
            Some(raw) => raw.parse::<u32>().map_err(|_| ValidationError::InvalidNumber {
                field: field.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// 必填数值 (拒绝 NaN / Inf)
    fn parse_number(&self, field: &str, value: Option<&str>) -> Result<f64, ValidationError> {
        let raw = non_empty(value).ok_or_else(|| ValidationError::MissingField {
            field: field.to_string(),
        })?;

        match raw.parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(number),
            _ => Err(ValidationError::InvalidNumber {
                field: field.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// 必填枚举
    fn parse_enum<T>(
        &self,
        field: &str,
        value: Option<&str>,
        from_code: fn(&str) -> Option<T>,
    ) -> Result<T, ValidationError> {
        let raw = non_empty(value).ok_or_else(|| ValidationError::MissingField {
            field: field.to_string(),
        })?;

        from_code(raw).ok_or_else(|| ValidationError::UnrecognizedValue {
            field: field.to_string(),
            value: raw.to_string(),
        })
    }

    /// 受体复选框: 未勾选 (缺失/空) 视为阴性
    fn parse_flag(&self, field: &str, value: Option<&str>) -> Result<bool, ValidationError> {
        let raw = match non_empty(value) {
            None => return Ok(false),
            Some(raw) => raw,
        };

        let normalized = raw.to_lowercase();
        if FLAG_TRUE.contains(&normalized.as_str()) {
            Ok(true)
        } else if FLAG_FALSE.contains(&normalized.as_str()) {
            Ok(false)
        } else {
            Err(ValidationError::UnrecognizedValue {
                field: field.to_string(),
                value: raw.to_string(),
            })
        }
    }
}

/// 去除首尾空白, 空串视为缺失
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn check_range(
    field: &str,
    value: f64,
    range: &str,
    in_range: bool,
) -> Result<(), ValidationError> {
    if in_range {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            range: range.to_string(),
        })
    }
}

fn collect<T>(errors: &mut Vec<ValidationError>, result: Result<T, ValidationError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err);
            None
        }
    }
}
