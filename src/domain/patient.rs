// ==========================================
// 乳腺癌治疗规划系统 - 患者画像领域模型
// ==========================================
// 红线: PatientProfile 进入核心前必须已通过边界校验
//       核心不再重复校验取值范围
// ==========================================

use crate::domain::types::{CancerStage, MenopauseStatus, Sex};
use serde::{Deserialize, Serialize};

// ==========================================
// PatientProfile - 患者画像
// ==========================================
// 用途: 核心引擎唯一输入,构建后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    // ===== 基本信息 =====
    pub age: u32,                  // 年龄 [0,120]
    pub sex: Sex,                  // 性别
    #[serde(default)]
    pub weight_kg: Option<f64>,    // 体重 (可选, >0)
    #[serde(default)]
    pub height_cm: Option<f64>,    // 身高 (可选, >0)

    // ===== 临床信息 =====
    pub cancer_stage: CancerStage,         // 临床分期
    pub menopause_status: MenopauseStatus, // 绝经状态
    pub tumour_size_cm: f64,               // 肿瘤大小 (0,20] cm
    #[serde(default)]
    pub distant_metastasis_count: u32,     // 远处转移灶数量 (仅透传)

    // ===== 生物标志物 =====
    pub ki67_pct: f64,      // Ki67 增殖指数 [0,100]
    pub er_positive: bool,  // 雌激素受体
    pub pr_positive: bool,  // 孕激素受体
    pub her2_positive: bool, // HER2
}

impl PatientProfile {
    /// 提取分子分型所需的生物标志物组合
    pub fn biomarkers(&self) -> BiomarkerPanel {
        BiomarkerPanel {
            er_positive: self.er_positive,
            pr_positive: self.pr_positive,
            her2_positive: self.her2_positive,
            ki67_pct: self.ki67_pct,
        }
    }
}

// ==========================================
// BiomarkerPanel - 生物标志物组合
// ==========================================
// 分子亚型只由这四项决定
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerPanel {
    pub er_positive: bool,
    pub pr_positive: bool,
    pub her2_positive: bool,
    pub ki67_pct: f64,
}

impl BiomarkerPanel {
    pub fn new(er_positive: bool, pr_positive: bool, her2_positive: bool, ki67_pct: f64) -> Self {
        Self {
            er_positive,
            pr_positive,
            her2_positive,
            ki67_pct,
        }
    }

    /// 三阴性 (ER/PR/HER2 均阴性)
    pub fn is_triple_negative(&self) -> bool {
        !self.er_positive && !self.pr_positive && !self.her2_positive
    }

    /// 激素受体阴性 (ER/PR 均阴性)
    pub fn is_hormone_receptor_negative(&self) -> bool {
        !self.er_positive && !self.pr_positive
    }
}

// ==========================================
// RawPatientRecord - 录入中间结构体
// ==========================================
// 用途: 表单/CSV/JSON 原始值 (全部按字符串保留), 校验后才生成 PatientProfile
// 生命周期: 仅在录入流程内
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPatientRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub patient_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sex: Option<String>,
    #[serde(default, alias = "weight", deserialize_with = "lenient_string")]
    pub weight_kg: Option<String>,
    #[serde(default, alias = "height", deserialize_with = "lenient_string")]
    pub height_cm: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cancer_stage: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub menopause_status: Option<String>,
    // 原表单字段名为 tumour_size_mm, 但取值单位是 cm
    #[serde(default, alias = "tumour_size_mm", deserialize_with = "lenient_string")]
    pub tumour_size_cm: Option<String>,
    #[serde(default, alias = "ki67", deserialize_with = "lenient_string")]
    pub ki67_pct: Option<String>,
    #[serde(default, alias = "ER_status", deserialize_with = "lenient_string")]
    pub er_status: Option<String>,
    #[serde(default, alias = "PR_status", deserialize_with = "lenient_string")]
    pub pr_status: Option<String>,
    #[serde(default, alias = "HER2_status", deserialize_with = "lenient_string")]
    pub her2_status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub distant_metastasis_count: Option<String>,

    // 元信息
    #[serde(default)]
    pub row_number: usize, // CSV 数据行号 (从 1 开始, JSON 录入为 0)
}

/// 数字/布尔/字符串统一按字符串接收
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde_json::Value;

    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_accepts_mixed_json_types() {
        let raw = r#"{
            "age": 47,
            "sex": "female",
            "weight": 61.5,
            "ki67": "22",
            "ER_status": true,
            "PR_status": false,
            "tumour_size_cm": 1.9
        }"#;

        let record: RawPatientRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.age.as_deref(), Some("47"));
        assert_eq!(record.weight_kg.as_deref(), Some("61.5"));
        assert_eq!(record.ki67_pct.as_deref(), Some("22"));
        assert_eq!(record.er_status.as_deref(), Some("true"));
        assert_eq!(record.pr_status.as_deref(), Some("false"));
        assert_eq!(record.her2_status, None);
        assert_eq!(record.row_number, 0);
    }

    #[test]
    fn test_raw_record_accepts_form_payload_keys() {
        let raw = r#"{
            "age": "63",
            "sex": "female",
            "cancer_stage": "2",
            "menopause_status": "post",
            "tumour_size_mm": "3.2",
            "ki67": "15",
            "ER_status": true,
            "PR_status": true,
            "HER2_status": false
        }"#;

        let record: RawPatientRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.tumour_size_cm.as_deref(), Some("3.2"));
        assert_eq!(record.ki67_pct.as_deref(), Some("15"));
        assert_eq!(record.her2_status.as_deref(), Some("false"));
    }

    #[test]
    fn test_profile_deserialize_defaults() {
        let raw = r#"{
            "age": 52,
            "sex": "female",
            "cancer_stage": "2",
            "menopause_status": "post",
            "tumour_size_cm": 2.4,
            "ki67_pct": 18.0,
            "er_positive": true,
            "pr_positive": true,
            "her2_positive": false
        }"#;

        let profile: PatientProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.cancer_stage, CancerStage::Stage2);
        assert_eq!(profile.weight_kg, None);
        assert_eq!(profile.distant_metastasis_count, 0);

        let panel = profile.biomarkers();
        assert!(panel.er_positive);
        assert!(!panel.is_triple_negative());
        assert_eq!(panel.ki67_pct, 18.0);
    }
}
