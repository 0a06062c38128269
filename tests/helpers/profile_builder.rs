// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use onco_planner::domain::patient::{PatientProfile, RawPatientRecord};
use onco_planner::domain::types::{CancerStage, MenopauseStatus, Sex};

// ==========================================
// PatientProfile 构建器
// ==========================================

pub struct ProfileBuilder {
    profile: PatientProfile,
}

impl ProfileBuilder {
    /// 默认: 50 岁女性, II 期, 绝经后, 2.0 cm, Ki67 10, 三阴性
    pub fn new() -> Self {
        Self {
            profile: PatientProfile {
                age: 50,
                sex: Sex::Female,
                weight_kg: None,
                height_cm: None,
                cancer_stage: CancerStage::Stage2,
                menopause_status: MenopauseStatus::Post,
                tumour_size_cm: 2.0,
                distant_metastasis_count: 0,
                ki67_pct: 10.0,
                er_positive: false,
                pr_positive: false,
                her2_positive: false,
            },
        }
    }

    pub fn age(mut self, age: u32) -> Self {
        self.profile.age = age;
        self
    }

    pub fn tumour_size(mut self, size_cm: f64) -> Self {
        self.profile.tumour_size_cm = size_cm;
        self
    }

    pub fn ki67(mut self, ki67_pct: f64) -> Self {
        self.profile.ki67_pct = ki67_pct;
        self
    }

    pub fn receptors(mut self, er: bool, pr: bool, her2: bool) -> Self {
        self.profile.er_positive = er;
        self.profile.pr_positive = pr;
        self.profile.her2_positive = her2;
        self
    }

    pub fn stage(mut self, stage: CancerStage) -> Self {
        self.profile.cancer_stage = stage;
        self
    }

    pub fn build(self) -> PatientProfile {
        self.profile
    }
}

// ==========================================
// RawPatientRecord 构建器 (全部字段为字符串)
// ==========================================

pub struct RawRecordBuilder {
    record: RawPatientRecord,
}

impl RawRecordBuilder {
    pub fn new() -> Self {
        Self {
            record: RawPatientRecord {
                patient_name: None,
                age: Some("50".to_string()),
                sex: Some("female".to_string()),
                weight_kg: None,
                height_cm: None,
                cancer_stage: Some("2".to_string()),
                menopause_status: Some("post".to_string()),
                tumour_size_cm: Some("2.0".to_string()),
                ki67_pct: Some("10".to_string()),
                er_status: None,
                pr_status: None,
                her2_status: None,
                distant_metastasis_count: None,
                row_number: 0,
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.record.patient_name = Some(name.to_string());
        self
    }

    pub fn age(mut self, age: &str) -> Self {
        self.record.age = Some(age.to_string());
        self
    }

    pub fn tumour_size(mut self, size: &str) -> Self {
        self.record.tumour_size_cm = Some(size.to_string());
        self
    }

    pub fn ki67(mut self, ki67: &str) -> Self {
        self.record.ki67_pct = Some(ki67.to_string());
        self
    }

    pub fn receptors(mut self, er: &str, pr: &str, her2: &str) -> Self {
        self.record.er_status = Some(er.to_string());
        self.record.pr_status = Some(pr.to_string());
        self.record.her2_status = Some(her2.to_string());
        self
    }

    pub fn without_sex(mut self) -> Self {
        self.record.sex = None;
        self
    }

    pub fn build(self) -> RawPatientRecord {
        self.record
    }
}

// ==========================================
// CSV 内容
// ==========================================

pub const CSV_HEADER: &str =
    "patient_name,age,sex,cancer_stage,menopause_status,tumour_size_cm,ki67,er,pr,her2\n";

/// 拼接 CSV 内容 (含表头)
pub fn csv_with_rows(rows: &[&str]) -> String {
    let mut out = CSV_HEADER.to_string();
    for row in rows {
        out.push_str(row);
        out.push('\n');
    }
    out
}
