// ==========================================
// 乳腺癌治疗规划系统 - 分子亚型 / 治疗方案领域模型
// ==========================================

use crate::domain::types::{SubtypeCode, TherapyType};
use serde::{Deserialize, Serialize};

// ==========================================
// MolecularSubtype - 分子亚型
// ==========================================
// 只由 ER/PR/HER2/Ki67 推导, 任一标志物变化即重新计算
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MolecularSubtype {
    pub name: String,
    pub code: SubtypeCode,
}

impl MolecularSubtype {
    pub fn from_code(code: SubtypeCode) -> Self {
        Self {
            name: code.display_name().to_string(),
            code,
        }
    }
}

// ==========================================
// TreatmentPlan - 指南推荐方案
// ==========================================
// 静态表项, 与亚型编码一一对应, 不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentPlan {
    pub subtype_code: SubtypeCode,
    pub main_therapy: String,
    pub recommendations: Vec<String>, // 有序指南条目
    pub therapy_type: TherapyType,
}

impl TreatmentPlan {
    /// 是否为兜底方案 (未识别亚型)
    pub fn is_fallback(&self) -> bool {
        self.therapy_type == TherapyType::Unknown
    }
}
