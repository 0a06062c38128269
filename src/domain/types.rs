// ==========================================
// 乳腺癌治疗规划系统 - 领域类型定义
// ==========================================
// 红线: 所有枚举的线上编码固定,与前端/CSV 保持一致
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 性别 (Sex)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sex::Female => write!(f, "female"),
            Sex::Male => write!(f, "male"),
        }
    }
}

impl Sex {
    /// 从表单编码解析 (大小写不敏感)
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "female" | "f" => Some(Sex::Female),
            "male" | "m" => Some(Sex::Male),
            _ => None,
        }
    }
}

// ==========================================
// 临床分期 (Cancer Stage)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CancerStage {
    #[serde(rename = "1")]
    Stage1,
    #[serde(rename = "2")]
    Stage2,
    #[serde(rename = "3")]
    Stage3,
    #[serde(rename = "4")]
    Stage4,
}

impl fmt::Display for CancerStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_number())
    }
}

impl CancerStage {
    /// 分期数字 (1..=4)
    pub fn as_number(&self) -> u8 {
        match self {
            CancerStage::Stage1 => 1,
            CancerStage::Stage2 => 2,
            CancerStage::Stage3 => 3,
            CancerStage::Stage4 => 4,
        }
    }

    /// 从表单编码解析, 接受 "1".."4" 以及罗马数字 "I".."IV"
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "1" | "I" => Some(CancerStage::Stage1),
            "2" | "II" => Some(CancerStage::Stage2),
            "3" | "III" => Some(CancerStage::Stage3),
            "4" | "IV" => Some(CancerStage::Stage4),
            _ => None,
        }
    }
}

// ==========================================
// 绝经状态 (Menopause Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenopauseStatus {
    Pre,  // 绝经前
    Peri, // 围绝经期
    Post, // 绝经后
}

impl fmt::Display for MenopauseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenopauseStatus::Pre => write!(f, "pre"),
            MenopauseStatus::Peri => write!(f, "peri"),
            MenopauseStatus::Post => write!(f, "post"),
        }
    }
}

impl MenopauseStatus {
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pre" => Some(MenopauseStatus::Pre),
            "peri" => Some(MenopauseStatus::Peri),
            "post" => Some(MenopauseStatus::Post),
            _ => None,
        }
    }
}

// ==========================================
// 分子亚型编码 (Subtype Code)
// ==========================================
// 序列化格式: 与指南表格编码一致 (含 +/- 符号)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubtypeCode {
    #[serde(rename = "TNBC")]
    Tnbc,
    #[serde(rename = "HR-HER2+")]
    HrNegHer2Pos,
    #[serde(rename = "HR+HER2+B")]
    LuminalBHer2Pos,
    #[serde(rename = "HR+HER2-B")]
    LuminalBHer2Neg,
    #[serde(rename = "HR+HER2-A")]
    LuminalA,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl SubtypeCode {
    /// 指南编码
    pub fn as_code(&self) -> &'static str {
        match self {
            SubtypeCode::Tnbc => "TNBC",
            SubtypeCode::HrNegHer2Pos => "HR-HER2+",
            SubtypeCode::LuminalBHer2Pos => "HR+HER2+B",
            SubtypeCode::LuminalBHer2Neg => "HR+HER2-B",
            SubtypeCode::LuminalA => "HR+HER2-A",
            SubtypeCode::Unknown => "Unknown",
        }
    }

    /// 亚型展示名称
    pub fn display_name(&self) -> &'static str {
        match self {
            SubtypeCode::Tnbc => "Basal-like",
            SubtypeCode::HrNegHer2Pos => "HER2-positive (non-luminal)",
            SubtypeCode::LuminalBHer2Pos => "Luminal B (HER2-positive)",
            SubtypeCode::LuminalBHer2Neg => "Luminal B (HER2-negative)",
            SubtypeCode::LuminalA => "Luminal A",
            SubtypeCode::Unknown => "Undetermined",
        }
    }

    /// 从指南编码解析 (精确匹配, 未识别编码返回 None)
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim() {
            "TNBC" => Some(SubtypeCode::Tnbc),
            "HR-HER2+" => Some(SubtypeCode::HrNegHer2Pos),
            "HR+HER2+B" => Some(SubtypeCode::LuminalBHer2Pos),
            "HR+HER2-B" => Some(SubtypeCode::LuminalBHer2Neg),
            "HR+HER2-A" => Some(SubtypeCode::LuminalA),
            "Unknown" => Some(SubtypeCode::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for SubtypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

// ==========================================
// 指南治疗类型 (Therapy Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TherapyType {
    Chemotherapy,
    ChemotherapyHer2,
    ChemotherapyHer2Hormone,
    ChemotherapyHormone,
    HormoneTherapy,
    Unknown,
}

impl fmt::Display for TherapyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TherapyType::Chemotherapy => write!(f, "chemotherapy"),
            TherapyType::ChemotherapyHer2 => write!(f, "chemotherapy_her2"),
            TherapyType::ChemotherapyHer2Hormone => write!(f, "chemotherapy_her2_hormone"),
            TherapyType::ChemotherapyHormone => write!(f, "chemotherapy_hormone"),
            TherapyType::HormoneTherapy => write!(f, "hormone_therapy"),
            TherapyType::Unknown => write!(f, "unknown"),
        }
    }
}

// ==========================================
// 模拟治疗方案 (Therapy Arm)
// ==========================================
// 与指南推荐方案相互独立,仅用于预后对比
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TherapyArm {
    None,           // 不治疗
    TargetImmuno,   // 靶向免疫
    TargetHormonal, // 靶向内分泌
    Combined,       // 联合治疗
}

impl TherapyArm {
    /// 全部方案 (对比图顺序)
    pub const ALL: [TherapyArm; 4] = [
        TherapyArm::None,
        TherapyArm::TargetImmuno,
        TherapyArm::TargetHormonal,
        TherapyArm::Combined,
    ];

    pub fn as_code(&self) -> &'static str {
        match self {
            TherapyArm::None => "none",
            TherapyArm::TargetImmuno => "targetImmuno",
            TherapyArm::TargetHormonal => "targetHormonal",
            TherapyArm::Combined => "combined",
        }
    }

    /// 精确解析方案编码
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "none" => Some(TherapyArm::None),
            "targetImmuno" => Some(TherapyArm::TargetImmuno),
            "targetHormonal" => Some(TherapyArm::TargetHormonal),
            "combined" => Some(TherapyArm::Combined),
            _ => None,
        }
    }

    /// 从编码解析, 未识别编码回落为 None 方案
    pub fn from_code(s: &str) -> Self {
        match Self::parse(s) {
            Some(arm) => arm,
            None => {
                tracing::warn!(arm_code = s, "未识别的治疗方案编码, 回落为 none");
                TherapyArm::None
            }
        }
    }

    /// 是否为内分泌类方案 (ER 敏感加成)
    pub fn is_hormonal(&self) -> bool {
        matches!(self, TherapyArm::TargetHormonal)
    }

    /// 是否为免疫类方案 (HER2 敏感加成)
    pub fn is_immuno(&self) -> bool {
        matches!(self, TherapyArm::TargetImmuno)
    }
}

impl fmt::Display for TherapyArm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

// ==========================================
// 预后分档 (Prognosis Band)
// ==========================================
// 顺序: Untreated / Excellent / Good / Reconsider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrognosisBand {
    Untreated,  // 未选择治疗
    Excellent,  // success > 80
    Good,       // success > 60
    Reconsider, // 其他
}

impl fmt::Display for PrognosisBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrognosisBand::Untreated => write!(f, "UNTREATED"),
            PrognosisBand::Excellent => write!(f, "EXCELLENT"),
            PrognosisBand::Good => write!(f, "GOOD"),
            PrognosisBand::Reconsider => write!(f, "RECONSIDER"),
        }
    }
}
