// ==========================================
// 乳腺癌治疗规划系统 - 指南方案目录
// ==========================================
// 职责: 亚型编码 → 指南推荐方案 (静态查表)
// 红线: 表项为编译期常量, 运行期不可修改
//       未识别编码返回兜底方案, 不报错
// ==========================================

use crate::domain::subtype::TreatmentPlan;
use crate::domain::types::{SubtypeCode, TherapyType};
use tracing::warn;

/// 兜底方案的主治疗描述
pub const FALLBACK_MAIN_THERAPY: &str = "no data available";

struct CatalogEntry {
    code: SubtypeCode,
    main_therapy: &'static str,
    recommendations: &'static [&'static str],
    therapy_type: TherapyType,
}

impl CatalogEntry {
    fn to_plan(&self) -> TreatmentPlan {
        TreatmentPlan {
            subtype_code: self.code,
            main_therapy: self.main_therapy.to_string(),
            recommendations: self.recommendations.iter().map(|r| r.to_string()).collect(),
            therapy_type: self.therapy_type,
        }
    }
}

// ==========================================
// 指南表 (5 项)
// ==========================================
const CATALOG: [CatalogEntry; 5] = [
    CatalogEntry {
        code: SubtypeCode::Tnbc,
        main_therapy: "Chemotherapy including anthracyclines and taxanes",
        recommendations: &[
            "T1a (≤ 5 mm) and N0: systemic therapy is not indicated",
            "T1b and N0: 4 cycles of DC chemotherapy (docetaxel + cyclophosphamide) may be given",
            "T1c–T3 or N(+): anthracycline and taxane chemotherapy, 4 cycles of AC/EC → 12 weekly paclitaxel ± carboplatin",
        ],
        therapy_type: TherapyType::Chemotherapy,
    },
    CatalogEntry {
        code: SubtypeCode::HrNegHer2Pos,
        main_therapy: "Chemotherapy + anti-HER2 therapy",
        recommendations: &[
            "T1a (≤ 5 mm) and N0: systemic therapy is not indicated",
            "T1b, c (> 5 mm but ≤ 20 mm) and N0: trastuzumab for 12 months + anthracycline-free chemotherapy",
            "T2–T3 (> 20 mm) or N(+): trastuzumab ± pertuzumab for 12 months + chemotherapy",
        ],
        therapy_type: TherapyType::ChemotherapyHer2,
    },
    CatalogEntry {
        code: SubtypeCode::LuminalBHer2Pos,
        main_therapy: "Chemotherapy + anti-HER2 therapy + hormone therapy",
        recommendations: &[
            "T1a (≤ 5 mm) and N0: adjuvant hormone therapy only",
            "T1b, c (> 5 mm but ≤ 20 mm) and N0: trastuzumab + anthracycline-free chemotherapy",
            "T2–T3 (> 20 mm) or N(+): trastuzumab ± pertuzumab + chemotherapy",
            "after chemotherapy: adjuvant hormone therapy combined with anti-HER2 therapy",
        ],
        therapy_type: TherapyType::ChemotherapyHer2Hormone,
    },
    CatalogEntry {
        code: SubtypeCode::LuminalBHer2Neg,
        main_therapy: "Chemotherapy in most cases + hormone therapy",
        recommendations: &[
            "T1a-b (≤ 10 mm) and N0: adjuvant hormone therapy only",
            "T1c–T2 and N0-1: consider chemotherapy for grade 3, low ER expression or high Ki67",
            "T3 or N2: chemotherapy in most cases",
            "premenopausal: chemotherapy may be replaced by ovarian suppression",
        ],
        therapy_type: TherapyType::ChemotherapyHormone,
    },
    CatalogEntry {
        code: SubtypeCode::LuminalA,
        main_therapy: "Hormone therapy only in most cases",
        recommendations: &[
            "consider chemotherapy when 4 or more lymph nodes are involved",
            "chemotherapy regimens: DC (4 cycles) or AC/EC (4 cycles)",
        ],
        therapy_type: TherapyType::HormoneTherapy,
    },
];

// ==========================================
// TreatmentCatalog - 指南方案目录
// ==========================================
pub struct TreatmentCatalog {
    // 无状态, 查表逻辑
}

impl Default for TreatmentCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TreatmentCatalog {
    pub fn new() -> Self {
        Self {}
    }

    /// 按亚型编码查表, 未收录的编码返回兜底方案
    pub fn lookup(&self, code: SubtypeCode) -> TreatmentPlan {
        CATALOG
            .iter()
            .find(|entry| entry.code == code)
            .map(CatalogEntry::to_plan)
            .unwrap_or_else(|| Self::fallback(code))
    }

    /// 按原始编码字符串查表
    pub fn lookup_code(&self, raw_code: &str) -> TreatmentPlan {
        match SubtypeCode::from_code(raw_code) {
            Some(code) => self.lookup(code),
            None => {
                warn!(subtype_code = raw_code, "未识别的亚型编码, 返回兜底方案");
                Self::fallback(SubtypeCode::Unknown)
            }
        }
    }

    /// 全部指南表项 (表内顺序)
    pub fn entries(&self) -> Vec<TreatmentPlan> {
        CATALOG.iter().map(CatalogEntry::to_plan).collect()
    }

    fn fallback(code: SubtypeCode) -> TreatmentPlan {
        TreatmentPlan {
            subtype_code: code,
            main_therapy: FALLBACK_MAIN_THERAPY.to_string(),
            recommendations: Vec::new(),
            therapy_type: TherapyType::Unknown,
        }
    }
}
