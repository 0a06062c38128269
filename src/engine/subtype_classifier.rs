// ==========================================
// 乳腺癌治疗规划系统 - 分子分型引擎
// ==========================================
// 红线: 规则顺序即语义, 命中即返回, 顺序不得调整
// ==========================================
// 职责: ER/PR/HER2/Ki67 → 分子亚型
// 输入: BiomarkerPanel
// 输出: MolecularSubtype + 命中规则编码
// ==========================================

use crate::domain::patient::BiomarkerPanel;
use crate::domain::subtype::MolecularSubtype;
use crate::domain::types::SubtypeCode;
use tracing::debug;

/// Luminal B 判定的 Ki67 阈值 (含等号)
pub const KI67_LUMINAL_B_THRESHOLD: f64 = 20.0;

/// 未命中任何规则时的规则编码
pub const FALLBACK_RULE_ID: &str = "R4_UNDETERMINED";

// ==========================================
// 分型规则表
// ==========================================
// 顺序执行, 第一条命中的规则决定亚型:
// 1) 三阴性 → TNBC
// 2) HER2+ 且 ER-/PR- → HR-HER2+
// 3a) ER+ 且 HER2+ → HR+HER2+B
// 3b) ER+ 且 (Ki67 ≥ 20 或 PR-) → HR+HER2-B
// 3c) ER+ → HR+HER2-A
// 4) 其他 → Unknown
pub struct SubtypeRule {
    pub rule_id: &'static str,
    pub code: SubtypeCode,
    matches: fn(&BiomarkerPanel) -> bool,
}

impl SubtypeRule {
    pub fn matches(&self, panel: &BiomarkerPanel) -> bool {
        (self.matches)(panel)
    }
}

fn triple_negative(p: &BiomarkerPanel) -> bool {
    p.is_triple_negative()
}

fn her2_non_luminal(p: &BiomarkerPanel) -> bool {
    p.her2_positive && p.is_hormone_receptor_negative()
}

fn luminal_b_her2_positive(p: &BiomarkerPanel) -> bool {
    p.er_positive && p.her2_positive
}

fn luminal_b_her2_negative(p: &BiomarkerPanel) -> bool {
    // NaN 不满足 >=, 此时仅由 PR 决定
    p.er_positive && (p.ki67_pct >= KI67_LUMINAL_B_THRESHOLD || !p.pr_positive)
}

fn luminal_a(p: &BiomarkerPanel) -> bool {
    p.er_positive
}

pub const SUBTYPE_RULES: [SubtypeRule; 5] = [
    SubtypeRule {
        rule_id: "R1_TRIPLE_NEGATIVE",
        code: SubtypeCode::Tnbc,
        matches: triple_negative,
    },
    SubtypeRule {
        rule_id: "R2_HER2_NON_LUMINAL",
        code: SubtypeCode::HrNegHer2Pos,
        matches: her2_non_luminal,
    },
    SubtypeRule {
        rule_id: "R3A_LUMINAL_B_HER2_POS",
        code: SubtypeCode::LuminalBHer2Pos,
        matches: luminal_b_her2_positive,
    },
    SubtypeRule {
        rule_id: "R3B_LUMINAL_B_HER2_NEG",
        code: SubtypeCode::LuminalBHer2Neg,
        matches: luminal_b_her2_negative,
    },
    SubtypeRule {
        rule_id: "R3C_LUMINAL_A",
        code: SubtypeCode::LuminalA,
        matches: luminal_a,
    },
];

// ==========================================
// SubtypeClassifier - 分子分型引擎
// ==========================================
pub struct SubtypeClassifier {
    // 无状态引擎, 规则表为编译期常量
}

impl Default for SubtypeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SubtypeClassifier {
    pub fn new() -> Self {
        Self {}
    }

    /// 分型 (不校验 Ki67 取值范围, 任意数值均接受)
    pub fn classify(&self, er: bool, pr: bool, her2: bool, ki67: f64) -> MolecularSubtype {
        self.classify_panel(&BiomarkerPanel::new(er, pr, her2, ki67))
    }

    pub fn classify_panel(&self, panel: &BiomarkerPanel) -> MolecularSubtype {
        self.classify_with_rule(panel).0
    }

    /// 分型并返回命中的规则编码
    pub fn classify_with_rule(&self, panel: &BiomarkerPanel) -> (MolecularSubtype, &'static str) {
        let (code, rule_id) = SUBTYPE_RULES
            .iter()
            .find(|rule| rule.matches(panel))
            .map(|rule| (rule.code, rule.rule_id))
            .unwrap_or((SubtypeCode::Unknown, FALLBACK_RULE_ID));

        debug!(
            er = panel.er_positive,
            pr = panel.pr_positive,
            her2 = panel.her2_positive,
            ki67 = panel.ki67_pct,
            rule = rule_id,
            subtype = %code,
            "分子分型完成"
        );

        (MolecularSubtype::from_code(code), rule_id)
    }
}
