// ==========================================
// 乳腺癌治疗规划系统 - 隐私保护
// ==========================================
// 职责: 姓名字段 PII 筛查 / 显示名脱敏 / 患者编码生成
// 红线: 原始姓名不进入日志, 不进入任何输出
// ==========================================

use regex::Regex;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::warn;
use uuid::Uuid;

pub const ANONYMOUS_DISPLAY_NAME: &str = "Anonymous patient";
const DISPLAY_NAME_PREFIX: &str = "Patient_";
const PATIENT_CODE_PREFIX: &str = "BC_";
const HASH_PREFIX_LEN: usize = 8;

/// PII 类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiKind {
    FullName,   // 连续三个单词 (不区分大小写)
    CardNumber, // 16 位银行卡号
    Phone,      // 国际格式电话
    Email,      // 邮箱片段
    PostalCode, // 6 位邮编
}

impl fmt::Display for PiiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PiiKind::FullName => write!(f, "full_name"),
            PiiKind::CardNumber => write!(f, "card_number"),
            PiiKind::Phone => write!(f, "phone"),
            PiiKind::Email => write!(f, "email"),
            PiiKind::PostalCode => write!(f, "postal_code"),
        }
    }
}

// ==========================================
// PrivacyGuard - PII 筛查 + 脱敏
// ==========================================
pub struct PrivacyGuard {
    patterns: Vec<(PiiKind, Regex)>,
}

impl PrivacyGuard {
    pub fn new() -> Result<Self, regex::Error> {
        let patterns = vec![
            (
                PiiKind::FullName,
                Regex::new(r"(?i)\p{Lu}\p{Ll}+\s\p{Lu}\p{Ll}+\s\p{Lu}\p{Ll}+")?,
            ),
            (
                PiiKind::CardNumber,
                Regex::new(r"\d{4}\s?\d{4}\s?\d{4}\s?\d{4}")?,
            ),
            (
                PiiKind::Phone,
                Regex::new(r"\+\d{1,3}\s?\(?\d{3}\)?\s?\d{3}[\s-]?\d{2}[\s-]?\d{2}")?,
            ),
            (PiiKind::Email, Regex::new(r"@\w+\.\w+")?),
            (PiiKind::PostalCode, Regex::new(r"\d{6}")?),
        ];

        Ok(Self { patterns })
    }

    /// 筛查自由文本中的 PII, 返回命中的类别 (按模式顺序, 不重复)
    pub fn detect(&self, text: &str) -> Vec<PiiKind> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        self.patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(text))
            .map(|(kind, _)| *kind)
            .collect()
    }

    /// 姓名 → 显示名
    ///
    /// 空名返回 `Anonymous patient`; 否则为 `Patient_` + SHA-256 前 8 位 (大写十六进制)。
    /// 同一姓名总是得到同一显示名。
    pub fn pseudonymize(&self, name: Option<&str>) -> String {
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            None => return ANONYMOUS_DISPLAY_NAME.to_string(),
            Some(name) => name,
        };

        let hits = self.detect(name);
        if !hits.is_empty() {
            // 只记录类别, 不记录原文
            warn!(kinds = ?hits, "姓名字段疑似包含 PII");
        }

        format!("{}{}", DISPLAY_NAME_PREFIX, hash_prefix(name))
    }
}

/// 患者编码: `BC_` + SHA-256(`age_subtype_stage_<uuid>`) 前 8 位
///
/// 含随机成分, 同一画像两次调用得到不同编码
pub fn patient_code(age: u32, subtype_code: &str, stage: u8) -> String {
    let material = format!("{}_{}_{}_{}", age, subtype_code, stage, Uuid::new_v4());
    format!("{}{}", PATIENT_CODE_PREFIX, hash_prefix(&material))
}

fn hash_prefix(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..HASH_PREFIX_LEN].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> PrivacyGuard {
        PrivacyGuard::new().unwrap()
    }

    #[test]
    fn test_detect_each_kind() {
        let guard = guard();

        assert_eq!(guard.detect("Mary Ann Smith"), vec![PiiKind::FullName]);
        assert_eq!(guard.detect("Иванова Мария Петровна"), vec![PiiKind::FullName]);
        // 大小写不敏感
        assert_eq!(guard.detect("mary ann smith"), vec![PiiKind::FullName]);
        assert_eq!(guard.detect("иванова мария петровна"), vec![PiiKind::FullName]);
        assert!(guard.detect("card 4111 1111 1111 1111").contains(&PiiKind::CardNumber));
        assert_eq!(guard.detect("+7 (912) 345-67-89"), vec![PiiKind::Phone]);
        assert_eq!(guard.detect("jane@example.com"), vec![PiiKind::Email]);
        assert_eq!(guard.detect("zip 630090"), vec![PiiKind::PostalCode]);
    }

    #[test]
    fn test_detect_clean_text() {
        let guard = guard();
        assert!(guard.detect("Jane Roe").is_empty());
        assert!(guard.detect("").is_empty());
        assert!(guard.detect("   ").is_empty());
    }

    #[test]
    fn test_pseudonymize_stable() {
        let guard = guard();
        let first = guard.pseudonymize(Some("Jane Roe"));
        let second = guard.pseudonymize(Some("  Jane Roe "));

        assert_eq!(first, second);
        assert!(first.starts_with("Patient_"));
        assert_eq!(first.len(), "Patient_".len() + 8);
        assert!(!first.contains("Jane"));
        assert_ne!(first, guard.pseudonymize(Some("John Roe")));
    }

    #[test]
    fn test_pseudonymize_empty() {
        let guard = guard();
        assert_eq!(guard.pseudonymize(None), ANONYMOUS_DISPLAY_NAME);
        assert_eq!(guard.pseudonymize(Some("  ")), ANONYMOUS_DISPLAY_NAME);
    }

    #[test]
    fn test_patient_code_format() {
        let code = patient_code(45, "HR+HER2-", 2);
        assert!(code.starts_with("BC_"));
        assert_eq!(code.len(), 11);
        assert!(code[3..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));

        // 随机成分
        assert_ne!(code, patient_code(45, "HR+HER2-", 2));
    }
}
