// ==========================================
// 乳腺癌治疗规划系统 - 字段映射器
// ==========================================
// 职责: CSV 列名 (含别名) → RawPatientRecord
// 不做类型转换, 类型与范围统一交给 ProfileValidator
// ==========================================

use crate::domain::patient::RawPatientRecord;
use crate::importer::file_parser::RawRow;

pub struct FieldMapper;

impl FieldMapper {
    pub fn map_to_raw_patient(&self, row: &RawRow, row_number: usize) -> RawPatientRecord {
        RawPatientRecord {
            patient_name: self.get_string(row, "patient_name"),
            age: self.get_string(row, "age"),
            sex: self.get_string(row, "sex"),
            weight_kg: self.get_string(row, "weight_kg"),
            height_cm: self.get_string(row, "height_cm"),
            cancer_stage: self.get_string(row, "cancer_stage"),
            menopause_status: self.get_string(row, "menopause_status"),
            tumour_size_cm: self.get_string(row, "tumour_size_cm"),
            ki67_pct: self.get_string(row, "ki67_pct"),
            er_status: self.get_string(row, "er_status"),
            pr_status: self.get_string(row, "pr_status"),
            her2_status: self.get_string(row, "her2_status"),
            distant_metastasis_count: self.get_string(row, "distant_metastasis_count"),
            row_number,
        }
    }

    /// 提取字符串字段, 支持多个可能的列名（别名）
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        // 表头已在解析阶段转为小写
        let aliases: Vec<&str> = match key {
            "patient_name" => vec!["patient_name", "name", "full_name"],
            "weight_kg" => vec!["weight_kg", "weight"],
            "height_cm" => vec!["height_cm", "height"],
            "cancer_stage" => vec!["cancer_stage", "stage"],
            "menopause_status" => vec!["menopause_status", "menopause"],
            "tumour_size_cm" => vec![
                "tumour_size_cm",
                "tumor_size_cm",
                "tumour_size",
                "tumor_size",
                "tumour_size_mm", // 原表单字段名, 取值仍为 cm
            ],
            "ki67_pct" => vec!["ki67_pct", "ki67", "ki-67"],
            "er_status" => vec!["er_status", "er"],
            "pr_status" => vec!["pr_status", "pr"],
            "her2_status" => vec!["her2_status", "her2"],
            "distant_metastasis_count" => vec!["distant_metastasis_count", "metastasis_count"],
            _ => vec![key],
        };

        // 尝试所有可能的列名
        for alias in aliases {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_field_mapper_basic() {
        let mut row = HashMap::new();
        row.insert("age".to_string(), "52".to_string());
        row.insert("ki67".to_string(), "18".to_string());
        row.insert("tumor_size".to_string(), "2.4".to_string());
        row.insert("her2".to_string(), "no".to_string());

        let record = FieldMapper.map_to_raw_patient(&row, 4);

        assert_eq!(record.age, Some("52".to_string()));
        assert_eq!(record.ki67_pct, Some("18".to_string()));
        assert_eq!(record.tumour_size_cm, Some("2.4".to_string()));
        assert_eq!(record.her2_status, Some("no".to_string()));
        assert_eq!(record.row_number, 4);
    }

    #[test]
    fn test_field_mapper_empty_as_none() {
        let mut row = HashMap::new();
        row.insert("weight_kg".to_string(), "   ".to_string());
        row.insert("weight".to_string(), "70".to_string());
        row.insert("patient_name".to_string(), "".to_string());

        let record = FieldMapper.map_to_raw_patient(&row, 1);

        // 首选列为空时回退到别名列
        assert_eq!(record.weight_kg, Some("70".to_string()));
        assert_eq!(record.patient_name, None);
    }

    #[test]
    fn test_field_mapper_form_tumour_column() {
        let mut row = HashMap::new();
        row.insert("tumour_size_mm".to_string(), "1.7".to_string());

        let record = FieldMapper.map_to_raw_patient(&row, 2);
        assert_eq!(record.tumour_size_cm, Some("1.7".to_string()));
    }
}
