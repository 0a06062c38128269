// ==========================================
// 录入层集成测试
// ==========================================
// 测试范围: CSV 文件 → 解析 → 映射 → 校验 → 分流
// ==========================================

mod helpers;

use helpers::profile_builder::{csv_with_rows, RawRecordBuilder};
use onco_planner::domain::types::{CancerStage, MenopauseStatus};
use onco_planner::importer::{ImportError, PatientCsvImporter, ProfileValidator, ValidationError};
use std::fs;
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_csv_file_import_mixed_rows() {
    println!("\n=== 测试：CSV 文件录入 (合法 + 非法混合) ===");

    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "patients.csv",
        &csv_with_rows(&[
            "Ann Lee,52,female,2,post,2.4,18,yes,yes,no",
            "Bea Kim,,female,2,post,2.4,18,yes,yes,no",
            "Cy Dow,64,male,IV,post,30,250,maybe,no,no",
            ",38,f,1,pre,0.8,5,positive,negative,negative",
        ]),
    );

    let batch = PatientCsvImporter::new(b',', 100).import_file(&path).unwrap();

    println!("✓ 通过: {}, 拒绝: {}", batch.accepted.len(), batch.rejected.len());
    assert_eq!(batch.total_rows(), 4);
    assert_eq!(batch.accepted.len(), 2);
    assert_eq!(batch.rejected.len(), 2);

    // 行 2: 年龄缺失
    assert_eq!(batch.rejected[0].row_number, 2);
    assert_eq!(
        batch.rejected[0].errors,
        vec![ValidationError::MissingField {
            field: "age".to_string()
        }]
    );

    // 行 3: 肿瘤大小 / Ki67 / ER 三处错误一次收集
    let fields: Vec<&str> = batch.rejected[1].errors.iter().map(|e| e.field()).collect();
    assert_eq!(fields, vec!["tumour_size_cm", "ki67_pct", "er_status"]);

    let last = &batch.accepted[1];
    assert_eq!(last.row_number, 4);
    assert_eq!(last.profile.cancer_stage, CancerStage::Stage1);
    assert_eq!(last.profile.menopause_status, MenopauseStatus::Pre);
    assert!(last.profile.er_positive);
    assert!(!last.profile.pr_positive);
}

#[test]
fn test_csv_semicolon_with_aliases() {
    println!("\n=== 测试：分号分隔 + 列名别名 ===");

    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "aliases.csv",
        "Name;Age;Sex;Stage;Menopause;Tumor_Size;Ki-67;ER;PR;HER2;Weight\n\
         Dee Ray;47;female;3;peri;1.5;22;1;0;1;58\n",
    );

    let batch = PatientCsvImporter::new(b';', 100).import_file(&path).unwrap();
    assert_eq!(batch.rejected.len(), 0, "rejected: {:?}", batch.rejected);

    let row = &batch.accepted[0];
    assert_eq!(row.patient_name.as_deref(), Some("Dee Ray"));
    assert_eq!(row.profile.weight_kg, Some(58.0));
    assert!(row.profile.her2_positive);
}

#[test]
fn test_csv_file_errors() {
    println!("\n=== 测试：文件级错误 ===");

    let dir = TempDir::new().unwrap();
    let importer = PatientCsvImporter::new(b',', 100);

    let missing = dir.path().join("missing.csv");
    assert!(matches!(
        importer.import_file(&missing),
        Err(ImportError::FileNotFound(_))
    ));

    let json = write_csv(&dir, "patients.json", "{}");
    assert!(matches!(
        importer.import_file(&json),
        Err(ImportError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_csv_row_limit() {
    let dir = TempDir::new().unwrap();
    let rows: Vec<String> = (0..5)
        .map(|i| format!("P{},5{},female,2,post,2.0,10,no,no,no", i, i))
        .collect();
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let path = write_csv(&dir, "big.csv", &csv_with_rows(&row_refs));

    let result = PatientCsvImporter::new(b',', 4).import_file(&path);
    assert!(matches!(
        result,
        Err(ImportError::RowLimitExceeded { rows: 5, limit: 4 })
    ));
}

#[test]
fn test_validator_rejects_missing_sex() {
    let record = RawRecordBuilder::new().without_sex().ki67("101").build();
    let errors = ProfileValidator::new().validate(&record).unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].field(), "sex");
    assert_eq!(errors[1].field(), "ki67_pct");
}
