// ==========================================
// 乳腺癌治疗规划系统 - CSV 批量录入
// ==========================================
// 流程: 解析 → 映射 → 校验 → 分流 (通过 / 拒绝)
// 红线: 单行校验失败不中断整批; 仅文件级错误直接返回 Err
// ==========================================

use crate::domain::patient::PatientProfile;
use crate::importer::error::{ImportResult, ValidationError};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{CsvParser, RawRow};
use crate::importer::validator::ProfileValidator;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// 批次结果
// ==========================================

/// 通过校验的行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptedRow {
    pub row_number: usize,
    pub patient_name: Option<String>, // 原样保留, 由隐私模块脱敏
    pub profile: PatientProfile,
}

/// 被拒绝的行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    pub row_number: usize,
    pub errors: Vec<ValidationError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportBatch {
    pub batch_id: String,
    pub source: String,
    pub imported_at: DateTime<Utc>,
    pub accepted: Vec<AcceptedRow>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportBatch {
    pub fn total_rows(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }
}

// ==========================================
// PatientCsvImporter - CSV 批量录入器
// ==========================================
pub struct PatientCsvImporter {
    parser: CsvParser,
    mapper: FieldMapper,
    validator: ProfileValidator,
}

impl PatientCsvImporter {
    /// # 参数
    /// - delimiter: 分隔符 (通常为 b',' 或 b';')
    /// - row_limit: 单批最大数据行数
    pub fn new(delimiter: u8, row_limit: usize) -> Self {
        Self {
            parser: CsvParser::new(delimiter).with_row_limit(row_limit),
            mapper: FieldMapper,
            validator: ProfileValidator::new(),
        }
    }

    /// 从 CSV 文件录入
    #[instrument(skip(self, file_path), fields(file = %file_path.display()))]
    pub fn import_file(&self, file_path: &Path) -> ImportResult<ImportBatch> {
        let rows = self.parser.parse_file(file_path)?;
        self.process(rows, file_path.display().to_string())
    }

    /// 从任意输入流录入
    pub fn import_reader<R: Read>(&self, input: R, source: &str) -> ImportResult<ImportBatch> {
        let rows = self.parser.parse_reader(input)?;
        self.process(rows, source.to_string())
    }

    fn process(&self, rows: Vec<(usize, RawRow)>, source: String) -> ImportResult<ImportBatch> {
        let batch_id = Uuid::new_v4().to_string();
        info!(batch_id = %batch_id, source = %source, total_rows = rows.len(), "开始批量录入");

        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for (row_number, row) in rows {
            let record = self.mapper.map_to_raw_patient(&row, row_number);
            match self.validator.validate(&record) {
                Ok(profile) => accepted.push(AcceptedRow {
                    row_number,
                    patient_name: record.patient_name.clone(),
                    profile,
                }),
                Err(errors) => {
                    debug!(row = row_number, error_count = errors.len(), "行校验失败");
                    rejected.push(RejectedRow { row_number, errors });
                }
            }
        }

        info!(
            batch_id = %batch_id,
            accepted = accepted.len(),
            rejected = rejected.len(),
            "批量录入完成"
        );

        Ok(ImportBatch {
            batch_id,
            source,
            imported_at: Utc::now(),
            accepted,
            rejected,
        })
    }
}
