// ==========================================
// 乳腺癌治疗规划系统 - 录入层
// ==========================================
// 职责: 外部原始数据 (表单/JSON/CSV) → 已校验的 PatientProfile
// 支持: 单条记录, CSV 批量
// ==========================================

// 模块声明
pub mod csv_import;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod validator;

// 重导出核心类型
pub use csv_import::{AcceptedRow, ImportBatch, PatientCsvImporter, RejectedRow};
pub use error::{ImportError, ImportResult, ValidationError};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, RawRow};
pub use validator::ProfileValidator;
