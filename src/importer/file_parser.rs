// ==========================================
// 乳腺癌治疗规划系统 - CSV 文件解析器
// ==========================================
// 职责: 文件/流 → 行号 + (表头 → 值) 映射
// 约定: 表头统一小写并去空白; 数据行号从 1 开始 (不含表头)
//       完全空白的行跳过, 但保留原始行号
//       超出行数上限立即停止读取, 不缓冲剩余数据
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// 单行原始数据
pub type RawRow = HashMap<String, String>;

pub struct CsvParser {
    delimiter: u8,
    row_limit: usize,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl CsvParser {
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter,
            row_limit: usize::MAX,
        }
    }

    /// 单批最大数据行数 (不含空白行)
    pub fn with_row_limit(mut self, row_limit: usize) -> Self {
        self.row_limit = row_limit;
        self
    }

    /// 解析 CSV 文件
    pub fn parse_file(&self, file_path: &Path) -> ImportResult<Vec<(usize, RawRow)>> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        // 检查扩展名
        let ext = file_path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(file_path)?;
        self.parse_reader(file)
    }

    /// 解析任意输入流
    pub fn parse_reader<R: Read>(&self, input: R) -> ImportResult<Vec<(usize, RawRow)>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true) // 允许行长度不一致
            .from_reader(input);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_lowercase())
            .collect();

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let mut row_map = HashMap::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push((row_idx + 1, row_map));
            if rows.len() > self.row_limit {
                warn!(limit = self.row_limit, "批次行数超限, 停止读取");
                return Err(ImportError::RowLimitExceeded {
                    rows: rows.len(),
                    limit: self.row_limit,
                });
            }
        }

        Ok(rows)
    }
}
