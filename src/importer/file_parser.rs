// ==========================================
// 设备 OEE 计算系统 - 文件解析器实现
// ==========================================
// 支持: JSON (.json, 对象数组) / CSV (.csv, 首行表头)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::record_importer_trait::{FileParser, RawRow, SourceRow};
use csv::ReaderBuilder;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// 检查文件存在及扩展名
fn check_file(path: &Path, expected_ext: &str) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ext != expected_ext {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(())
}

// ==========================================
// JSON Parser 实现
// ==========================================
pub struct JsonParser;

impl JsonParser {
    /// JSON 标量 → 字符串; null → 空串
    fn value_to_string(value: &Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(s) => s.trim().to_string(),
            other => other.to_string(),
        }
    }
}

impl FileParser for JsonParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<SourceRow>> {
        check_file(file_path, "json")?;

        let reader = BufReader::new(File::open(file_path)?);
        let root: Value = serde_json::from_reader(reader)?;

        let Value::Array(items) = root else {
            return Err(ImportError::JsonParseError(
                "顶层必须是对象数组".to_string(),
            ));
        };

        let mut records = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            let Value::Object(fields) = item else {
                return Err(ImportError::JsonParseError(format!(
                    "第 {} 项不是对象",
                    idx + 1
                )));
            };

            let row_map: RawRow = fields
                .iter()
                .map(|(k, v)| (k.trim().to_string(), Self::value_to_string(v)))
                .collect();

            // 跳过完全空白的对象
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }
            records.push(SourceRow {
                row_number: idx + 1,
                fields: row_map,
            });
        }

        Ok(records)
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<SourceRow>> {
        check_file(file_path, "csv")?;

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let mut row_map = RawRow::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }

            // csv 会静默丢弃纯空行, 行号取源文件行位置（表头占第 1 行）
            let row_number = record
                .position()
                .map(|pos| pos.line().saturating_sub(1) as usize)
                .unwrap_or(idx + 1);
            records.push(SourceRow {
                row_number,
                fields: row_map,
            });
        }

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<SourceRow>> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "json" => JsonParser.parse_to_raw_records(file_path),
            "csv" => CsvParser.parse_to_raw_records(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
