// ==========================================
// 设备 OEE 计算系统 - 导入接口定义
// ==========================================
// 流程: 文件读取 → 原始行 (列名 → 值) → 领域记录
// ==========================================

use crate::domain::interval::StatusInterval;
use crate::domain::production::ProductionRecord;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 原始行记录
pub type RawRow = HashMap<String, String>;

/// 带源行号的原始行
///
/// 行号为数据行序号（从 1 开始, 不含表头）, 被跳过的空白行也计数,
/// 错误信息中的行号因此与源文件一致。
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    pub row_number: usize,
    pub fields: RawRow,
}

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: JsonParser / CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录
    ///
    /// # 返回
    /// - Ok(Vec<SourceRow>): 行记录列表（空白行已跳过, 行号保留）
    /// - Err: 文件不存在、读取错误、格式错误
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<SourceRow>>;
}

// ==========================================
// RecordMapper Trait
// ==========================================
// 实现者: FieldMapper
// 行号从 1 开始, 用于错误定位
pub trait RecordMapper: Send + Sync {
    /// 自动采集状态行 → 状态区间
    fn map_status(&self, row: &RawRow, row_number: usize) -> ImportResult<StatusInterval>;

    /// 人工录入行 → 状态区间（原因可选）
    fn map_manual(&self, row: &RawRow, row_number: usize) -> ImportResult<StatusInterval>;

    /// 生产行 → 生产记录
    fn map_production(&self, row: &RawRow, row_number: usize) -> ImportResult<ProductionRecord>;
}
