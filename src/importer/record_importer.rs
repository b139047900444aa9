// ==========================================
// 设备 OEE 计算系统 - 记录导入器
// ==========================================
// 职责: 读取状态日志 / 人工记录 / 生产记录三类文件, 组装输入快照
// 约定: 任一文件或任一行失败即中止本次导入
// ==========================================

use crate::domain::interval::StatusInterval;
use crate::domain::production::ProductionRecord;
use crate::engine::pipeline::ReportInputs;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::record_importer_trait::{FileParser, RawRow, RecordMapper, SourceRow};
use std::path::Path;
use tracing::{info, warn};

// ==========================================
// RecordImporter - 记录导入器
// ==========================================
pub struct RecordImporter<P = UniversalFileParser, M = FieldMapper>
where
    P: FileParser,
    M: RecordMapper,
{
    parser: P,
    mapper: M,
}

impl RecordImporter {
    /// 按扩展名解析 + 标准字段映射
    pub fn standard() -> Self {
        Self::new(UniversalFileParser, FieldMapper)
    }
}

impl Default for RecordImporter {
    fn default() -> Self {
        Self::standard()
    }
}

impl<P: FileParser, M: RecordMapper> RecordImporter<P, M> {
    pub fn new(parser: P, mapper: M) -> Self {
        Self { parser, mapper }
    }

    /// 导入自动采集状态日志
    pub fn load_status(&self, path: &Path) -> ImportResult<Vec<StatusInterval>> {
        let rows = self.parser.parse_to_raw_records(path)?;
        let intervals = self.map_rows(&rows, |row, n| self.mapper.map_status(row, n))?;
        Ok(Self::drop_reversed(intervals, path))
    }

    /// 导入人工录入记录
    pub fn load_manual(&self, path: &Path) -> ImportResult<Vec<StatusInterval>> {
        let rows = self.parser.parse_to_raw_records(path)?;
        let intervals = self.map_rows(&rows, |row, n| self.mapper.map_manual(row, n))?;
        Ok(Self::drop_reversed(intervals, path))
    }

    /// 导入生产记录
    pub fn load_production(&self, path: &Path) -> ImportResult<Vec<ProductionRecord>> {
        let rows = self.parser.parse_to_raw_records(path)?;
        self.map_rows(&rows, |row, n| self.mapper.map_production(row, n))
    }

    /// 导入完整输入快照
    pub fn load_inputs(
        &self,
        status_path: &Path,
        manual_path: &Path,
        production_path: &Path,
    ) -> ImportResult<ReportInputs> {
        let inputs = ReportInputs {
            status: self.load_status(status_path)?,
            manual: self.load_manual(manual_path)?,
            production: self.load_production(production_path)?,
        };

        info!(
            status = inputs.status.len(),
            manual = inputs.manual.len(),
            production = inputs.production.len(),
            "输入数据导入完成"
        );
        Ok(inputs)
    }

    // ==========================================
    // 内部方法
    // ==========================================

    fn map_rows<T, F>(&self, rows: &[SourceRow], map: F) -> ImportResult<Vec<T>>
    where
        F: Fn(&RawRow, usize) -> ImportResult<T>,
    {
        rows.iter()
            .map(|row| map(&row.fields, row.row_number))
            .collect()
    }

    /// 丢弃结束早于开始的区间
    fn drop_reversed(intervals: Vec<StatusInterval>, path: &Path) -> Vec<StatusInterval> {
        intervals
            .into_iter()
            .filter(|i| {
                let keep = i.start_time <= i.end_time;
                if !keep {
                    warn!(
                        file = %path.display(),
                        equipment_id = %i.equipment_id,
                        start = %i.start_time,
                        end = %i.end_time,
                        "丢弃结束时间早于开始时间的区间"
                    );
                }
                keep
            })
            .collect()
    }
}
