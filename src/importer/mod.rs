// ==========================================
// 设备 OEE 计算系统 - 导入层
// ==========================================
// 职责: 外部文件导入, 生成领域记录
// 支持: JSON, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod record_importer;
pub mod record_importer_trait;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, JsonParser, UniversalFileParser};
pub use record_importer::RecordImporter;

// 重导出 Trait 接口
pub use record_importer_trait::{FileParser, RawRow, RecordMapper, SourceRow};
