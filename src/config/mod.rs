// ==========================================
// 设备 OEE 计算系统 - 配置层
// ==========================================
// 职责: 数据文件位置、自动区间原因、日志级别
// 来源: JSON 配置文件 + 环境变量覆写
// ==========================================

pub mod report_config;

// 重导出核心配置
pub use report_config::{config_keys, ConfigError, ReportConfig};
