// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量 / 配置 / 命令行指定日志级别
// 日志写入 stderr, stdout 留给报表输出
// ==========================================

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统
///
/// # 参数
/// - directive: 过滤器表达式（如 "debug"、"equipment_oee=trace"）;
///   为 None 时读取 RUST_LOG, 仍缺省则为 info
/// - json: 是否输出 JSON 行格式
///
/// # 返回
/// - Err(ParseError): 过滤器表达式无效（不静默降级）
///
/// # 示例
/// ```no_run
/// use equipment_oee::logging;
/// logging::init_with_filter(None, false).unwrap();
/// ```
pub fn init_with_filter(directive: Option<&str>, json: bool) -> Result<(), ParseError> {
    let filter = build_filter(directive)?;

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // 重复初始化时忽略
    if json {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
    Ok(())
}

/// 构造过滤器: 显式表达式 > RUST_LOG > info
pub fn build_filter(directive: Option<&str>) -> Result<EnvFilter, ParseError> {
    match directive {
        Some(d) => EnvFilter::try_new(d),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
