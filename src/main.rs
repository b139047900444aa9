// ==========================================
// 设备 OEE 计算系统 - 命令行主入口
// ==========================================
// 输出: 报表 JSON 写入 stdout, 日志写入 stderr
// 失败: 记录错误并以退出码 1 结束
// ==========================================

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use equipment_oee::config::ReportConfig;
use equipment_oee::domain::DateRange;
use equipment_oee::engine::ReportStage;
use equipment_oee::{logging, ReportApi};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "equipment-oee", version)]
#[command(about = "设备 OEE 计算: 状态区间合并、日界切分、停机聚合与指标报表")]
struct Cli {
    /// JSON 配置文件
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// 数据目录（覆盖配置文件与环境变量）
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// 日志过滤器, 如 debug 或 equipment_oee=trace
    #[arg(long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,

    /// 以 JSON 行格式输出日志
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 合并后的状态区间
    Merged,
    /// 合并并按日切分后的状态区间
    Split,
    /// 按设备/日期/原因统计停机次数
    Downtime,
    /// 按设备计算 OEE
    Oee,
    /// 按设备按日计算 OEE
    Daily {
        #[arg(long, value_name = "DATE")]
        from: Option<NaiveDate>,
        #[arg(long, value_name = "DATE")]
        to: Option<NaiveDate>,
    },
    /// 设备 OEE + 全厂平均 + 各设备日均
    Summary,
}

impl Commands {
    fn stage(&self) -> ReportStage {
        match self {
            Commands::Merged => ReportStage::Merged,
            Commands::Split => ReportStage::Split,
            Commands::Downtime => ReportStage::Downtime,
            Commands::Oee => ReportStage::EquipmentOee,
            Commands::Daily { from, to } => ReportStage::DailyOee(DateRange::new(*from, *to)),
            Commands::Summary => ReportStage::Summary,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        tracing::error!(error = %format!("{:#}", err), "报表生成失败");
        eprintln!("错误: {:#}", err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = ReportConfig::load(cli.config.as_deref()).context("加载配置失败")?;

    // 命令行参数优先级最高
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = Some(level);
    }

    // 未指定级别时由 RUST_LOG 决定
    logging::init_with_filter(config.log_level.as_deref(), cli.log_json)
        .context("日志过滤器无效")?;

    let api = ReportApi::new(config).context("配置校验失败")?;
    tracing::info!(
        version = equipment_oee::VERSION,
        data_dir = %api.config().data_dir.display(),
        "{} 启动",
        equipment_oee::APP_NAME
    );

    let stage = cli.command.stage();
    let report = api.run_from_files(stage).context("生成报表失败")?;

    let json = serde_json::to_string_pretty(&report).context("序列化报表失败")?;
    println!("{}", json);
    Ok(())
}
