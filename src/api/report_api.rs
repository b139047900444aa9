// ==========================================
// 设备 OEE 计算系统 - 报表 API
// ==========================================
// 职责: 读取配置 → 导入输入 → 执行流水线 → 渲染 DTO
// 说明: 可直接传入内存快照, 也可按配置从数据目录读取
// ==========================================

use crate::api::dto::{DowntimeDto, MergedIntervalDto, MetricDto, ReportDto, SummaryDto};
use crate::api::error::{ApiError, ApiResult};
use crate::config::ReportConfig;
use crate::domain::time::{format_display_time, DateRange};
use crate::engine::interval_merger::IntervalMerger;
use crate::engine::pipeline::{ReportInputs, ReportOutput, ReportPipeline, ReportStage};
use crate::importer::RecordImporter;
use tracing::{info, instrument};

/// 报表API
pub struct ReportApi {
    config: ReportConfig,
    importer: RecordImporter,
    pipeline: ReportPipeline,
}

impl ReportApi {
    /// 创建新的ReportApi实例
    ///
    /// # 返回
    /// - Err(ApiError::Config): 配置校验失败
    pub fn new(config: ReportConfig) -> ApiResult<Self> {
        config.validate()?;
        let merger = IntervalMerger::new(config.automated_reason.clone());
        Ok(Self {
            config,
            importer: RecordImporter::standard(),
            pipeline: ReportPipeline::new(merger),
        })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// 按配置从数据目录读取三类输入
    #[instrument(skip(self), fields(data_dir = %self.config.data_dir.display()))]
    pub fn load_inputs(&self) -> ApiResult<ReportInputs> {
        let inputs = self.importer.load_inputs(
            &self.config.status_path(),
            &self.config.manual_path(),
            &self.config.production_path(),
        )?;
        Ok(inputs)
    }

    /// 执行任一阶段并渲染为 DTO
    ///
    /// # 返回
    /// - Ok(ReportDto): 阶段输出
    /// - Err(ApiError::InvalidInput): 日期范围起点晚于终点
    pub fn run(&self, inputs: ReportInputs, stage: ReportStage) -> ApiResult<ReportDto> {
        if let ReportStage::DailyOee(range) = stage {
            validate_range(&range)?;
        }

        let dto = match self.pipeline.run(inputs, stage) {
            ReportOutput::Intervals(intervals) => {
                ReportDto::Intervals(intervals.iter().map(MergedIntervalDto::from).collect())
            }
            ReportOutput::Downtime(rows) => {
                ReportDto::Downtime(rows.iter().map(DowntimeDto::from).collect())
            }
            ReportOutput::EquipmentOee(rows) => {
                ReportDto::Metrics(rows.iter().map(MetricDto::from).collect())
            }
            ReportOutput::DailyOee(rows) => {
                ReportDto::Metrics(rows.iter().map(MetricDto::from).collect())
            }
            ReportOutput::Summary(summary) => ReportDto::Summary(SummaryDto::from(&summary)),
        };
        Ok(dto)
    }

    /// 从数据目录读取输入后执行
    pub fn run_from_files(&self, stage: ReportStage) -> ApiResult<ReportDto> {
        let inputs = self.load_inputs()?;
        info!(?stage, "按配置文件生成报表");
        self.run(inputs, stage)
    }

    // ==========================================
    // 分阶段便捷接口
    // ==========================================

    /// 合并区间（未切分）
    pub fn merged_intervals(&self, inputs: ReportInputs) -> Vec<MergedIntervalDto> {
        let rows = self.pipeline.merged(inputs);
        rows.iter().map(MergedIntervalDto::from).collect()
    }

    /// 合并并按日切分后的区间
    pub fn split_intervals(&self, inputs: ReportInputs) -> Vec<MergedIntervalDto> {
        let rows = self.pipeline.split(inputs);
        rows.iter().map(MergedIntervalDto::from).collect()
    }

    pub fn downtime_report(&self, inputs: ReportInputs) -> Vec<DowntimeDto> {
        let rows = self.pipeline.downtime(inputs);
        rows.iter().map(DowntimeDto::from).collect()
    }

    pub fn equipment_oee(&self, inputs: ReportInputs) -> Vec<MetricDto> {
        let rows = self.pipeline.equipment_oee(inputs);
        rows.iter().map(MetricDto::from).collect()
    }

    pub fn daily_oee(&self, inputs: ReportInputs, range: DateRange) -> ApiResult<Vec<MetricDto>> {
        validate_range(&range)?;
        let rows = self.pipeline.daily_oee(inputs, range);
        Ok(rows.iter().map(MetricDto::from).collect())
    }

    pub fn summary(&self, inputs: ReportInputs) -> SummaryDto {
        SummaryDto::from(&self.pipeline.summary(inputs))
    }

    /// 原始时间字符串 → 展示格式 (YYYY/MM/DD HH:MM:SS)
    ///
    /// # 返回
    /// - Err(ApiError::TimeFormat): 无法解析, 不输出残缺字符串
    pub fn display_time(&self, raw: &str) -> ApiResult<String> {
        Ok(format_display_time(raw)?)
    }
}

fn validate_range(range: &DateRange) -> ApiResult<()> {
    match (range.from, range.to) {
        (Some(from), Some(to)) if from > to => Err(ApiError::InvalidInput(format!(
            "日期范围无效: {} 晚于 {}",
            from, to
        ))),
        _ => Ok(()),
    }
}
