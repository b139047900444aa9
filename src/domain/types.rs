// ==========================================
// 设备 OEE 计算系统 - 领域类型定义
// ==========================================
// 设备状态 / 数据来源 / 覆盖程度 / OEE 等级
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 设备状态 (Equipment Status)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与原始日志一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentStatus {
    Running, // 运行
    Idle,    // 待机
    Down,    // 停机
}

impl EquipmentStatus {
    /// 从字符串解析状态（大小写不敏感）
    ///
    /// # 返回
    /// - Some(status): 已知状态
    /// - None: 未知状态字符串
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "RUNNING" => Some(EquipmentStatus::Running),
            "IDLE" => Some(EquipmentStatus::Idle),
            "DOWN" => Some(EquipmentStatus::Down),
            _ => None,
        }
    }

    /// 是否计入可用时间 (RUNNING + IDLE)
    pub fn is_available(&self) -> bool {
        matches!(self, EquipmentStatus::Running | EquipmentStatus::Idle)
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentStatus::Running => write!(f, "RUNNING"),
            EquipmentStatus::Idle => write!(f, "IDLE"),
            EquipmentStatus::Down => write!(f, "DOWN"),
        }
    }
}

// ==========================================
// 数据来源 (Data Source)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Automated, // 设备自动采集
    Manual,    // 人工录入
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Automated => write!(f, "automated"),
            DataSource::Manual => write!(f, "manual"),
        }
    }
}

// ==========================================
// 覆盖程度 (Displacement)
// ==========================================
// 合并结果中每段区间相对原自动区间的来源标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Displacement {
    None,    // 自动区间未被人工覆盖
    Partial, // 自动区间被部分覆盖后的剩余片段
    Full,    // 人工区间本身（完全覆盖该时段）
}

impl fmt::Display for Displacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Displacement::None => write!(f, "NONE"),
            Displacement::Partial => write!(f, "PARTIAL"),
            Displacement::Full => write!(f, "FULL"),
        }
    }
}

// ==========================================
// OEE 等级 (OEE Category)
// ==========================================
// 顺序: Bad < Minimum < Good < Recommended < Excellent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OeeCategory {
    Bad,         // [0, 0.5]
    Minimum,     // (0.5, 0.6]
    Good,        // (0.6, 0.75]
    Recommended, // (0.75, 0.85]
    Excellent,   // (0.85, 1]
}

impl OeeCategory {
    /// 按 OEE 值划分等级
    ///
    /// 每档区间左开右闭，0 归入 Bad。
    /// 超出 [0, 1] 或 NaN 返回 None（不猜测修正）。
    pub fn from_oee(oee: f64) -> Option<Self> {
        if oee.is_nan() || oee < 0.0 || oee > 1.0 {
            return None;
        }

        let category = if oee <= 0.5 {
            OeeCategory::Bad
        } else if oee <= 0.6 {
            OeeCategory::Minimum
        } else if oee <= 0.75 {
            OeeCategory::Good
        } else if oee <= 0.85 {
            OeeCategory::Recommended
        } else {
            OeeCategory::Excellent
        };

        Some(category)
    }
}

impl fmt::Display for OeeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OeeCategory::Bad => write!(f, "Bad"),
            OeeCategory::Minimum => write!(f, "Minimum"),
            OeeCategory::Good => write!(f, "Good"),
            OeeCategory::Recommended => write!(f, "Recommended"),
            OeeCategory::Excellent => write!(f, "Excellent"),
        }
    }
}
