//! 成本曲線取樣配置

use serde::{Deserialize, Serialize};

use crate::{LecError, Result};

/// 成本曲線取樣配置
///
/// 未提供的欄位使用預設值（q_min=10、q_max=200、pontos=100）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// 最小批量
    #[serde(default = "CurveConfig::default_q_min")]
    pub q_min: f64,

    /// 最大批量
    #[serde(default = "CurveConfig::default_q_max")]
    pub q_max: f64,

    /// 取樣點數
    #[serde(rename = "pontos", default = "CurveConfig::default_points")]
    pub points: usize,
}

impl CurveConfig {
    /// 創建新的曲線配置
    pub fn new(q_min: f64, q_max: f64, points: usize) -> Self {
        Self {
            q_min,
            q_max,
            points,
        }
    }

    /// 建構器模式：設置批量範圍
    pub fn with_range(mut self, q_min: f64, q_max: f64) -> Self {
        self.q_min = q_min;
        self.q_max = q_max;
        self
    }

    /// 建構器模式：設置取樣點數
    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    /// 以最佳批量為中心建立範圍：[q*/spread, q*·spread]
    ///
    /// 預設範圍 10..200 可能不包含最佳批量（例如 q*≈223.61）。
    pub fn around(optimal_lot: f64, spread: f64, points: usize) -> Self {
        Self::new(optimal_lot / spread, optimal_lot * spread, points)
    }

    /// 驗證範圍
    pub fn validate(&self) -> Result<()> {
        let range_ok = self.q_min.is_finite()
            && self.q_max.is_finite()
            && self.q_min > 0.0
            && self.q_max >= self.q_min;

        if range_ok && self.points >= 1 {
            Ok(())
        } else {
            Err(LecError::InvalidRange {
                q_min: self.q_min,
                q_max: self.q_max,
                points: self.points,
            })
        }
    }

    fn default_q_min() -> f64 {
        10.0
    }

    fn default_q_max() -> f64 {
        200.0
    }

    fn default_points() -> usize {
        100
    }
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self::new(
            Self::default_q_min(),
            Self::default_q_max(),
            Self::default_points(),
        )
    }
}
