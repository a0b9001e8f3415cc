//! # LEC Core
//!
//! 經濟訂購批量（Lote Econômico de Compra）的資料模型與類型定義

pub mod config;
pub mod params;
pub mod report;
pub mod rounding;

// Re-export 主要類型
pub use config::CurveConfig;
pub use params::{CostParameters, ParameterUpdate};
pub use report::{
    ComparisonResult, CostCurve, DetailedReport, FullAnalysis, OptimalityCheck,
    OptimizationResult, SimulationSummary,
};

/// LEC 錯誤類型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LecError {
    #[error("無效的參數 {name}: {value}（必須為正的有限數值）")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("找不到正的實數臨界點: {0}")]
    DegenerateOptimization(String),

    #[error("批量必須大於零: {0}")]
    NonPositiveLotSize(f64),

    #[error("無效的曲線範圍: q_min={q_min}, q_max={q_max}, 點數={points}")]
    InvalidRange { q_min: f64, q_max: f64, points: usize },

    #[error("計算錯誤: {0}")]
    CalculationError(String),
}

impl LecError {
    /// 是否為呼叫端輸入錯誤（請求層對應為 4xx）
    ///
    /// `DegenerateOptimization` 與 `CalculationError` 代表模型假設被破壞，
    /// 屬於內部錯誤。
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LecError::InvalidParameter { .. }
                | LecError::NonPositiveLotSize(_)
                | LecError::InvalidRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LecError>;
