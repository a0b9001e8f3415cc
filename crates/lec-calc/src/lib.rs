//! # LEC Calculation Engine
//!
//! 核心批量優化引擎：建立成本函數、符號微分、求臨界點、驗證極小值、
//! 成本曲線取樣

pub mod curve;
pub mod expression;
pub mod optimizer;

// Re-export 主要類型
pub use curve::CurveSampler;
pub use expression::{CostExpression, Term};
pub use optimizer::{wilson_lot_size, LotSizeOptimizer};
