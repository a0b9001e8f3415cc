//! # Optistock
//!
//! 經濟訂購批量（LEC）計算：請求層只需提供成本參數，即可取得摘要、
//! 詳細報告與成本曲線。

pub use lec_calc::{wilson_lot_size, CostExpression, CurveSampler, LotSizeOptimizer, Term};
pub use lec_core::*;

/// 由成本參數直接產生模擬摘要
pub fn simulate(params: CostParameters) -> Result<SimulationSummary> {
    LotSizeOptimizer::new(params)?.build_summary()
}

/// 套用部分更新後重新計算摘要
pub fn resimulate(
    params: &CostParameters,
    update: &ParameterUpdate,
) -> Result<(CostParameters, SimulationSummary)> {
    let merged = params.apply_update(update)?;
    let summary = simulate(merged)?;
    Ok((merged, summary))
}

/// 由成本參數產生詳細報告
pub fn detailed_report(params: CostParameters) -> Result<DetailedReport> {
    LotSizeOptimizer::new(params)?.build_detailed_report()
}

/// 由成本參數與曲線配置產生成本曲線
pub fn cost_curve(params: CostParameters, config: &CurveConfig) -> Result<CostCurve> {
    LotSizeOptimizer::new(params)?.sample_cost_curve_with(config)
}
