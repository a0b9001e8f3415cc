//! 詳細報告與成本曲線示例（JSON 輸出）

use optistock::{CostParameters, CurveConfig, LotSizeOptimizer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let params = CostParameters::new(1200.0, 80.0, 3.5).with_current_lot(150.0);
    let optimizer = LotSizeOptimizer::new(params)?;

    let report = optimizer.build_detailed_report()?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    // 以 Q* 為中心取樣，確保曲線包含最低點
    let exact = optimizer
        .find_optimal_lot()?
        .exact_optimal_lot
        .unwrap_or(params.current_lot.unwrap_or(100.0));
    let curve = optimizer.sample_cost_curve_with(&CurveConfig::around(exact, 3.0, 25))?;

    for (q, cost) in curve.iter() {
        println!("{:>10.2} {:>12.2}", q, cost);
    }

    Ok(())
}
