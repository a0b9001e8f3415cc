//! 簡單 LEC 計算示例

use optistock::{CostParameters, LotSizeOptimizer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== 簡單 LEC 計算示例 ===\n");

    // 年需求 1000、每次訂購成本 50、年持有成本 2，目前每次訂 100 件
    let params = CostParameters::new(1000.0, 50.0, 2.0).with_current_lot(100.0);
    let optimizer = LotSizeOptimizer::new(params)?;

    let optimization = optimizer.find_optimal_lot()?;
    println!("成本函數: C(Q) = {}", optimization.cost_function);
    println!("一階導數: dC/dQ = {}", optimization.derivative);
    println!("臨界點: {:?}", optimization.critical_points);

    let analysis = optimizer.build_full_analysis()?;
    println!("\n最佳批量: {}", analysis.optimal_lot);
    println!("最佳成本: {}", analysis.optimal_cost);

    if let Some(comparison) = &analysis.comparison {
        println!(
            "目前批量 {} 的成本: {}，年節省 {}（{}%）",
            comparison.current_lot,
            comparison.current_cost,
            comparison.annual_savings,
            comparison.savings_percentage
        );
    }

    Ok(())
}
