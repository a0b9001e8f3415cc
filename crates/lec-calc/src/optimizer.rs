//! 經濟訂購批量優化器

use lec_core::rounding::{round_report, to_f64};
use lec_core::{
    ComparisonResult, CostCurve, CostParameters, CurveConfig, DetailedReport, FullAnalysis,
    LecError, OptimalityCheck, OptimizationResult, Result, SimulationSummary,
};
use rust_decimal::Decimal;

use crate::curve::CurveSampler;
use crate::expression::CostExpression;

/// 閉式解與符號解之間允許的相對誤差
const CROSS_CHECK_TOLERANCE: f64 = 1e-9;

/// 批量優化器
///
/// 建構時驗證參數並建立 C(Q) 及其一、二階導數；之後所有查詢皆為純函數。
#[derive(Debug, Clone)]
pub struct LotSizeOptimizer {
    /// 成本參數
    params: CostParameters,

    /// 總成本函數 C(Q)
    cost_function: CostExpression,

    /// dC/dQ
    first_derivative: CostExpression,

    /// d²C/dQ²
    second_derivative: CostExpression,
}

impl LotSizeOptimizer {
    /// 創建新的優化器
    pub fn new(params: CostParameters) -> Result<Self> {
        params.validate()?;

        let cost_function = CostExpression::total_cost(&params);
        let first_derivative = cost_function.derivative();
        let second_derivative = first_derivative.derivative();

        tracing::debug!(
            "建立成本函數 C(Q) = {}，dC/dQ = {}",
            cost_function,
            first_derivative
        );

        Ok(Self {
            params,
            cost_function,
            first_derivative,
            second_derivative,
        })
    }

    /// 計算最佳批量
    ///
    /// 對 C(Q) 微分後求 dC/dQ = 0 的實根，只保留正實根（批量必須為正），
    /// 取第一個作為 Q*。找不到時 `optimal_lot` 為空。
    pub fn find_optimal_lot(&self) -> Result<OptimizationResult> {
        let roots = self.first_derivative.real_roots()?;
        let critical_points: Vec<f64> = roots
            .iter()
            .copied()
            .filter(|q| q.is_finite() && *q > 0.0)
            .collect();
        let exact = critical_points.first().copied();

        match exact {
            Some(q) => self.cross_check(q),
            None => tracing::warn!("找不到正的實數臨界點，導數實根: {:?}", roots),
        }

        let optimal_lot = exact.map(round_report).transpose()?;

        Ok(OptimizationResult {
            optimal_lot,
            exact_optimal_lot: exact,
            derivative: self.first_derivative.to_string(),
            critical_points,
            cost_function: self.cost_function.to_string(),
        })
    }

    /// 計算指定批量的年總成本（兩位小數）
    pub fn evaluate_cost(&self, lot: f64) -> Result<Decimal> {
        ensure_positive_lot(lot)?;
        round_report(self.cost_function.evaluate(lot))
    }

    /// 以二階導數驗證指定批量是否為極小值
    pub fn check_optimality(&self, lot: f64) -> Result<OptimalityCheck> {
        ensure_positive_lot(lot)?;

        let value_at_point = self.second_derivative.evaluate(lot);

        Ok(OptimalityCheck {
            second_derivative: self.second_derivative.to_string(),
            value_at_point,
            is_minimum: value_at_point > 0.0,
        })
    }

    /// 完整分析：最佳批量、最佳成本，以及與目前批量的比較
    pub fn build_full_analysis(&self) -> Result<FullAnalysis> {
        self.analyze().map(|(analysis, _)| analysis)
    }

    /// 模擬摘要
    pub fn build_summary(&self) -> Result<SimulationSummary> {
        Ok(self.build_full_analysis()?.summary())
    }

    /// 詳細報告：完整分析 + 極小值驗證 + 參數回顯
    ///
    /// 極小值驗證在報表上的 Q*（兩位小數）進行。
    pub fn build_detailed_report(&self) -> Result<DetailedReport> {
        let (analysis, reported_lot) = self.analyze()?;
        let optimality = self.check_optimality(reported_lot)?;

        if !optimality.is_minimum {
            tracing::warn!(
                "Q* = {} 的二階導數不為正: {}",
                reported_lot,
                optimality.value_at_point
            );
        }

        Ok(DetailedReport {
            analysis,
            optimality,
            parameters: self.params,
        })
    }

    /// 成本曲線取樣
    pub fn sample_cost_curve(&self, q_min: f64, q_max: f64, points: usize) -> Result<CostCurve> {
        self.sample_cost_curve_with(&CurveConfig::new(q_min, q_max, points))
    }

    /// 依配置取樣成本曲線
    pub fn sample_cost_curve_with(&self, config: &CurveConfig) -> Result<CostCurve> {
        CurveSampler::sample(&self.cost_function, config)
    }

    /// 獲取成本參數
    pub fn parameters(&self) -> &CostParameters {
        &self.params
    }

    /// 獲取成本函數
    pub fn cost_function(&self) -> &CostExpression {
        &self.cost_function
    }

    /// 回傳分析結果與報表上的 Q*（f64）
    ///
    /// 最佳成本以報表上的 Q* 計算，與回報的批量一致。
    fn analyze(&self) -> Result<(FullAnalysis, f64)> {
        tracing::info!(
            "開始 LEC 分析：D={}, S={}, H={}",
            self.params.annual_demand,
            self.params.order_cost,
            self.params.holding_cost
        );

        let optimization = self.find_optimal_lot()?;
        let optimal_lot = optimization.optimal_lot.ok_or_else(|| {
            LecError::DegenerateOptimization(format!(
                "導數 {} 沒有正的實根",
                optimization.derivative
            ))
        })?;

        let reported_lot = to_f64(optimal_lot)?;
        if reported_lot <= 0.0 {
            return Err(LecError::DegenerateOptimization(format!(
                "最佳批量 {:?} 低於報表精度",
                optimization.exact_optimal_lot
            )));
        }

        let optimal_cost = self.evaluate_cost(reported_lot)?;

        let comparison = match self.params.current_lot {
            Some(current_lot) => {
                let current_cost = self.evaluate_cost(current_lot)?;
                Some(ComparisonResult::new(current_lot, current_cost, optimal_cost)?)
            }
            None => None,
        };

        tracing::info!(
            "LEC 分析完成：Q* = {}，最佳成本 {}，年節省 {:?}",
            optimal_lot,
            optimal_cost,
            comparison.as_ref().map(|c| c.annual_savings)
        );

        let analysis = FullAnalysis {
            optimal_lot,
            optimal_cost,
            cost_function: optimization.cost_function,
            derivative: optimization.derivative,
            critical_points: optimization.critical_points,
            comparison,
        };

        Ok((analysis, reported_lot))
    }

    /// 與 Wilson 閉式解比對
    fn cross_check(&self, symbolic: f64) {
        let closed_form = wilson_lot_size(&self.params);
        let relative = ((symbolic - closed_form) / closed_form).abs();

        if relative > CROSS_CHECK_TOLERANCE {
            tracing::warn!(
                "符號解 {} 與閉式解 {} 不一致（相對誤差 {:e}）",
                symbolic,
                closed_form,
                relative
            );
        } else {
            tracing::debug!("Q* = {}（閉式解 {}）", symbolic, closed_form);
        }
    }
}

/// Wilson 公式：Q* = sqrt(2·D·S / H)
pub fn wilson_lot_size(params: &CostParameters) -> f64 {
    (2.0 * params.annual_demand * params.order_cost / params.holding_cost).sqrt()
}

fn ensure_positive_lot(lot: f64) -> Result<()> {
    if lot.is_finite() && lot > 0.0 {
        Ok(())
    } else {
        Err(LecError::NonPositiveLotSize(lot))
    }
}
