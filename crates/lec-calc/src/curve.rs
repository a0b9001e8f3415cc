//! 成本曲線取樣

use lec_core::{CostCurve, CurveConfig, Result};

use crate::expression::CostExpression;

/// 成本曲線取樣器
pub struct CurveSampler;

impl CurveSampler {
    /// 在 [q_min, q_max] 上等距取樣並計算成本（不捨入）
    pub fn sample(expression: &CostExpression, config: &CurveConfig) -> Result<CostCurve> {
        config.validate()?;

        let lot_sizes = Self::linspace(config.q_min, config.q_max, config.points);
        let costs = lot_sizes.iter().map(|&q| expression.evaluate(q)).collect();

        tracing::debug!(
            "成本曲線取樣: [{}, {}] 共 {} 點",
            config.q_min,
            config.q_max,
            lot_sizes.len()
        );

        Ok(CostCurve {
            lot_sizes,
            costs,
            q_min: config.q_min,
            q_max: config.q_max,
            points: config.points,
        })
    }

    /// 等距數列，包含兩端點；只有一點時回傳起點
    pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
        match points {
            0 => Vec::new(),
            1 => vec![start],
            n => {
                let step = (end - start) / (n - 1) as f64;
                let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
                // 避免累積誤差，終點固定為 end
                values[n - 1] = end;
                values
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lec_core::{CostParameters, LecError};

    fn classic() -> CostExpression {
        CostExpression::total_cost(&CostParameters::new(1000.0, 50.0, 2.0))
    }

    #[test]
    fn test_linspace_endpoints() {
        let values = CurveSampler::linspace(10.0, 200.0, 100);

        assert_eq!(values.len(), 100);
        assert_eq!(values[0], 10.0);
        assert_eq!(values[99], 200.0);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_linspace_small_counts() {
        assert_eq!(CurveSampler::linspace(5.0, 9.0, 1), vec![5.0]);
        assert_eq!(CurveSampler::linspace(5.0, 9.0, 2), vec![5.0, 9.0]);
        assert_eq!(CurveSampler::linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(CurveSampler::linspace(5.0, 9.0, 0).is_empty());
    }

    #[test]
    fn test_sample_costs() {
        let curve = CurveSampler::sample(&classic(), &CurveConfig::new(100.0, 500.0, 5)).unwrap();

        assert_eq!(curve.lot_sizes, vec![100.0, 200.0, 300.0, 400.0, 500.0]);
        assert_eq!(curve.costs[0], 600.0);
        assert_eq!(curve.costs[1], 450.0);
        assert_eq!(curve.points, 5);
        assert_eq!(curve.lowest_sample(), Some((200.0, 450.0)));
    }

    #[test]
    fn test_single_point_at_q_min() {
        let curve = CurveSampler::sample(&classic(), &CurveConfig::new(50.0, 80.0, 1)).unwrap();

        assert_eq!(curve.lot_sizes, vec![50.0]);
        assert_eq!(curve.costs, vec![1050.0]);
    }

    #[test]
    fn test_invalid_range_rejected_before_sampling() {
        let err = CurveSampler::sample(&classic(), &CurveConfig::new(200.0, 10.0, 10)).unwrap_err();
        assert!(matches!(err, LecError::InvalidRange { .. }));
    }
}
