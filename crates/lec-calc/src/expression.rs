//! 符號成本表達式
//!
//! 以 c·Q^k（k 為整數）的項之和表示成本函數，支援微分、代入求值與
//! 實根求解。總成本 C(Q) = S·D/Q + H·Q/2 屬於此類表達式。

use std::fmt;

use lec_core::{CostParameters, LecError, Result};

/// 單項 c·Q^k
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub coefficient: f64,
    pub exponent: i32,
}

impl Term {
    pub fn new(coefficient: f64, exponent: i32) -> Self {
        Self {
            coefficient,
            exponent,
        }
    }

    fn derivative(&self) -> Term {
        Term::new(self.coefficient * f64::from(self.exponent), self.exponent - 1)
    }

    fn evaluate(&self, q: f64) -> f64 {
        if self.exponent >= 0 {
            self.coefficient * q.powi(self.exponent)
        } else {
            self.coefficient / q.powi(-self.exponent)
        }
    }
}

/// 正規化的項之和：同次項合併、去除零係數、依次數遞減排列
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostExpression {
    terms: Vec<Term>,
}

impl CostExpression {
    /// 由任意項建立並正規化
    pub fn from_terms(terms: impl IntoIterator<Item = Term>) -> Self {
        let mut merged: Vec<Term> = Vec::new();
        for term in terms {
            match merged.iter_mut().find(|t| t.exponent == term.exponent) {
                Some(existing) => existing.coefficient += term.coefficient,
                None => merged.push(term),
            }
        }

        merged.retain(|t| t.coefficient != 0.0);
        merged.sort_by(|a, b| b.exponent.cmp(&a.exponent));

        Self { terms: merged }
    }

    /// 年總成本 C(Q) = 持有成本 H·Q/2 + 訂購成本 S·D/Q
    pub fn total_cost(params: &CostParameters) -> Self {
        Self::from_terms([
            Term::new(params.holding_cost / 2.0, 1),
            Term::new(params.order_cost * params.annual_demand, -1),
        ])
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// 是否恆為零
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// 對 Q 微分
    pub fn derivative(&self) -> Self {
        Self::from_terms(self.terms.iter().map(Term::derivative))
    }

    /// 代入 Q 求值（Q = 0 且含負次項時結果為無限大，呼叫端需先檢查）
    pub fn evaluate(&self, q: f64) -> f64 {
        self.terms.iter().map(|t| t.evaluate(q)).sum()
    }

    /// 求表達式 = 0 的所有實根（遞增排列）
    ///
    /// 僅支援至多兩項：a·Q^m + b·Q^n = 0（m > n）化為 Q^(m-n) = -b/a。
    /// 偶數次方且右側為負時根為複數，直接捨去。Q^n（n > 0）因子另外貢獻
    /// Q = 0；n < 0 時 Q = 0 是極點，不列入。
    pub fn real_roots(&self) -> Result<Vec<f64>> {
        match self.terms.as_slice() {
            [] => Err(LecError::DegenerateOptimization(
                "表達式恆為零，所有批量皆為臨界點".to_string(),
            )),
            [single] => Ok(if single.exponent > 0 {
                vec![0.0]
            } else {
                Vec::new()
            }),
            [high, low] => {
                let mut roots = Vec::new();
                if low.exponent > 0 {
                    roots.push(0.0);
                }

                let power = high.exponent - low.exponent;
                let ratio = -low.coefficient / high.coefficient;
                let magnitude = nth_root(ratio.abs(), power);

                if power % 2 == 0 {
                    if ratio > 0.0 {
                        roots.push(-magnitude);
                        roots.push(magnitude);
                    }
                } else {
                    roots.push(ratio.signum() * magnitude);
                }

                roots.sort_by(f64::total_cmp);
                roots.dedup();
                Ok(roots)
            }
            terms => Err(LecError::CalculationError(format!(
                "不支援 {} 項表達式的求根",
                terms.len()
            ))),
        }
    }
}

fn nth_root(value: f64, n: i32) -> f64 {
    match n {
        1 => value,
        2 => value.sqrt(),
        3 => value.cbrt(),
        _ => value.powf(1.0 / f64::from(n)),
    }
}

impl fmt::Display for CostExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }

        for (idx, term) in self.terms.iter().enumerate() {
            let negative = term.coefficient < 0.0;
            match (idx, negative) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }

            let magnitude = term.coefficient.abs();
            match term.exponent {
                0 => write!(f, "{}", magnitude)?,
                k if k > 0 => {
                    if magnitude != 1.0 {
                        write!(f, "{}*", magnitude)?;
                    }
                    write!(f, "Q")?;
                    if k > 1 {
                        write!(f, "**{}", k)?;
                    }
                }
                k => {
                    write!(f, "{}/Q", magnitude)?;
                    if k < -1 {
                        write!(f, "**{}", -k)?;
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn classic() -> CostExpression {
        CostExpression::total_cost(&CostParameters::new(1000.0, 50.0, 2.0))
    }

    #[test]
    fn test_total_cost_expression() {
        let expr = classic();

        assert_eq!(expr.terms(), &[Term::new(1.0, 1), Term::new(50000.0, -1)]);
        assert_eq!(expr.to_string(), "Q + 50000/Q");
        assert_eq!(expr.evaluate(100.0), 600.0);
    }

    #[test]
    fn test_derivatives() {
        let first = classic().derivative();
        let second = first.derivative();

        assert_eq!(first.to_string(), "1 - 50000/Q**2");
        assert_eq!(second.to_string(), "100000/Q**3");
        assert_eq!(first.evaluate(100.0), 1.0 - 5.0);
        assert_eq!(second.evaluate(10.0), 100.0);
    }

    #[test]
    fn test_constant_vanishes_on_derivative() {
        let expr = CostExpression::from_terms([Term::new(7.0, 0)]);

        assert!(expr.derivative().is_zero());
        assert_eq!(expr.derivative().to_string(), "0");
    }

    #[test]
    fn test_from_terms_merges_and_orders() {
        let expr = CostExpression::from_terms([
            Term::new(3.0, -1),
            Term::new(2.0, 2),
            Term::new(-3.0, -1),
            Term::new(0.5, 2),
            Term::new(-4.0, 0),
        ]);

        assert_eq!(expr.terms(), &[Term::new(2.5, 2), Term::new(-4.0, 0)]);
        assert_eq!(expr.to_string(), "2.5*Q**2 - 4");
    }

    #[test]
    fn test_classic_critical_points() {
        let roots = classic().derivative().real_roots().unwrap();

        assert_eq!(roots.len(), 2);
        assert_eq!(roots[0], -roots[1]);
        assert!((roots[1] - 50000f64.sqrt()).abs() < 1e-9);
    }

    #[rstest]
    // Q - 8 = 0
    #[case(vec![Term::new(1.0, 1), Term::new(-8.0, 0)], vec![8.0])]
    // Q**3 + 8 = 0（奇次方保留負根）
    #[case(vec![Term::new(1.0, 3), Term::new(8.0, 0)], vec![-2.0])]
    // Q**2 + 4 = 0（複數根捨去）
    #[case(vec![Term::new(1.0, 2), Term::new(4.0, 0)], vec![])]
    // Q**3 - 4Q = 0 → 0, ±2
    #[case(vec![Term::new(1.0, 3), Term::new(-4.0, 1)], vec![-2.0, 0.0, 2.0])]
    // 5/Q**2 沒有根
    #[case(vec![Term::new(5.0, -2)], vec![])]
    // 3Q**2 的根為 0
    #[case(vec![Term::new(3.0, 2)], vec![0.0])]
    fn test_real_roots(#[case] terms: Vec<Term>, #[case] expected: Vec<f64>) {
        let roots = CostExpression::from_terms(terms).real_roots().unwrap();
        assert_eq!(roots, expected);
    }

    #[test]
    fn test_zero_expression_is_degenerate() {
        let err = CostExpression::default().real_roots().unwrap_err();
        assert!(matches!(err, LecError::DegenerateOptimization(_)));
    }

    #[test]
    fn test_three_terms_unsupported() {
        let expr = CostExpression::from_terms([
            Term::new(1.0, 2),
            Term::new(1.0, 1),
            Term::new(1.0, 0),
        ]);

        assert!(matches!(
            expr.real_roots(),
            Err(LecError::CalculationError(_))
        ));
    }

    #[test]
    fn test_negative_leading_term_display() {
        let expr = CostExpression::from_terms([Term::new(-1.0, 1), Term::new(2.0, -3)]);
        assert_eq!(expr.to_string(), "-Q + 2/Q**3");
    }
}
