//! 計算結果模型
//!
//! 所有結果皆由輸入參數即時推導，建立後不再修改。金額以 `Decimal`
//! 保存（兩位小數），序列化時輸出為 JSON 數值。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::params::CostParameters;
use crate::rounding::round_decimal;
use crate::{LecError, Result};

/// 最佳批量求解結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// 最佳批量 Q*（兩位小數；找不到正實根時為空）
    #[serde(rename = "lote_otimo", with = "rust_decimal::serde::float_option")]
    pub optimal_lot: Option<Decimal>,

    /// 未捨入的 Q*
    #[serde(skip)]
    pub exact_optimal_lot: Option<f64>,

    /// 一階導數 dC/dQ
    #[serde(rename = "derivada")]
    pub derivative: String,

    /// 導數的正實根
    #[serde(rename = "pontos_criticos")]
    pub critical_points: Vec<f64>,

    /// 總成本函數 C(Q)
    #[serde(rename = "funcao_custo")]
    pub cost_function: String,
}

impl OptimizationResult {
    /// 是否找到正的實數臨界點
    pub fn is_degenerate(&self) -> bool {
        self.optimal_lot.is_none()
    }
}

/// 目前批量與最佳批量的比較
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// 目前批量
    #[serde(rename = "lote_atual_empresa")]
    pub current_lot: f64,

    /// 目前批量下的總成本
    #[serde(rename = "custo_total_atual", with = "rust_decimal::serde::float")]
    pub current_cost: Decimal,

    /// 年節省金額 = 目前成本 - 最佳成本
    #[serde(rename = "economia_anual", with = "rust_decimal::serde::float")]
    pub annual_savings: Decimal,

    /// 節省百分比（相對於目前成本）
    #[serde(rename = "percentual_economia", with = "rust_decimal::serde::float")]
    pub savings_percentage: Decimal,
}

impl ComparisonResult {
    /// 由兩個已捨入的成本計算節省
    pub fn new(current_lot: f64, current_cost: Decimal, optimal_cost: Decimal) -> Result<Self> {
        if current_cost <= Decimal::ZERO {
            return Err(LecError::CalculationError(format!(
                "目前成本必須大於零才能計算節省百分比: {}",
                current_cost
            )));
        }

        let annual_savings = round_decimal(current_cost - optimal_cost);
        let savings_percentage =
            round_decimal(annual_savings / current_cost * Decimal::ONE_HUNDRED);

        Ok(Self {
            current_lot,
            current_cost,
            annual_savings,
            savings_percentage,
        })
    }
}

/// 二階導數檢查
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalityCheck {
    /// 二階導數 d²C/dQ²
    #[serde(rename = "segunda_derivada")]
    pub second_derivative: String,

    /// 在檢查點的值
    #[serde(rename = "valor_no_ponto")]
    pub value_at_point: f64,

    /// 值嚴格大於零即為極小值
    #[serde(rename = "e_minimo")]
    pub is_minimum: bool,
}

/// 完整分析：最佳批量、最佳成本與（可選的）比較
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullAnalysis {
    #[serde(rename = "lote_otimo_calculado", with = "rust_decimal::serde::float")]
    pub optimal_lot: Decimal,

    #[serde(rename = "custo_total_otimo", with = "rust_decimal::serde::float")]
    pub optimal_cost: Decimal,

    #[serde(rename = "funcao_custo")]
    pub cost_function: String,

    #[serde(rename = "derivada")]
    pub derivative: String,

    #[serde(rename = "pontos_criticos")]
    pub critical_points: Vec<f64>,

    /// 未提供目前批量時為空（不是零），輸出時四個欄位皆為 null
    #[serde(flatten, with = "comparison_fields")]
    pub comparison: Option<ComparisonResult>,
}

/// 比較欄位的攤平序列化：缺少比較時仍輸出鍵值並填 null
mod comparison_fields {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::ComparisonResult;

    #[derive(Serialize, Deserialize)]
    struct Fields {
        #[serde(default)]
        lote_atual_empresa: Option<f64>,

        #[serde(default, with = "rust_decimal::serde::float_option")]
        custo_total_atual: Option<Decimal>,

        #[serde(default, with = "rust_decimal::serde::float_option")]
        economia_anual: Option<Decimal>,

        #[serde(default, with = "rust_decimal::serde::float_option")]
        percentual_economia: Option<Decimal>,
    }

    pub fn serialize<S>(
        value: &Option<ComparisonResult>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let fields = Fields {
            lote_atual_empresa: value.as_ref().map(|c| c.current_lot),
            custo_total_atual: value.as_ref().map(|c| c.current_cost),
            economia_anual: value.as_ref().map(|c| c.annual_savings),
            percentual_economia: value.as_ref().map(|c| c.savings_percentage),
        };
        fields.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<ComparisonResult>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Fields::deserialize(deserializer)?;
        let comparison = (|| {
            Some(ComparisonResult {
                current_lot: fields.lote_atual_empresa?,
                current_cost: fields.custo_total_atual?,
                annual_savings: fields.economia_anual?,
                savings_percentage: fields.percentual_economia?,
            })
        })();
        Ok(comparison)
    }
}

impl FullAnalysis {
    /// 年節省金額
    pub fn annual_savings(&self) -> Option<Decimal> {
        self.comparison.as_ref().map(|c| c.annual_savings)
    }

    /// 轉為模擬摘要
    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            optimal_lot: self.optimal_lot,
            optimal_cost: self.optimal_cost,
            current_cost: self.comparison.as_ref().map(|c| c.current_cost),
            annual_savings: self.annual_savings(),
        }
    }
}

/// 模擬摘要（請求層持久化的四個欄位）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    #[serde(rename = "lote_otimo_calculado", with = "rust_decimal::serde::float")]
    pub optimal_lot: Decimal,

    #[serde(rename = "custo_total_otimo", with = "rust_decimal::serde::float")]
    pub optimal_cost: Decimal,

    #[serde(rename = "custo_total_atual", with = "rust_decimal::serde::float_option")]
    pub current_cost: Option<Decimal>,

    #[serde(rename = "economia_anual", with = "rust_decimal::serde::float_option")]
    pub annual_savings: Option<Decimal>,
}

/// 詳細報告：完整分析 + 極小值驗證 + 參數回顯
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedReport {
    #[serde(flatten)]
    pub analysis: FullAnalysis,

    #[serde(rename = "verificacao_otimalidade")]
    pub optimality: OptimalityCheck,

    #[serde(rename = "parametros")]
    pub parameters: CostParameters,
}

/// 成本曲線取樣（供繪圖，不持久化）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCurve {
    /// 批量（遞增）
    #[serde(rename = "valores_lote")]
    pub lot_sizes: Vec<f64>,

    /// 對應的總成本（未捨入）
    #[serde(rename = "valores_custo")]
    pub costs: Vec<f64>,

    pub q_min: f64,

    pub q_max: f64,

    #[serde(rename = "pontos")]
    pub points: usize,
}

impl CostCurve {
    /// 取樣點數
    pub fn len(&self) -> usize {
        self.lot_sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lot_sizes.is_empty()
    }

    /// 依序迭代 (Q, C(Q))
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.lot_sizes.iter().copied().zip(self.costs.iter().copied())
    }

    /// 取樣點中成本最低者
    pub fn lowest_sample(&self) -> Option<(f64, f64)> {
        self.iter().min_by(|a, b| a.1.total_cmp(&b.1))
    }
}
