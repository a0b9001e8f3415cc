//! 成本參數模型

use serde::{Deserialize, Serialize};

use crate::{LecError, Result};

/// 單一物料的 LEC 成本參數
///
/// 欄位名稱與請求層的資料列一致（`demanda_anual` 等）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostParameters {
    /// 年需求量 D（單位/年）
    #[serde(rename = "demanda_anual")]
    pub annual_demand: f64,

    /// 每次訂購成本 S
    #[serde(rename = "custo_pedido")]
    pub order_cost: f64,

    /// 每單位年持有成本 H
    #[serde(rename = "custo_manutencao")]
    pub holding_cost: f64,

    /// 企業目前使用的批量（可選）
    #[serde(
        rename = "lote_atual_empresa",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_lot: Option<f64>,
}

impl CostParameters {
    /// 創建新的成本參數
    pub fn new(annual_demand: f64, order_cost: f64, holding_cost: f64) -> Self {
        Self {
            annual_demand,
            order_cost,
            holding_cost,
            current_lot: None,
        }
    }

    /// 建構器模式：設置目前批量
    pub fn with_current_lot(mut self, lot: f64) -> Self {
        self.current_lot = Some(lot);
        self
    }

    /// 驗證參數
    ///
    /// D、S、H 必須為正的有限數值；目前批量若有提供，同樣必須為正。
    /// 目前批量為 0 視為無效輸入，而非「未提供」。
    pub fn validate(&self) -> Result<()> {
        ensure_positive("demanda_anual", self.annual_demand)?;
        ensure_positive("custo_pedido", self.order_cost)?;
        ensure_positive("custo_manutencao", self.holding_cost)?;
        if let Some(lot) = self.current_lot {
            ensure_positive("lote_atual_empresa", lot)?;
        }

        // 成本函數的係數 S·D 與 H/2 不可下溢為零或溢位
        ensure_positive("demanda_anual*custo_pedido", self.annual_demand * self.order_cost)?;
        ensure_positive("custo_manutencao/2", self.holding_cost / 2.0)?;
        ensure_positive(
            "2*demanda_anual*custo_pedido/custo_manutencao",
            2.0 * self.annual_demand * self.order_cost / self.holding_cost,
        )?;
        Ok(())
    }

    /// 合併部分更新，並重新驗證
    ///
    /// 未提供的欄位沿用原值。
    pub fn apply_update(&self, update: &ParameterUpdate) -> Result<Self> {
        let merged = Self {
            annual_demand: update.annual_demand.unwrap_or(self.annual_demand),
            order_cost: update.order_cost.unwrap_or(self.order_cost),
            holding_cost: update.holding_cost.unwrap_or(self.holding_cost),
            current_lot: update.current_lot.or(self.current_lot),
        };
        merged.validate()?;
        Ok(merged)
    }

    /// 是否提供了目前批量
    pub fn has_current_lot(&self) -> bool {
        self.current_lot.is_some()
    }
}

/// 成本參數的部分更新
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterUpdate {
    #[serde(rename = "demanda_anual", default)]
    pub annual_demand: Option<f64>,

    #[serde(rename = "custo_pedido", default)]
    pub order_cost: Option<f64>,

    #[serde(rename = "custo_manutencao", default)]
    pub holding_cost: Option<f64>,

    #[serde(rename = "lote_atual_empresa", default)]
    pub current_lot: Option<f64>,
}

fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LecError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_create_parameters() {
        let params = CostParameters::new(1000.0, 50.0, 2.0);

        assert_eq!(params.annual_demand, 1000.0);
        assert_eq!(params.order_cost, 50.0);
        assert_eq!(params.holding_cost, 2.0);
        assert!(!params.has_current_lot());
        assert!(params.validate().is_ok());
    }

    #[rstest]
    #[case(0.0, 50.0, 2.0, "demanda_anual")]
    #[case(1000.0, -1.0, 2.0, "custo_pedido")]
    #[case(1000.0, 50.0, 0.0, "custo_manutencao")]
    #[case(1000.0, 50.0, -2.0, "custo_manutencao")]
    #[case(f64::NAN, 50.0, 2.0, "demanda_anual")]
    #[case(1000.0, f64::INFINITY, 2.0, "custo_pedido")]
    fn test_invalid_parameters(
        #[case] d: f64,
        #[case] s: f64,
        #[case] h: f64,
        #[case] expected: &str,
    ) {
        let err = CostParameters::new(d, s, h).validate().unwrap_err();
        match err {
            LecError::InvalidParameter { name, .. } => assert_eq!(name, expected),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[rstest]
    // S·D 下溢為零
    #[case(1e-170, 1e-170, 1.0, "demanda_anual*custo_pedido")]
    // S·D 溢位
    #[case(1e200, 1e200, 1.0, "demanda_anual*custo_pedido")]
    // H/2 下溢為零
    #[case(1000.0, 50.0, 5e-324, "custo_manutencao/2")]
    fn test_unrepresentable_cost_coefficients(
        #[case] d: f64,
        #[case] s: f64,
        #[case] h: f64,
        #[case] expected: &str,
    ) {
        let err = CostParameters::new(d, s, h).validate().unwrap_err();
        assert!(err.is_client_error());
        match err {
            LecError::InvalidParameter { name, .. } => assert_eq!(name, expected),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_zero_current_lot_is_rejected() {
        let params = CostParameters::new(1000.0, 50.0, 2.0).with_current_lot(0.0);

        assert_eq!(
            params.validate(),
            Err(LecError::InvalidParameter {
                name: "lote_atual_empresa",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_apply_update_keeps_unset_fields() {
        let params = CostParameters::new(1000.0, 50.0, 2.0).with_current_lot(100.0);
        let update = ParameterUpdate {
            holding_cost: Some(4.0),
            ..Default::default()
        };

        let merged = params.apply_update(&update).unwrap();
        assert_eq!(merged.annual_demand, 1000.0);
        assert_eq!(merged.order_cost, 50.0);
        assert_eq!(merged.holding_cost, 4.0);
        assert_eq!(merged.current_lot, Some(100.0));
    }

    #[test]
    fn test_apply_update_revalidates() {
        let params = CostParameters::new(1000.0, 50.0, 2.0);
        let update = ParameterUpdate {
            annual_demand: Some(-10.0),
            ..Default::default()
        };

        assert!(params.apply_update(&update).is_err());
    }

    #[test]
    fn test_wire_field_names() {
        let json = r#"{"demanda_anual": 1000, "custo_pedido": 50, "custo_manutencao": 2}"#;
        let params: CostParameters = serde_json::from_str(json).unwrap();

        assert_eq!(params, CostParameters::new(1000.0, 50.0, 2.0));

        let value = serde_json::to_value(params.with_current_lot(100.0)).unwrap();
        assert_eq!(value["lote_atual_empresa"], 100.0);
        assert_eq!(value["custo_manutencao"], 2.0);
    }
}
