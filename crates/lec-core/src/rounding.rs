//! 報表數值的捨入

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{LecError, Result};

/// 對外報表使用的小數位數
pub const REPORT_SCALE: u32 = 2;

/// 將 f64 轉為 Decimal（NaN、無限大或超出範圍時失敗）
pub fn to_decimal(value: f64) -> Result<Decimal> {
    Decimal::from_f64(value)
        .ok_or_else(|| LecError::CalculationError(format!("無法表示為 Decimal 的數值: {}", value)))
}

/// 捨入至報表精度（四捨五入，遠離零）
pub fn round_report(value: f64) -> Result<Decimal> {
    Ok(round_decimal(to_decimal(value)?))
}

/// 將 Decimal 捨入至報表精度
pub fn round_decimal(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(REPORT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Decimal 轉回 f64
pub fn to_f64(value: Decimal) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| LecError::CalculationError(format!("無法轉換為 f64: {}", value)))
}
