//! Pure pricing computations over the lot book.
//!
//! Nothing here holds state or fails: invalid or incomplete input yields
//! `None` ("absent") rather than an error.

use crate::domain::Decimal;
use serde::Serialize;

pub mod pricing;
pub mod report;

pub use pricing::{
    compute_aggregate, compute_profit_at_percentage, compute_profit_percentage_from_target,
    compute_spend_row, profit_targets, PROFIT_TARGET_PERCENTS,
};
pub use report::{
    build_report, CalculatorReport, CustomProfitRow, DesiredPriceRow, LotRow, ProfitTargetRow,
};

/// Cost basis derived from every complete lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    /// Total cost over total held quantity; `None` when nothing is held.
    pub average_price: Option<Decimal>,
    pub total_held_quantity: Decimal,
    pub total_spent: Decimal,
}

impl Aggregate {
    /// The aggregate of a book with no usable lots.
    pub fn no_data() -> Self {
        Self::default()
    }
}

/// Per-lot display values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendRow {
    pub spend: Decimal,
    pub held_quantity: Decimal,
}

/// Outcome of selling the whole held quantity at a markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitProjection {
    pub selling_price: Decimal,
    pub gross_profit: Decimal,
    pub net_profit: Decimal,
}
