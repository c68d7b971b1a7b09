//! Proportional buy/sell fee configuration.

use super::Decimal;
use serde::{Deserialize, Serialize};

/// Fee settings applied to purchases and projected sales.
///
/// Percents are in percentage units: `0.02` means 0.02%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeConfig {
    pub buy_fee_enabled: bool,
    pub buy_fee_percent: Decimal,
    pub sell_fee_enabled: bool,
    pub sell_fee_percent: Decimal,
}

impl FeeConfig {
    /// No fees on either side.
    pub fn none() -> Self {
        Self {
            buy_fee_enabled: false,
            buy_fee_percent: Decimal::zero(),
            sell_fee_enabled: false,
            sell_fee_percent: Decimal::zero(),
        }
    }

    pub fn with_buy_fee(mut self, percent: Decimal) -> Self {
        self.buy_fee_enabled = true;
        self.buy_fee_percent = percent;
        self
    }

    pub fn with_sell_fee(mut self, percent: Decimal) -> Self {
        self.sell_fee_enabled = true;
        self.sell_fee_percent = percent;
        self
    }

    /// Fraction of a purchased quantity that is actually held.
    ///
    /// `1` when the buy fee is disabled.
    pub fn held_fraction(&self) -> Option<Decimal> {
        if !self.buy_fee_enabled {
            return Some(Decimal::one());
        }
        Decimal::one().checked_sub(self.buy_fee_percent.percent_fraction()?)
    }

    /// Fee fraction taken from a sale, zero when the sell fee is disabled.
    pub fn sell_fee_fraction(&self) -> Option<Decimal> {
        if !self.sell_fee_enabled {
            return Some(Decimal::zero());
        }
        self.sell_fee_percent.percent_fraction()
    }

    /// Summary shown next to the fee settings, e.g. `0.02 / -`.
    pub fn label(&self) -> String {
        let side = |enabled: bool, percent: Decimal| {
            if enabled {
                percent.to_canonical_string()
            } else {
                "-".to_string()
            }
        };
        format!(
            "{} / {}",
            side(self.buy_fee_enabled, self.buy_fee_percent),
            side(self.sell_fee_enabled, self.sell_fee_percent)
        )
    }
}

impl Default for FeeConfig {
    fn default() -> Self {
        let percent = Decimal::new(rust_decimal::Decimal::new(2, 2));
        Self {
            buy_fee_enabled: true,
            buy_fee_percent: percent,
            sell_fee_enabled: true,
            sell_fee_percent: percent,
        }
    }
}
