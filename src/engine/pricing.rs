use crate::domain::{Decimal, FeeConfig, Lot};

use super::{Aggregate, ProfitProjection, SpendRow};

/// Markup percentages always shown in the profit target table.
pub const PROFIT_TARGET_PERCENTS: [i64; 5] = [1, 2, 3, 4, 5];

/// The fixed profit target percentages as decimals.
pub fn profit_targets() -> impl Iterator<Item = Decimal> {
    PROFIT_TARGET_PERCENTS.into_iter().map(Decimal::from)
}

/// Cost and fee-adjusted held quantity of one lot.
///
/// `None` when either field is not a number or the product overflows.
fn lot_cost_and_held(lot: &Lot, fees: &FeeConfig) -> Option<(Decimal, Decimal)> {
    let price = Decimal::parse_lenient(&lot.price)?;
    let quantity = Decimal::parse_lenient(&lot.quantity)?;
    let cost = price.checked_mul(quantity)?;
    let held = quantity.checked_mul(fees.held_fraction()?)?;
    Some((cost, held))
}

/// Volume-weighted average cost over all complete lots.
///
/// The average divides total cost by the fee-adjusted held quantity, so the
/// buy fee raises the per-unit cost basis. Incomplete lots are skipped. When the
/// held quantity sums to exactly zero the result is [`Aggregate::no_data`].
pub fn compute_aggregate(lots: &[Lot], fees: &FeeConfig) -> Aggregate {
    let mut total_cost = Decimal::zero();
    let mut total_held = Decimal::zero();

    for (cost, held) in lots.iter().filter_map(|lot| lot_cost_and_held(lot, fees)) {
        match (total_cost.checked_add(cost), total_held.checked_add(held)) {
            (Some(c), Some(h)) => {
                total_cost = c;
                total_held = h;
            }
            _ => return Aggregate::no_data(),
        }
    }

    if total_held.is_zero() {
        return Aggregate::no_data();
    }

    let Some(average) = total_cost.checked_div(total_held) else {
        return Aggregate::no_data();
    };

    Aggregate {
        average_price: Some(average.round_display()),
        total_held_quantity: total_held.round_display(),
        total_spent: total_cost.round_display(),
    }
}

/// Spend and held quantity for a single lot, `None` if the lot is incomplete.
pub fn compute_spend_row(lot: &Lot, fees: &FeeConfig) -> Option<SpendRow> {
    let (cost, held) = lot_cost_and_held(lot, fees)?;
    Some(SpendRow {
        spend: cost.round_display(),
        held_quantity: held.round_display(),
    })
}

/// Project selling the held quantity at `percentage` markup over the average.
///
/// The sell fee is charged on the marked-up price. Each stage is rounded and
/// the next stage is computed from the rounded value.
pub fn compute_profit_at_percentage(
    aggregate: &Aggregate,
    percentage: Decimal,
    fees: &FeeConfig,
) -> Option<ProfitProjection> {
    let average = aggregate.average_price?;
    let held = aggregate.total_held_quantity;

    let markup = Decimal::one().checked_add(percentage.percent_fraction()?)?;
    let target = average.checked_mul(markup)?;
    let fee = target.checked_mul(fees.sell_fee_fraction()?)?;
    let selling_price = target.checked_sub(fee)?.round_display();

    let gross_profit = selling_price.checked_mul(held)?.round_display();
    let cost_basis = average.checked_mul(held)?;
    let net_profit = gross_profit.checked_sub(cost_basis)?.round_display();

    Some(ProfitProjection {
        selling_price,
        gross_profit,
        net_profit,
    })
}

/// Profit percentage realised by selling at `target_price`.
///
/// `None` if there is no average price, the target is blank or not a number,
/// or the average price is zero.
pub fn compute_profit_percentage_from_target(
    average_price: Option<Decimal>,
    target_price: &str,
    fees: &FeeConfig,
) -> Option<Decimal> {
    let average = average_price?;
    let target = Decimal::parse_lenient(target_price)?;

    let kept = Decimal::one().checked_sub(fees.sell_fee_fraction()?)?;
    let effective = target.checked_mul(kept)?;
    let percentage = effective
        .checked_sub(average)?
        .checked_div(average)?
        .checked_mul(Decimal::hundred())?;

    Some(percentage.round_display())
}
