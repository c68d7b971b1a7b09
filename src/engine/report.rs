//! Full derived view of the calculator, rebuilt from scratch on every change.

use crate::domain::{Decimal, FeeConfig, LotBook};
use serde::Serialize;

use super::pricing::{
    compute_aggregate, compute_profit_at_percentage, compute_profit_percentage_from_target,
    compute_spend_row, profit_targets,
};
use super::{Aggregate, ProfitProjection};

/// Everything derived from the current lots, fees and auxiliary inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorReport {
    pub lots: Vec<LotRow>,
    pub aggregate: Aggregate,
    pub profit_targets: Vec<ProfitTargetRow>,
    pub custom_profit: CustomProfitRow,
    pub desired_price: DesiredPriceRow,
    pub fees: FeeConfig,
    pub fee_label: String,
}

/// A lot as entered, with its spend and held quantity when complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotRow {
    pub index: usize,
    pub price: String,
    pub quantity: String,
    pub spend: Option<Decimal>,
    pub held_quantity: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitTargetRow {
    pub percentage: Decimal,
    pub projection: Option<ProfitProjection>,
}

/// Projection at the user's own markup percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomProfitRow {
    pub input: String,
    pub percentage: Option<Decimal>,
    pub projection: Option<ProfitProjection>,
}

/// Profit percentage implied by the user's desired selling price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesiredPriceRow {
    pub input: String,
    pub profit_percentage: Option<Decimal>,
}

pub fn build_report(
    book: &LotBook,
    fees: &FeeConfig,
    custom_profit: &str,
    desired_price: &str,
) -> CalculatorReport {
    let aggregate = compute_aggregate(book.lots(), fees);

    let lots = book
        .lots()
        .iter()
        .enumerate()
        .map(|(index, lot)| {
            let row = compute_spend_row(lot, fees);
            LotRow {
                index,
                price: lot.price.clone(),
                quantity: lot.quantity.clone(),
                spend: row.map(|r| r.spend),
                held_quantity: row.map(|r| r.held_quantity),
            }
        })
        .collect();

    let profit_targets = profit_targets()
        .map(|percentage| ProfitTargetRow {
            percentage,
            projection: compute_profit_at_percentage(&aggregate, percentage, fees),
        })
        .collect();

    let custom_percentage = Decimal::parse_lenient(custom_profit);
    let custom_profit = CustomProfitRow {
        input: custom_profit.to_string(),
        percentage: custom_percentage,
        projection: custom_percentage
            .and_then(|pct| compute_profit_at_percentage(&aggregate, pct, fees)),
    };

    let desired_price = DesiredPriceRow {
        input: desired_price.to_string(),
        profit_percentage: compute_profit_percentage_from_target(
            aggregate.average_price,
            desired_price,
            fees,
        ),
    };

    CalculatorReport {
        lots,
        aggregate,
        profit_targets,
        custom_profit,
        desired_price,
        fees: *fees,
        fee_label: fees.label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Lot;

    fn d(s: &str) -> Decimal {
        Decimal::from_str_canonical(s).unwrap()
    }

    fn book() -> LotBook {
        LotBook::from_lots(vec![Lot::new("100", "10"), Lot::new("200", "10"), Lot::blank()])
    }

    #[test]
    fn test_report_rows_follow_book_order() {
        let report = build_report(&book(), &FeeConfig::none(), "", "");
        assert_eq!(report.lots.len(), 3);
        assert_eq!(report.lots[1].index, 1);
        assert_eq!(report.lots[1].price, "200");
        assert_eq!(report.lots[1].spend, Some(d("2000")));
        assert_eq!(report.lots[2].spend, None);
        assert_eq!(report.lots[2].held_quantity, None);
    }

    #[test]
    fn test_report_profit_targets() {
        let report = build_report(&book(), &FeeConfig::none(), "", "");
        assert_eq!(report.profit_targets.len(), 5);
        let first = report.profit_targets[0].projection.unwrap();
        assert_eq!(report.profit_targets[0].percentage, d("1"));
        assert_eq!(first.selling_price, d("151.5"));
        assert_eq!(first.gross_profit, d("3030"));
        assert_eq!(first.net_profit, d("30"));
    }

    #[test]
    fn test_report_custom_and_desired_rows() {
        let report = build_report(&book(), &FeeConfig::none(), "10", "165");
        assert_eq!(report.custom_profit.percentage, Some(d("10")));
        assert_eq!(report.custom_profit.projection.unwrap().net_profit, d("300"));
        assert_eq!(report.desired_price.profit_percentage, Some(d("10")));
        assert_eq!(report.desired_price.input, "165");
    }

    #[test]
    fn test_report_blank_or_invalid_auxiliary_inputs_are_absent() {
        let report = build_report(&book(), &FeeConfig::none(), "", "abc");
        assert_eq!(report.custom_profit.percentage, None);
        assert_eq!(report.custom_profit.projection, None);
        assert_eq!(report.desired_price.profit_percentage, None);

        let report = build_report(&book(), &FeeConfig::none(), "abc", "");
        assert_eq!(report.custom_profit.input, "abc");
        assert_eq!(report.custom_profit.percentage, None);
        assert_eq!(report.custom_profit.projection, None);
        assert_eq!(report.desired_price.profit_percentage, None);
    }

    #[test]
    fn test_report_without_data_has_only_placeholders() {
        let report = build_report(&LotBook::new(), &FeeConfig::default(), "5", "100");
        assert_eq!(report.aggregate, Aggregate::no_data());
        assert!(report.profit_targets.iter().all(|row| row.projection.is_none()));
        assert_eq!(report.custom_profit.percentage, Some(d("5")));
        assert_eq!(report.custom_profit.projection, None);
        assert_eq!(report.desired_price.profit_percentage, None);
        assert_eq!(report.fee_label, "0.02 / 0.02");
    }

    #[test]
    fn test_report_json_uses_null_for_absent_values() {
        let report = build_report(&LotBook::new(), &FeeConfig::none(), "", "");
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["aggregate"]["averagePrice"].is_null());
        assert!(json["lots"][0]["spend"].is_null());
        assert!(json["profitTargets"][0]["projection"].is_null());
        assert_eq!(json["feeLabel"], "- / -");
    }
}
