use crate::report::FinancialSummary;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Percentage change of the headline figures between two periods.
///
/// Each field is `None` when the reference period's value is zero, since a
/// relative change against nothing has no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodComparison {
    pub revenue_change_pct: Option<Decimal>,
    pub variable_costs_change_pct: Option<Decimal>,
    pub fixed_costs_change_pct: Option<Decimal>,
    pub net_profit_change_pct: Option<Decimal>,
}

/// Compares `current` against a `reference` period.
pub fn compare(current: &FinancialSummary, reference: &FinancialSummary) -> PeriodComparison {
    PeriodComparison {
        revenue_change_pct: pct_change(current.total_revenue, reference.total_revenue),
        variable_costs_change_pct: pct_change(
            current.total_variable_costs,
            reference.total_variable_costs,
        ),
        fixed_costs_change_pct: pct_change(current.total_fixed_costs, reference.total_fixed_costs),
        net_profit_change_pct: pct_change(current.net_profit, reference.net_profit),
    }
}

/// `(current - previous) / previous × 100`, or `None` for a zero base or a
/// change too large to represent.
pub fn pct_change(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    current
        .checked_sub(previous)?
        .checked_div(previous)?
        .checked_mul(dec!(100))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn growth_and_decline() {
        assert_eq!(pct_change(dec!(150), dec!(100)), Some(dec!(50)));
        assert_eq!(pct_change(dec!(75), dec!(100)), Some(dec!(-25)));
    }

    #[test]
    fn unrepresentable_change_is_undefined() {
        assert_eq!(pct_change(Decimal::MAX, dec!(0.0001)), None);
        assert_eq!(pct_change(Decimal::MIN, Decimal::MAX), None);
    }

    #[test]
    fn zero_reference_has_no_change() {
        assert_eq!(pct_change(dec!(10), Decimal::ZERO), None);
    }

    #[test]
    fn negative_reference_keeps_the_raw_ratio() {
        // A loss of 20 turning into a loss of 10 reads as -50%.
        assert_eq!(pct_change(dec!(-10), dec!(-20)), Some(dec!(-50)));
    }

    #[test]
    fn compares_headline_fields() {
        let current = FinancialSummary {
            total_revenue: dec!(220),
            total_fixed_costs: dec!(50),
            total_variable_costs: dec!(30),
            net_profit: dec!(140),
            ..FinancialSummary::new()
        };
        let reference = FinancialSummary {
            total_revenue: dec!(200),
            total_fixed_costs: dec!(50),
            net_profit: dec!(150),
            ..FinancialSummary::new()
        };

        let cmp = compare(&current, &reference);
        assert_eq!(cmp.revenue_change_pct, Some(dec!(10)));
        assert_eq!(cmp.fixed_costs_change_pct, Some(Decimal::ZERO));
        assert_eq!(cmp.variable_costs_change_pct, None);
        assert!(cmp.net_profit_change_pct.unwrap() < Decimal::ZERO);
    }
}
