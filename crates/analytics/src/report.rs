use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The KPIs derived from a client's ledger over a date filter.
///
/// This struct is the output of the `MetricsEngine` and the only input the
/// simulator and the AI advisor need. It is never persisted; it is recomputed
/// whenever the ledger or the filter changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FinancialSummary {
    // I. Revenue and Costs
    pub total_revenue: Decimal,
    pub total_fixed_costs: Decimal,
    pub product_variable_costs: Decimal,
    pub generic_variable_costs: Decimal,
    pub total_variable_costs: Decimal,

    // II. Profitability
    pub marginal_contribution: Decimal,
    pub net_profit: Decimal,
    /// Fraction of revenue, 0 when there is no revenue.
    pub marginal_contribution_percentage: Decimal,
    /// Revenue needed to cover fixed costs, 0 when the contribution is not positive.
    pub break_even_point: Decimal,
    /// Fraction of revenue, 0 when there is no revenue.
    pub profit_margin: Decimal,

    // III. Assets
    pub total_assets_value: Decimal,
    pub total_investment_yields: Decimal,
}

impl FinancialSummary {
    /// Creates a new, zeroed-out summary. This is also the summary of an empty ledger.
    pub fn new() -> Self {
        Self {
            total_revenue: Decimal::ZERO,
            total_fixed_costs: Decimal::ZERO,
            product_variable_costs: Decimal::ZERO,
            generic_variable_costs: Decimal::ZERO,
            total_variable_costs: Decimal::ZERO,
            marginal_contribution: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            marginal_contribution_percentage: Decimal::ZERO,
            break_even_point: Decimal::ZERO,
            profit_margin: Decimal::ZERO,
            total_assets_value: Decimal::ZERO,
            total_investment_yields: Decimal::ZERO,
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.net_profit > Decimal::ZERO
    }
}

impl Default for FinancialSummary {
    fn default() -> Self {
        Self::new()
    }
}
