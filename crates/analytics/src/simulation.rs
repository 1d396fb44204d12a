use crate::engine::saturating_div;
use crate::report::FinancialSummary;
use core_types::Sale;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// The projected result of a uniform price/volume change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub new_revenue: Decimal,
    pub new_profit: Decimal,
    /// `new_profit - summary.net_profit`
    pub profit_delta: Decimal,
    /// Projected net margin, 0 when the projected revenue is not positive.
    pub projected_margin: Decimal,
}

impl SimulationOutcome {
    pub fn is_improvement(&self) -> bool {
        self.profit_delta > Decimal::ZERO
    }
}

/// Re-scales the existing sales mix by a price and a volume percentage.
///
/// The model is linear and uniform: it uses the unweighted mean price and mean
/// per-unit variable cost across `sales`, the total quantity sold, and keeps the
/// fixed costs of `summary`. There is no price elasticity and no per-product view.
pub fn simulate(
    summary: &FinancialSummary,
    sales: &[Sale],
    price_delta_pct: Decimal,
    volume_delta_pct: Decimal,
) -> SimulationOutcome {
    let (avg_price, avg_variable_cost) = if sales.is_empty() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let count = Decimal::from(sales.len());
        let price_sum = saturating_sum(sales.iter().map(|s| s.price));
        let cost_sum = saturating_sum(sales.iter().map(|s| s.variable_cost_per_unit));
        (price_sum / count, cost_sum / count)
    };
    let total_quantity = saturating_sum(sales.iter().map(|s| Decimal::from(s.quantity)));

    let new_price = avg_price.saturating_mul(scale_factor(price_delta_pct));
    let new_quantity = total_quantity.saturating_mul(scale_factor(volume_delta_pct));

    let new_revenue = new_price.saturating_mul(new_quantity);
    let new_variable_costs = avg_variable_cost.saturating_mul(new_quantity);
    let new_profit = new_revenue
        .saturating_sub(new_variable_costs)
        .saturating_sub(summary.total_fixed_costs);

    let projected_margin = if new_revenue > Decimal::ZERO {
        saturating_div(new_profit, new_revenue)
    } else {
        Decimal::ZERO
    };

    tracing::debug!(
        %avg_price,
        %total_quantity,
        %price_delta_pct,
        %volume_delta_pct,
        %new_profit,
        "Simulated scenario."
    );

    SimulationOutcome {
        new_revenue,
        new_profit,
        profit_delta: new_profit.saturating_sub(summary.net_profit),
        projected_margin,
    }
}

/// `1 + pct / 100`
fn scale_factor(pct: Decimal) -> Decimal {
    Decimal::ONE.saturating_add(pct / dec!(100))
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}
