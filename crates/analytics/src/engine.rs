use crate::report::FinancialSummary;
use core_types::{ClientRecord, DateFilter, Expense, ExpenseKind, Investment, Sale};
use rust_decimal::Decimal;

/// A stateless calculator for deriving a `FinancialSummary` from a client's ledger.
#[derive(Debug, Default)]
pub struct MetricsEngine {}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating the financial summary.
    ///
    /// # Arguments
    ///
    /// * `sales` - Every sale of the client. Order does not matter.
    /// * `expenses` - Every expense of the client.
    /// * `investments` - The client's holdings; an empty slice is valid.
    /// * `filter` - Which sales, expenses and yields count. Asset values are a
    ///   point-in-time snapshot and ignore it.
    ///
    /// This never fails: every ratio with a zero denominator resolves to zero.
    pub fn compute_summary(
        &self,
        sales: &[Sale],
        expenses: &[Expense],
        investments: &[Investment],
        filter: &DateFilter,
    ) -> FinancialSummary {
        let mut summary = FinancialSummary::new();

        tracing::debug!(
            sales = sales.len(),
            expenses = expenses.len(),
            investments = investments.len(),
            %filter,
            "Computing financial summary."
        );

        self.accumulate_sales(sales, filter, &mut summary);
        self.accumulate_expenses(expenses, filter, &mut summary);
        self.calculate_profitability(&mut summary);
        self.accumulate_assets(investments, filter, &mut summary);

        summary
    }

    /// Same as `compute_summary`, reading the collections off a client record.
    pub fn summarize_client(&self, client: &ClientRecord, filter: &DateFilter) -> FinancialSummary {
        self.compute_summary(&client.sales, &client.expenses, &client.investments, filter)
    }

    fn accumulate_sales(&self, sales: &[Sale], filter: &DateFilter, summary: &mut FinancialSummary) {
        for sale in sales.iter().filter(|s| filter.includes(s.date)) {
            summary.total_revenue = summary.total_revenue.saturating_add(sale.revenue());
            summary.product_variable_costs =
                summary.product_variable_costs.saturating_add(sale.variable_cost());
        }
    }

    fn accumulate_expenses(
        &self,
        expenses: &[Expense],
        filter: &DateFilter,
        summary: &mut FinancialSummary,
    ) {
        for expense in expenses.iter().filter(|e| filter.includes(e.date)) {
            let bucket = match expense.kind {
                ExpenseKind::Fixed => &mut summary.total_fixed_costs,
                ExpenseKind::Variable => &mut summary.generic_variable_costs,
            };
            *bucket = bucket.saturating_add(expense.amount);
        }
    }

    /// Derives the contribution, profit and ratio metrics from the totals.
    ///
    /// Arithmetic saturates at the `Decimal` range, so extreme ledgers clamp
    /// instead of aborting.
    fn calculate_profitability(&self, summary: &mut FinancialSummary) {
        summary.total_variable_costs = summary
            .product_variable_costs
            .saturating_add(summary.generic_variable_costs);
        summary.marginal_contribution = summary
            .total_revenue
            .saturating_sub(summary.total_variable_costs);
        summary.net_profit = summary
            .marginal_contribution
            .saturating_sub(summary.total_fixed_costs);

        // --- Ratios ---
        if summary.total_revenue > Decimal::ZERO {
            summary.marginal_contribution_percentage =
                saturating_div(summary.marginal_contribution, summary.total_revenue);
            summary.profit_margin = saturating_div(summary.net_profit, summary.total_revenue);
        }

        if summary.marginal_contribution_percentage > Decimal::ZERO {
            summary.break_even_point = saturating_div(
                summary.total_fixed_costs,
                summary.marginal_contribution_percentage,
            );
        }
    }

    fn accumulate_assets(
        &self,
        investments: &[Investment],
        filter: &DateFilter,
        summary: &mut FinancialSummary,
    ) {
        for investment in investments {
            summary.total_assets_value =
                summary.total_assets_value.saturating_add(investment.initial_value);
            summary.total_investment_yields = summary
                .total_investment_yields
                .saturating_add(investment.yield_within(filter));
        }
    }
}

/// `numerator / denominator` clamped to `Decimal::MAX`/`MIN` on overflow.
/// The denominator must be non-zero.
pub(crate) fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or_else(|| {
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}
