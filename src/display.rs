//! Terminal rendering of ledgers and reports.

use analytics::format::{format_change, format_money, format_ratio};
use analytics::{FinancialSummary, PeriodComparison, SimulationOutcome};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use core_types::{ClientRecord, Expense, Investment, Sale};
use rust_decimal::Decimal;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn right_align(table: &mut Table, columns: &[usize]) {
    for &index in columns {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// The KPI report, optionally side by side with a reference period.
pub fn summary_table(
    summary: &FinancialSummary,
    reference: Option<(&FinancialSummary, &PeriodComparison)>,
) -> Table {
    let rows: Vec<(&str, String, Option<String>, Option<Option<Decimal>>)> = {
        let r = reference.map(|(s, _)| s);
        let c = reference.map(|(_, c)| c);
        vec![
            (
                "Revenue",
                format_money(summary.total_revenue),
                r.map(|s| format_money(s.total_revenue)),
                c.map(|c| c.revenue_change_pct),
            ),
            (
                "Variable costs",
                format_money(summary.total_variable_costs),
                r.map(|s| format_money(s.total_variable_costs)),
                c.map(|c| c.variable_costs_change_pct),
            ),
            (
                "  from sales",
                format_money(summary.product_variable_costs),
                r.map(|s| format_money(s.product_variable_costs)),
                None,
            ),
            (
                "  generic",
                format_money(summary.generic_variable_costs),
                r.map(|s| format_money(s.generic_variable_costs)),
                None,
            ),
            (
                "Fixed costs",
                format_money(summary.total_fixed_costs),
                r.map(|s| format_money(s.total_fixed_costs)),
                c.map(|c| c.fixed_costs_change_pct),
            ),
            (
                "Marginal contribution",
                format_money(summary.marginal_contribution),
                r.map(|s| format_money(s.marginal_contribution)),
                None,
            ),
            (
                "Contribution margin",
                format_ratio(summary.marginal_contribution_percentage),
                r.map(|s| format_ratio(s.marginal_contribution_percentage)),
                None,
            ),
            (
                "Net profit",
                format_money(summary.net_profit),
                r.map(|s| format_money(s.net_profit)),
                c.map(|c| c.net_profit_change_pct),
            ),
            (
                "Profit margin",
                format_ratio(summary.profit_margin),
                r.map(|s| format_ratio(s.profit_margin)),
                None,
            ),
            (
                "Break-even point",
                format_money(summary.break_even_point),
                r.map(|s| format_money(s.break_even_point)),
                None,
            ),
            (
                "Assets value",
                format_money(summary.total_assets_value),
                r.map(|s| format_money(s.total_assets_value)),
                None,
            ),
            (
                "Investment yields",
                format_money(summary.total_investment_yields),
                r.map(|s| format_money(s.total_investment_yields)),
                None,
            ),
        ]
    };

    let mut table = if reference.is_some() {
        new_table(vec!["Metric", "Current", "Reference", "Change"])
    } else {
        new_table(vec!["Metric", "Value"])
    };

    for (label, current, previous, change) in rows {
        match previous {
            Some(previous) => {
                let change = change.map(format_change).unwrap_or_default();
                table.add_row(vec![label.to_string(), current, previous, change]);
            }
            None => {
                table.add_row(vec![label.to_string(), current]);
            }
        }
    }
    right_align(&mut table, &[1, 2, 3]);
    table
}

pub fn simulation_table(summary: &FinancialSummary, outcome: &SimulationOutcome) -> Table {
    let mut table = new_table(vec!["", "Current", "Projected"]);
    table.add_row(vec![
        "Revenue".to_string(),
        format_money(summary.total_revenue),
        format_money(outcome.new_revenue),
    ]);
    table.add_row(vec![
        "Net profit".to_string(),
        format_money(summary.net_profit),
        format_money(outcome.new_profit),
    ]);
    table.add_row(vec![
        "Net margin".to_string(),
        format_ratio(summary.profit_margin),
        format_ratio(outcome.projected_margin),
    ]);
    let direction = if outcome.is_improvement() { "Gain" } else { "Loss" };
    table.add_row(vec![
        direction.to_string(),
        String::new(),
        format_money(outcome.profit_delta.abs()),
    ]);
    right_align(&mut table, &[1, 2]);
    table
}

pub fn sales_table(sales: &[Sale]) -> Table {
    let mut table = new_table(vec!["Id", "Date", "Product", "Price", "Qty", "Var. cost/u", "Revenue"]);
    for sale in sales {
        table.add_row(vec![
            sale.id.to_string(),
            sale.date.to_string(),
            sale.name.clone(),
            format_money(sale.price),
            sale.quantity.to_string(),
            format_money(sale.variable_cost_per_unit),
            format_money(sale.revenue()),
        ]);
    }
    right_align(&mut table, &[3, 4, 5, 6]);
    table
}

pub fn expenses_table(expenses: &[Expense]) -> Table {
    let mut table = new_table(vec!["Id", "Date", "Description", "Category", "Kind", "Amount"]);
    for expense in expenses {
        table.add_row(vec![
            expense.id.to_string(),
            expense.date.to_string(),
            expense.description.clone(),
            expense.category.clone(),
            expense.kind.to_string(),
            format_money(expense.amount),
        ]);
    }
    right_align(&mut table, &[5]);
    table
}

pub fn investments_table(investments: &[Investment]) -> Table {
    let mut table = new_table(vec!["Id", "Purchased", "Name", "Kind", "Initial value", "Yields", "Cumulative yield"]);
    for investment in investments {
        table.add_row(vec![
            investment.id.to_string(),
            investment.purchase_date.to_string(),
            investment.name.clone(),
            investment.kind.to_string(),
            format_money(investment.initial_value),
            investment.yields.len().to_string(),
            format_money(investment.cumulative_yield()),
        ]);
    }
    right_align(&mut table, &[4, 5, 6]);
    table
}

/// The administrator's overview: every client with its headline KPIs.
pub fn clients_table(rows: &[(&ClientRecord, FinancialSummary)]) -> Table {
    let mut table = new_table(vec!["Id", "Business", "Username", "Revenue", "Net profit", "Margin"]);
    for (client, summary) in rows {
        table.add_row(vec![
            client.id.clone(),
            client.business_name.clone(),
            client.username.clone(),
            format_money(summary.total_revenue),
            format_money(summary.net_profit),
            format_ratio(summary.profit_margin),
        ]);
    }
    right_align(&mut table, &[3, 4, 5]);
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::compare;
    use chrono::NaiveDate;
    use core_types::ExpenseKind;
    use rust_decimal_macros::dec;

    fn summary() -> FinancialSummary {
        FinancialSummary {
            total_revenue: dec!(200),
            total_fixed_costs: dec!(50),
            total_variable_costs: dec!(30),
            net_profit: dec!(120),
            profit_margin: dec!(0.6),
            ..FinancialSummary::new()
        }
    }

    #[test]
    fn summary_without_reference_has_two_columns() {
        let rendered = summary_table(&summary(), None).to_string();
        assert!(rendered.contains("Revenue"));
        assert!(rendered.contains("$200.00"));
        assert!(rendered.contains("60.0%"));
        assert!(!rendered.contains("Reference"));
    }

    #[test]
    fn summary_with_reference_shows_changes() {
        let reference = FinancialSummary {
            total_revenue: dec!(100),
            ..summary()
        };
        let comparison = compare(&summary(), &reference);
        let rendered = summary_table(&summary(), Some((&reference, &comparison))).to_string();
        assert!(rendered.contains("Reference"));
        assert!(rendered.contains("$100.00"));
        assert!(rendered.contains("↑ 100.0%"));
    }

    #[test]
    fn ledger_tables_list_records() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let sales = vec![Sale::new("Widget", dec!(1500), 2, dec!(10), date)];
        let expenses = vec![Expense::new("Rent", dec!(50), ExpenseKind::Fixed, "premises", date)];

        let rendered = sales_table(&sales).to_string();
        assert!(rendered.contains("Widget"));
        assert!(rendered.contains("$3,000.00"));

        let rendered = expenses_table(&expenses).to_string();
        assert!(rendered.contains("FIXED"));
        assert!(rendered.contains("2024-01-10"));
    }

    #[test]
    fn simulation_reports_direction() {
        let outcome = SimulationOutcome {
            new_revenue: dec!(209),
            new_profit: dec!(159),
            profit_delta: dec!(39),
            projected_margin: dec!(0.76),
        };
        let rendered = simulation_table(&summary(), &outcome).to_string();
        assert!(rendered.contains("Gain"));
        assert!(rendered.contains("$39.00"));
        assert!(rendered.contains("$209.00"));
    }
}
