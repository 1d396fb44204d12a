use analytics::FinancialSummary;
use analytics::format::{format_money, format_ratio};

/// Builds the natural-language request sent to the model. Only the summary
/// figures are shared, never individual ledger records or credentials.
pub fn build_prompt(summary: &FinancialSummary) -> String {
    let mut prompt = String::new();
    prompt.push_str(
        "Act as the CFO and strategy consultant of a small business. \
         Analyse the following results for the selected period.\n\n",
    );

    prompt.push_str("OPERATING SUMMARY:\n");
    prompt.push_str(&format!("- Total revenue: {}\n", format_money(summary.total_revenue)));
    prompt.push_str(&format!("- Net profit: {}\n", format_money(summary.net_profit)));
    prompt.push_str(&format!(
        "- Contribution margin: {}\n",
        format_ratio(summary.marginal_contribution_percentage)
    ));
    prompt.push_str(&format!("- Break-even point: {}\n", format_money(summary.break_even_point)));
    prompt.push_str(&format!("- Profit margin: {}\n\n", format_ratio(summary.profit_margin)));

    prompt.push_str("COST STRUCTURE:\n");
    prompt.push_str(&format!("- Fixed costs: {}\n", format_money(summary.total_fixed_costs)));
    prompt.push_str(&format!(
        "- Variable costs: {}\n\n",
        format_money(summary.total_variable_costs)
    ));

    prompt.push_str("ASSET PORTFOLIO:\n");
    prompt.push_str(&format!(
        "- Value of assets and machinery: {}\n",
        format_money(summary.total_assets_value)
    ));
    prompt.push_str(&format!(
        "- Investment yields: {}\n\n",
        format_money(summary.total_investment_yields)
    ));

    prompt.push_str(
        "ANALYSIS TASKS:\n\
         1. Health check: is the business profitable, and is the break-even point reachable?\n\
         2. Efficiency: are fixed costs too high relative to revenue?\n\
         3. Scenarios: how would a 5% price increase affect profit?\n\
         4. Investments: should assets be sold, or profit reinvested in the core business?\n\n\
         Give short, actionable, professional advice. Use Markdown (bold, lists).\n",
    );
    prompt
}
