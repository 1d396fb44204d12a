use crate::enums::{ExpenseKind, InvestmentKind};
use crate::filter::DateFilter;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client identifiers are free-form strings (`pyme-demo`, `client-<uuid>`).
pub type ClientId = String;

/// A sale of a product or service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub variable_cost_per_unit: Decimal,
    pub date: NaiveDate,
}

impl Sale {
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        quantity: u32,
        variable_cost_per_unit: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            price,
            quantity,
            variable_cost_per_unit,
            date,
        }
    }

    /// price × quantity, saturating at the `Decimal` range.
    pub fn revenue(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    /// variable cost per unit × quantity, saturating at the `Decimal` range.
    pub fn variable_cost(&self) -> Decimal {
        self.variable_cost_per_unit
            .saturating_mul(Decimal::from(self.quantity))
    }

    /// price × quantity, or `None` when it does not fit in a `Decimal`.
    pub fn checked_revenue(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }

    pub fn checked_variable_cost(&self) -> Option<Decimal> {
        self.variable_cost_per_unit
            .checked_mul(Decimal::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub description: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub kind: ExpenseKind,
    pub category: String,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        kind: ExpenseKind,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount,
            kind,
            category: category.into(),
            date,
        }
    }
}

/// A single return recorded against an investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Yield {
    pub id: Uuid,
    pub date: NaiveDate,
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
    #[serde(default)]
    pub comment: String,
}

impl Yield {
    pub fn new(
        date: NaiveDate,
        amount: Decimal,
        percentage: Option<Decimal>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount,
            percentage,
            comment: comment.into(),
        }
    }
}

/// A long-lived asset held by the business, with its dated yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InvestmentKind,
    pub initial_value: Decimal,
    pub purchase_date: NaiveDate,
    #[serde(default)]
    pub yields: Vec<Yield>,
}

impl Investment {
    pub fn new(
        name: impl Into<String>,
        kind: InvestmentKind,
        initial_value: Decimal,
        purchase_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            initial_value,
            purchase_date,
            yields: Vec::new(),
        }
    }

    /// Sum of every yield amount ever recorded.
    pub fn cumulative_yield(&self) -> Decimal {
        self.yields
            .iter()
            .fold(Decimal::ZERO, |acc, y| acc.saturating_add(y.amount))
    }

    /// Sum of the yields whose date passes `filter`.
    pub fn yield_within(&self, filter: &DateFilter) -> Decimal {
        self.yields
            .iter()
            .filter(|y| filter.includes(y.date))
            .fold(Decimal::ZERO, |acc, y| acc.saturating_add(y.amount))
    }
}

/// One tenant: its login credentials and the ledger collections it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: ClientId,
    pub business_name: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub investments: Vec<Investment>,
}

impl ClientRecord {
    /// Creates a client with an empty ledger.
    pub fn new(
        id: impl Into<ClientId>,
        business_name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            business_name: business_name.into(),
            username: username.into(),
            password: password.into(),
            expenses: Vec::new(),
            sales: Vec::new(),
            investments: Vec::new(),
        }
    }
}
