use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether an expense moves with sales volume.
///
/// The set is closed: stored ledgers or CLI input naming any other kind are
/// rejected instead of being silently left out of both cost totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseKind {
    Fixed,
    Variable,
}

impl ExpenseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseKind::Fixed => "FIXED",
            ExpenseKind::Variable => "VARIABLE",
        }
    }
}

impl fmt::Display for ExpenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "FIXED" => Ok(ExpenseKind::Fixed),
            "VARIABLE" => Ok(ExpenseKind::Variable),
            _ => Err(CoreError::UnknownVariant {
                kind: "expense kind",
                value: s.to_string(),
            }),
        }
    }
}

/// The asset classes an investment can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentKind {
    Machinery,
    Vehicle,
    Stock,
    Bond,
    RealEstate,
}

impl InvestmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentKind::Machinery => "MACHINERY",
            InvestmentKind::Vehicle => "VEHICLE",
            InvestmentKind::Stock => "STOCK",
            InvestmentKind::Bond => "BOND",
            InvestmentKind::RealEstate => "REAL_ESTATE",
        }
    }
}

impl fmt::Display for InvestmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "MACHINERY" => Ok(InvestmentKind::Machinery),
            "VEHICLE" => Ok(InvestmentKind::Vehicle),
            "STOCK" => Ok(InvestmentKind::Stock),
            "BOND" => Ok(InvestmentKind::Bond),
            "REAL_ESTATE" => Ok(InvestmentKind::RealEstate),
            _ => Err(CoreError::UnknownVariant {
                kind: "investment kind",
                value: s.to_string(),
            }),
        }
    }
}

/// The two static roles a session can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Client,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => f.write_str("ADMIN"),
            UserRole::Client => f.write_str("CLIENT"),
        }
    }
}

// Accepts `real-estate`, `Real_Estate`, ` fixed ` and friends.
fn normalize(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace('-', "_")
}
