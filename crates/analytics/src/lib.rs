//! # FinancePro Analytics
//!
//! This crate derives the KPIs of a small business from its ledger: revenue,
//! fixed and variable costs, marginal contribution, break-even point, profit
//! margin and asset totals.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of storage,
//!   authentication or the AI advisor. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** `MetricsEngine` takes a ledger snapshot and a
//!   `DateFilter` and returns a fresh `FinancialSummary`. It never fails and never
//!   mutates its inputs.
//!
//! ## Public API
//!
//! - `MetricsEngine`: Computes a `FinancialSummary`.
//! - `simulate`: Projects profit under a uniform price/volume change.
//! - `compare`: Percentage change between two summaries.
//! - `format`: Money and percentage renderings for display.

// Declare the modules that constitute this crate.
pub mod comparison;
pub mod engine;
pub mod format;
pub mod report;
pub mod simulation;

// Re-export the key components to create a clean, public-facing API.
pub use comparison::{compare, pct_change, PeriodComparison};
pub use engine::MetricsEngine;
pub use report::FinancialSummary;
pub use simulation::{simulate, SimulationOutcome};
