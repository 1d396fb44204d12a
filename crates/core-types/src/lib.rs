pub mod enums;
pub mod error;
pub mod filter;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{ExpenseKind, InvestmentKind, UserRole};
pub use error::CoreError;
pub use filter::{DateFilter, DateRange};
pub use structs::{ClientId, ClientRecord, Expense, Investment, Sale, Yield};
