//! Login and authorization for FinancePro.
//!
//! There are exactly two roles. The administrator is a single credential pair
//! from configuration and can act on every client; a client user matches one
//! client record and can only act on that client's ledger.

pub mod error;
pub mod invitation;
pub mod session;

pub use error::AuthError;
pub use invitation::share_message;
pub use session::{authenticate, Session};
