//! # FinancePro Storage Crate
//!
//! This crate is the system's "permanent archive": it owns every client record
//! and writes the whole client map back to a key-value store on each change.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Adapter:** All persistence details live here. The rest of the
//!   application sees a `ClientRepository` and never touches the stored JSON.
//! - **Single Owner:** Only the repository mutates client records; callers get
//!   shared references or clones.
//! - **Parse or Fall Back:** An absent or unreadable stored value yields the
//!   default dataset rather than an error.
//!
//! ## Public API
//!
//! - `LedgerStore`: The key-value seam, with `FileStore` and `MemoryStore`.
//! - `ClientRepository`: Copy-on-write access to client records.
//! - `PortalSettings`: Portal-wide settings kept under their own key.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod portal;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use error::DbError;
pub use portal::PortalSettings;
pub use repository::{ClientRepository, ClientUpdate, default_clients};
pub use store::{FileStore, LedgerStore, MemoryStore};
