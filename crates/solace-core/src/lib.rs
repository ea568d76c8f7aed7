//! solace-core
//!
//! Pure domain types and collection-name conventions for the Solace
//! patient portal. No HTTP or backend dependency — this is the shared
//! vocabulary of the system.

pub mod collections;
pub mod error;
pub mod models;
