//! solace-store
//!
//! Key-based record access over named collections, abstracted from any
//! concrete backend. The portal talks to a hosted Postgres/REST service in
//! production ([`postgrest::PostgrestStore`]) and to an in-process store in
//! tests and local development ([`memory::MemoryStore`]).

pub mod error;
pub mod filter;
pub mod memory;
pub mod postgrest;
pub mod record;
