//! solace-audit
//!
//! Structured audit events for patient actions, emitted through `tracing`
//! so they land in whatever subscriber the binary installs.

pub mod events;
