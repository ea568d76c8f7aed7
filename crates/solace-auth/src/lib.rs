//! solace-auth
//!
//! Session resolution against a GoTrue-style hosted auth service, plus
//! local JWT validation for the API middleware.

pub mod client;
pub mod error;
pub mod jwt;
pub mod session;
