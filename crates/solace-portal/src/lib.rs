//! solace-portal
//!
//! The patient-facing core flows: the custom-test assignment workflow
//! (load, score, submit) and the mood/sleep journal. Pure orchestration
//! over an injected [`solace_store::record::RecordStore`] — no markup, no
//! user messaging, no retries. Every failure is classified and returned to
//! the caller.

pub mod error;
pub mod journal;
pub mod observer;
pub mod render;
pub mod workflow;
