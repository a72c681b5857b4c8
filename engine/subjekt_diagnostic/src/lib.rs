//! Diagnostic system for leveled reporting.
//!
//! Diagnostics are a reporting channel only: the engine pushes leveled
//! messages (error/warning/info) with optional source positions into a
//! [`Diagnostics`] collector owned by the caller, and control flow never
//! depends on what was collected.

mod diagnostic;
mod queue;

pub use diagnostic::{Diagnostic, Severity};
pub use queue::Diagnostics;
