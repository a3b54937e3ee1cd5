//! CLI operation handlers.
//!
//! - [`digest`]: Runs every query, reconciles, and writes the report
//!
//! Output formatting utilities are in [`output`].

pub mod digest;
pub mod output;
