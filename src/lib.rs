//! Visi: an AI study coach backend.
//!
//! Each student message is triaged into one of five coaching modes by
//! keyword rules, an outbound prompt is composed for that mode, and the
//! prompt is relayed to a text-generation provider.
//!
//! See `DESIGN.md` for the module map.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod logging;
pub mod types;

pub mod prompts;
pub mod triage;

pub mod analytics;
pub mod composer;
pub mod providers;

pub mod coach;
pub mod server;
