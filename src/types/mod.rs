//! Type definitions for the MultiViz API.
//!
//! The service is the source of truth for payload shapes: operations accept
//! any `serde::Serialize` payload and return the decoded JSON. The types here
//! are convenience builders for the common waveform payloads.

pub mod measurement;
pub mod options;
pub mod source;
