//! MultiViz Client Library
//!
//! A thin Rust client for the MultiViz measurement-data API. It covers the
//! two resources the service exposes, sources and the measurements recorded
//! under them, with API-key authentication, JSON payloads and readable error
//! reporting.
//!
//! # Features
//!
//! - **Sources**: list, create (optionally tolerating existing ones), get by
//!   id or external id, update, delete
//! - **Measurements**: list with `offset`/`limit`, create (optionally
//!   tolerating existing ones), get, update meta or scalars, delete
//! - **Errors**: one error type carrying HTTP status and body, with
//!   validation details formatted for humans
//! - **Logging**: pluggable [`Logger`](observability::Logger) sink, `tracing` by default
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use multiviz_client::{CreateOptions, MeasurementPage, MultivizClient, WaveformMeasurement};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MultivizClient::from_env()?;
//!
//!     let sources = client.sources().list().await?;
//!     println!("{}", sources);
//!
//!     let measurement = WaveformMeasurement::new(1_700_000_000, 1.0, vec![0.0, 0.4, -0.3]);
//!     client
//!         .measurements()
//!         .create("source-id", &measurement, CreateOptions::ignore_existing())
//!         .await?;
//!
//!     let page = client
//!         .measurements()
//!         .list("source-id", MeasurementPage::default())
//!         .await?;
//!     println!("{}", page);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod services;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use client::{MultivizClient, MultivizClientBuilder};
pub use config::MultivizConfig;
pub use errors::{format_error_body, ErrorDetail, MultivizError, MultivizResult};

// Type re-exports
pub use types::measurement::WaveformMeasurement;
pub use types::options::{CreateOptions, MeasurementPage};
pub use types::source::{CreateSourceRequest, UnitOfMeasure, WaveformSourceMeta};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
