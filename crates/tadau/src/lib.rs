//! Tadau: opt-in usage telemetry for the GA4 Measurement Protocol.
//!
//! Tadau lets open-source tools self-report adoption and usage metrics,
//! with explicit user opt-in, by POSTing events to the Measurement
//! Protocol `collect` endpoint. Delivery is fire-and-forget: one request
//! per event, no batching, no retries, no persistence.
//!
//! # Example
//!
//! ```rust,ignore
//! use tadau::{Event, Tadau};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tadau::Error> {
//!     // Credentials and fixed dimensions can also come from a YAML file
//!     // via `.config_file("tadau.yaml")`.
//!     let client = Tadau::builder()
//!         .api_secret("my_api_secret")
//!         .measurement_id("G-XXXXXXXXXX")
//!         .opt_in(true)
//!         .fixed_dimension("deploy_id", "123456asc")
//!         .build()?;
//!
//!     client
//!         .send_events(&[Event::new("download").param("value", "42")])
//!         .await;
//!
//!     client
//!         .send_error_event("parse failed", "E42", "loader", "loader_7")
//!         .await;
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod payload;
mod transport;
mod types;

pub use client::Tadau;
pub use config::{Config, TadauBuilder, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
pub use error::Error;
pub use types::{CollectEvent, CollectPayload, Event, Scalar, RESERVED_KEYS};
