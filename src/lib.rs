//! elspot-proxy - HTTP facade for Energi Data Service spot prices
//!
//! Serves `GET /data` by fetching the `Elspotprices` dataset from the
//! configured upstream and republishing its records as JSON. Upstream
//! failures are served as an empty record list, never as an error.

pub mod api;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;
pub mod upstream;

pub use error::{Error, Result};
