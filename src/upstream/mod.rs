//! Upstream spot-price source
//!
//! The HTTP handler only sees [`PriceSource`]. Implementations never fail:
//! any error is folded into a [`FetchOutcome::Degraded`], which always reads
//! back as an empty dataset, so the inbound request has something to serialize.

use async_trait::async_trait;

use crate::error::Error;
use crate::types::PriceDataset;

pub mod http;

pub use http::UpstreamClient;

/// Path of the spot-price dataset, relative to the configured base URL
pub const DATASET_PATH: &str = "/dataset/Elspotprices";

static EMPTY: PriceDataset = PriceDataset {
    records: Vec::new(),
};

/// Result of one fetch against the upstream dataset
#[derive(Debug)]
pub enum FetchOutcome {
    /// Upstream answered with a decodable dataset
    Fresh(PriceDataset),

    /// Upstream failed; reads back as the empty dataset
    Degraded { cause: Error },
}

impl FetchOutcome {
    pub fn degraded(cause: Error) -> Self {
        FetchOutcome::Degraded { cause }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, FetchOutcome::Degraded { .. })
    }

    pub fn cause(&self) -> Option<&Error> {
        match self {
            FetchOutcome::Fresh(_) => None,
            FetchOutcome::Degraded { cause, .. } => Some(cause),
        }
    }

    pub fn dataset(&self) -> &PriceDataset {
        match self {
            FetchOutcome::Fresh(dataset) => dataset,
            FetchOutcome::Degraded { .. } => &EMPTY,
        }
    }

    pub fn into_dataset(self) -> PriceDataset {
        match self {
            FetchOutcome::Fresh(dataset) => dataset,
            FetchOutcome::Degraded { .. } => PriceDataset::empty(),
        }
    }
}

impl From<crate::Result<PriceDataset>> for FetchOutcome {
    fn from(result: crate::Result<PriceDataset>) -> Self {
        match result {
            Ok(dataset) => FetchOutcome::Fresh(dataset),
            Err(cause) => FetchOutcome::degraded(cause),
        }
    }
}

/// Source of spot-price datasets
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the dataset once. Never returns an error.
    async fn fetch(&self) -> FetchOutcome;
}
