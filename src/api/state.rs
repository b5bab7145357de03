//! API server state

use std::sync::Arc;

use crate::upstream::PriceSource;

/// API server state
#[derive(Clone)]
pub struct AppState {
    /// Where `/data` gets its spot prices from
    pub source: Arc<dyn PriceSource>,
}

impl AppState {
    pub fn new(source: Arc<dyn PriceSource>) -> Self {
        Self { source }
    }
}
