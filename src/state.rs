use std::sync::Arc;

use crate::aggregator::Aggregator;

/// Shared application state passed to all handlers.
///
/// The aggregator only holds immutable provider adapters, so one instance
/// serves every request.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
}

impl AppState {
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}
