use std::sync::Arc;

use crate::{config::Config, services::Recommender};

/// Shared application state
///
/// Everything here is read-only after startup, so it is shared without locks.
#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    /// Popularity window used when a request omits `weeks`
    pub default_weeks: u32,
    /// Result count used when a request omits `top_n`
    pub default_top_n: usize,
}

impl AppState {
    pub fn new(recommender: Recommender, config: &Config) -> Self {
        Self {
            recommender: Arc::new(recommender),
            default_weeks: config.default_weeks,
            default_top_n: config.default_top_n,
        }
    }
}
