mod interaction;
mod movie;

pub use interaction::Interaction;
pub use movie::{Movie, MovieId, UserId};

use serde::Serialize;

/// Which strategy produced a set of recommendations
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Most viewed movies inside the recent window
    Popularity,
    /// Movies closest to the user's viewing profile
    ContentBased,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Popularity => write!(f, "popularity"),
            Strategy::ContentBased => write!(f, "content_based"),
        }
    }
}

/// Ranked titles together with the strategy that ranked them
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub strategy: Strategy,
    pub titles: Vec<String>,
}

/// Response body for the recommendation endpoint
#[derive(Debug, Serialize, PartialEq)]
pub struct RecommendationResponse {
    pub recommendations: Vec<String>,
}

impl From<Recommendation> for RecommendationResponse {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            recommendations: recommendation.titles,
        }
    }
}
