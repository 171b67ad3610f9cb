use serde::{Deserialize, Serialize};

use super::{MovieId, UserId};

/// A single user/movie view event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interaction {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "movieId")]
    pub movie_id: MovieId,
    /// Unix epoch seconds
    pub timestamp: i64,
}

impl Interaction {
    pub fn new(user_id: UserId, movie_id: MovieId, timestamp: i64) -> Self {
        Self {
            user_id,
            movie_id,
            timestamp,
        }
    }
}
