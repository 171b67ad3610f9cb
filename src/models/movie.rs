use serde::{Deserialize, Serialize};

pub type MovieId = u64;
pub type UserId = u64;

/// A row of the movies file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    #[serde(rename = "movieId")]
    pub id: MovieId,
    pub title: String,
    /// Free-text synopsis; missing cells deserialize as `None`
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    /// Pipe-delimited genres, e.g. `Action|Sci-Fi`
    #[serde(default)]
    pub genres: String,
}

impl Movie {
    pub fn new(id: MovieId, title: &str, plot: &str, genres: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            plot: Some(plot.to_string()),
            genres: genres.to_string(),
        }
    }
}
