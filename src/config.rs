use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the movies CSV (movieId, title, Plot, genres)
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Path to the interactions CSV (userId, movieId, timestamp)
    #[serde(default = "default_interactions_path")]
    pub interactions_path: String,

    /// Popularity window used when a request omits `weeks`
    #[serde(default = "default_weeks")]
    pub default_weeks: u32,

    /// Result count used when a request omits `top_n`
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_movies_path() -> String {
    "data/movies.csv".to_string()
}

fn default_interactions_path() -> String {
    "data/interactions.csv".to_string()
}

fn default_weeks() -> u32 {
    8
}

fn default_top_n() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            movies_path: default_movies_path(),
            interactions_path: default_interactions_path(),
            default_weeks: default_weeks(),
            default_top_n: default_top_n(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
