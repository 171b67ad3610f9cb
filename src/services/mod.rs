pub mod content;
pub mod popularity;
pub mod recommendations;
pub mod stop_words;
pub mod text;
pub mod tfidf;

pub use recommendations::Recommender;
