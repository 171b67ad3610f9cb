use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{Interaction, Movie, MovieId, UserId},
};

/// Movies and interactions loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
    interactions: Vec<Interaction>,
    /// movieId -> row in `movies`
    index: HashMap<MovieId, usize>,
}

impl Catalog {
    /// Builds a catalog from already parsed rows
    ///
    /// Duplicate movie ids keep the first row for lookups.
    pub fn new(movies: Vec<Movie>, interactions: Vec<Interaction>) -> Self {
        let mut index = HashMap::with_capacity(movies.len());
        for (row, movie) in movies.iter().enumerate() {
            index.entry(movie.id).or_insert(row);
        }

        Self {
            movies,
            interactions,
            index,
        }
    }

    /// Reads both CSV files from disk
    pub fn load(movies_path: impl AsRef<Path>, interactions_path: impl AsRef<Path>) -> AppResult<Self> {
        let movies_path = movies_path.as_ref();
        let interactions_path = interactions_path.as_ref();

        let movies = open(movies_path)?;
        let interactions = open(interactions_path)?;

        let catalog = Self::from_readers(movies, interactions)?;

        tracing::info!(
            movies_path = %movies_path.display(),
            interactions_path = %interactions_path.display(),
            movie_count = catalog.movies.len(),
            interaction_count = catalog.interactions.len(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    /// Parses both CSV documents from arbitrary readers
    pub fn from_readers<M: Read, I: Read>(movies: M, interactions: I) -> AppResult<Self> {
        let movies: Vec<Movie> = parse_rows(movies)?;
        let interactions: Vec<Interaction> = parse_rows(interactions)?;

        let catalog = Self::new(movies, interactions);

        let dangling = catalog
            .interactions
            .iter()
            .filter(|i| !catalog.index.contains_key(&i.movie_id))
            .count();
        if dangling > 0 {
            tracing::warn!(dangling, "Interactions reference unknown movies");
        }

        Ok(catalog)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn interactions(&self) -> &[Interaction] {
        &self.interactions
    }

    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.index.get(&id).map(|&row| &self.movies[row])
    }

    /// Distinct movie ids a user has interacted with
    pub fn seen_by(&self, user_id: UserId) -> HashSet<MovieId> {
        self.interactions
            .iter()
            .filter(|i| i.user_id == user_id)
            .map(|i| i.movie_id)
            .collect()
    }

    /// Timestamp of the most recent interaction
    pub fn newest_timestamp(&self) -> Option<i64> {
        self.interactions.iter().map(|i| i.timestamp).max()
    }
}

fn open(path: &Path) -> AppResult<File> {
    File::open(path).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse_rows<T: DeserializeOwned, R: Read>(reader: R) -> AppResult<Vec<T>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOVIES: &str = "movieId,title,Plot,genres\n\
        1,Heat,\"A thief and a detective, face to face.\",Action|Crime\n\
        2,Alien,,Horror|Sci-Fi\n";

    const INTERACTIONS: &str = "userId,movieId,timestamp,rating\n\
        10,1,1700000000,4.0\n\
        10,2,1700000100,3.5\n\
        11,1,1700000200,5.0\n\
        11,99,1700000300,1.0\n";

    fn catalog() -> Catalog {
        Catalog::from_readers(MOVIES.as_bytes(), INTERACTIONS.as_bytes()).unwrap()
    }

    #[test]
    fn test_parses_movies_with_quoted_and_missing_plot() {
        let catalog = catalog();
        assert_eq!(catalog.movies().len(), 2);
        assert_eq!(
            catalog.movie(1).unwrap().plot.as_deref(),
            Some("A thief and a detective, face to face.")
        );
        assert_eq!(catalog.movie(2).unwrap().plot, None);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let catalog = catalog();
        assert_eq!(catalog.interactions().len(), 4);
        assert_eq!(catalog.interactions()[0], Interaction::new(10, 1, 1_700_000_000));
    }

    #[test]
    fn test_seen_by_and_newest_timestamp() {
        let catalog = catalog();
        let seen = catalog.seen_by(11);
        assert!(seen.contains(&1));
        assert!(seen.contains(&99));
        assert_eq!(seen.len(), 2);
        assert!(catalog.seen_by(12).is_empty());
        assert_eq!(catalog.newest_timestamp(), Some(1_700_000_300));
    }

    #[test]
    fn test_duplicate_ids_keep_first_row() {
        let catalog = Catalog::new(
            vec![Movie::new(1, "First", "", ""), Movie::new(1, "Second", "", "")],
            Vec::new(),
        );
        assert_eq!(catalog.movie(1).unwrap().title, "First");
        assert_eq!(catalog.movies().len(), 2);
    }

    #[test]
    fn test_malformed_row_is_an_error() {
        let bad = "userId,movieId,timestamp\nabc,1,1700000000\n";
        let result = Catalog::from_readers(MOVIES.as_bytes(), bad.as_bytes());
        assert!(matches!(result, Err(AppError::Csv(_))));
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = Catalog::load("/nonexistent/movies.csv", "/nonexistent/interactions.csv")
            .unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/movies.csv"));
    }
}
