use std::collections::HashMap;

use chrono::{DateTime, Duration};

use crate::{data::Catalog, models::MovieId};

/// Movies ranked by view count inside the recent window, most viewed first
///
/// The window ends at the newest interaction in the catalog and spans `weeks`
/// weeks back from it, inclusive. Ties go to the lower movie id. Movies absent
/// from the catalog are skipped before `top_n` is applied.
pub fn recommend(catalog: &Catalog, weeks: u32, top_n: usize) -> Vec<String> {
    ranked(catalog, weeks)
        .into_iter()
        .filter_map(|(movie_id, _)| catalog.movie(movie_id))
        .take(top_n)
        .map(|movie| movie.title.clone())
        .collect()
}

/// `(movie id, recent view count)` pairs in ranking order
pub fn ranked(catalog: &Catalog, weeks: u32) -> Vec<(MovieId, usize)> {
    let Some(newest) = catalog.newest_timestamp() else {
        return Vec::new();
    };
    let window_start = window_start(newest, weeks);

    let mut counts: HashMap<MovieId, usize> = HashMap::new();
    for interaction in catalog.interactions() {
        if window_start.map_or(true, |start| interaction.timestamp >= start) {
            *counts.entry(interaction.movie_id).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(MovieId, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    tracing::debug!(weeks, newest, recent_movies = ranked.len(), "Ranked recent movies");

    ranked
}

/// Epoch seconds of the window start, `None` when it falls outside the
/// representable date range (everything counts as recent)
fn window_start(newest: i64, weeks: u32) -> Option<i64> {
    let newest = DateTime::from_timestamp(newest, 0)?;
    let span = Duration::try_weeks(i64::from(weeks))?;
    newest.checked_sub_signed(span).map(|start| start.timestamp())
}
