use ndarray::Array1;
use sprs::CsMat;

use crate::{data::Catalog, models::UserId};

/// Movies closest to the user's viewing profile, excluding ones already seen
///
/// `features` holds one CSR row per catalog movie, in catalog order. Returns
/// `None` when the user has not seen any catalog movie, since no profile can
/// be built.
pub fn recommend(
    catalog: &Catalog,
    features: &CsMat<f64>,
    user_id: UserId,
    top_n: usize,
) -> Option<Vec<String>> {
    let seen = catalog.seen_by(user_id);

    let seen_rows: Vec<usize> = catalog
        .movies()
        .iter()
        .enumerate()
        .filter(|(_, movie)| seen.contains(&movie.id))
        .map(|(row, _)| row)
        .collect();
    let profile = user_profile(features, &seen_rows)?;
    let profile_norm = profile.dot(&profile).sqrt();

    let mut scored: Vec<(usize, f64)> = features
        .outer_iterator()
        .enumerate()
        .map(|(row, vector)| {
            let denom = vector.l2_norm() * profile_norm;
            let score = if denom == 0.0 {
                0.0
            } else {
                vector.dot_dense(profile.view()) / denom
            };
            (row, score)
        })
        .collect();
    // Stable, so equal scores keep catalog order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    tracing::debug!(
        user_id,
        seen = seen.len(),
        candidates = scored.len(),
        "Scored catalog against user profile"
    );

    let titles = scored
        .into_iter()
        .map(|(row, _)| &catalog.movies()[row])
        .filter(|movie| !seen.contains(&movie.id))
        .take(top_n)
        .map(|movie| movie.title.clone())
        .collect();

    Some(titles)
}

/// Column-wise mean of the given rows
fn user_profile(features: &CsMat<f64>, rows: &[usize]) -> Option<Array1<f64>> {
    if rows.is_empty() {
        return None;
    }

    let mut profile: Array1<f64> = Array1::zeros(features.cols());
    for vector in rows.iter().filter_map(|&row| features.outer_view(row)) {
        for (col, &w) in vector.iter() {
            profile[col] += w;
        }
    }
    Some(profile / rows.len() as f64)
}
