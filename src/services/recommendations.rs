use sprs::CsMat;

use crate::{
    data::Catalog,
    error::AppResult,
    models::{Recommendation, Strategy, UserId},
};

use super::{
    content, popularity,
    text::{clean_genres, clean_plot},
    tfidf::{self, TermMatrix},
};

/// Picks a strategy per request over a catalog fixed at startup
///
/// The combined plot + genre feature matrix is built once in [`Recommender::new`]
/// and shared by every content-based request.
#[derive(Debug)]
pub struct Recommender {
    catalog: Catalog,
    features: CsMat<f64>,
}

impl Recommender {
    pub fn new(catalog: Catalog) -> AppResult<Self> {
        let (plot, genres) = term_matrices(&catalog)?;
        let features = tfidf::combine(&plot, &genres);

        tracing::info!(
            movies = catalog.movies().len(),
            interactions = catalog.interactions().len(),
            terms = plot.terms.len(),
            "Recommender ready"
        );

        Ok(Self { catalog, features })
    }

    /// Popularity for anonymous users and users without a profile, content-based otherwise
    pub fn run_recommendations(
        &self,
        user_id: Option<UserId>,
        weeks: u32,
        top_n: usize,
    ) -> Recommendation {
        let content_based = user_id.and_then(|user_id| {
            content::recommend(&self.catalog, &self.features, user_id, top_n)
        });

        match content_based {
            Some(titles) => Recommendation {
                strategy: Strategy::ContentBased,
                titles,
            },
            None => {
                if let Some(user_id) = user_id {
                    tracing::info!(user_id, "No viewing profile, falling back to popularity");
                }
                Recommendation {
                    strategy: Strategy::Popularity,
                    titles: popularity::recommend(&self.catalog, weeks, top_n),
                }
            }
        }
    }
}

/// Plot TF-IDF, and genre TF-IDF restricted to the plot vocabulary
fn term_matrices(catalog: &Catalog) -> AppResult<(TermMatrix, TermMatrix)> {
    let plots: Vec<String> = catalog
        .movies()
        .iter()
        .map(|m| clean_plot(m.plot.as_deref()))
        .collect();
    let genres: Vec<String> = catalog
        .movies()
        .iter()
        .map(|m| clean_genres(&m.genres))
        .collect();

    let plot = tfidf::fit_transform(&plots)?;
    let genres = tfidf::transform_with_vocabulary(&plot.terms, &genres)?;
    Ok((plot, genres))
}
