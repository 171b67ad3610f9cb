use std::collections::HashMap;

use linfa_preprocessing::tf_idf_vectorization::{
    FittedTfIdfVectorizer, TfIdfVectorizer,
};
use ndarray::Array1;
use sprs::{CsMat, TriMat};

use crate::error::AppResult;

use super::stop_words::ENGLISH_STOP_WORDS;

/// Runs of two or more word characters
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// TF-IDF weights, one row per document, with the term behind each column
#[derive(Debug, Clone)]
pub struct TermMatrix {
    pub matrix: CsMat<f64>,
    pub terms: Vec<String>,
}

/// Lowercased, stop-word filtered unigrams with smoothed idf
fn vectorizer() -> TfIdfVectorizer {
    TfIdfVectorizer::default()
        .convert_to_lowercase(true)
        .split_regex(TOKEN_PATTERN)
        .n_gram_range(1, 1)
        .normalize(false)
        .stopwords(ENGLISH_STOP_WORDS)
    // idf method defaults to TfIdfMethod::Smooth (no setter in linfa-preprocessing 0.7)
}

/// Learns the vocabulary from `docs` and weighs them against it
pub fn fit_transform(docs: &[String]) -> AppResult<TermMatrix> {
    let docs = Array1::from_vec(docs.to_vec());
    let fitted = vectorizer().fit(&docs)?;
    weigh(&fitted, &docs)
}

/// Weighs `docs` against a fixed vocabulary; terms outside it are dropped
/// and idf comes from `docs` alone
pub fn transform_with_vocabulary(terms: &[String], docs: &[String]) -> AppResult<TermMatrix> {
    let docs = Array1::from_vec(docs.to_vec());
    let fitted = vectorizer().fit_vocabulary(terms)?;
    weigh(&fitted, &docs)
}

fn weigh(fitted: &FittedTfIdfVectorizer, docs: &Array1<String>) -> AppResult<TermMatrix> {
    let weights = fitted.transform(docs);

    tracing::debug!(
        documents = docs.len(),
        terms = fitted.vocabulary().len(),
        "Computed TF-IDF weights"
    );

    Ok(TermMatrix {
        matrix: l2_normalize_rows(&weights),
        terms: fitted.vocabulary().clone(),
    })
}

/// Scales every row to unit length; empty rows stay empty
fn l2_normalize_rows(matrix: &CsMat<f64>) -> CsMat<f64> {
    let mut norms = vec![0.0; matrix.rows()];
    for (&w, (row, _)) in matrix.iter() {
        norms[row] += w * w;
    }

    let mut normalized = TriMat::new(matrix.shape());
    for (&w, (row, col)) in matrix.iter() {
        if w != 0.0 {
            normalized.add_triplet(row, col, w / norms[row].sqrt());
        }
    }
    normalized.to_csr()
}

/// Element-wise sum of two matrices over the same documents, with `other`
/// aligned onto the columns of `base` by term
///
/// Rows are not renormalised. Terms of `other` missing from `base` are dropped.
pub fn combine(base: &TermMatrix, other: &TermMatrix) -> CsMat<f64> {
    let columns: HashMap<&str, usize> = base
        .terms
        .iter()
        .enumerate()
        .map(|(col, term)| (term.as_str(), col))
        .collect();
    let aligned: Vec<Option<usize>> = other
        .terms
        .iter()
        .map(|term| columns.get(term.as_str()).copied())
        .collect();

    let mut sum = TriMat::new(base.matrix.shape());
    for (&w, (row, col)) in base.matrix.iter() {
        sum.add_triplet(row, col, w);
    }
    for (&w, (row, col)) in other.matrix.iter() {
        if let Some(col) = aligned[col] {
            sum.add_triplet(row, col, w);
        }
    }
    sum.to_csr()
}
