//! Similarity scoring and result ordering.

use std::cmp::Ordering;

use crate::constants::SCORE_DECIMALS;
use crate::model::FileMatch;

/// Cosine similarity of two vectors.
///
/// Returns `None` when the lengths differ, either vector is empty or has zero
/// norm, or the result is not finite. Such files are never reported.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Option<f32> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return None;
    }

    let similarity = dot / (norm_a * norm_b);
    similarity.is_finite().then_some(similarity)
}

/// Clamps to `[-1, 1]` and rounds to the reported precision.
#[inline]
pub fn round_score(score: f32) -> f32 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    ((f64::from(score.clamp(-1.0, 1.0)) * factor).round() / factor) as f32
}

/// Filters and orders raw `(path, similarity)` pairs.
///
/// Keeps pairs whose raw value is strictly above `min_similarity`, sorts them by
/// raw value descending (ties keep input order), then rounds. A pair whose
/// rounded score no longer exceeds the threshold is dropped.
pub fn rank_matches<I>(scored: I, min_similarity: f32) -> Vec<FileMatch>
where
    I: IntoIterator<Item = (String, f32)>,
{
    let mut kept: Vec<(String, f32)> = scored
        .into_iter()
        .filter(|(_, score)| score.is_finite() && *score > min_similarity)
        .collect();

    kept.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    kept.into_iter()
        .filter_map(|(file_path, raw)| {
            let similarity_score = round_score(raw);
            (similarity_score > min_similarity).then_some(FileMatch {
                file_path,
                similarity_score,
            })
        })
        .collect()
}
