//! BLAKE3 fingerprints used as result-cache keys.
//!
//! Every field is written with a little-endian length prefix, so `("ab", "c")` and
//! `("a", "bc")` can never collide through concatenation.

use blake3::Hasher;

use crate::model::{CandidateFile, IssueQuery};

/// Fingerprint of an issue and the candidate paths it is matched against.
///
/// Labels and paths are sorted before hashing: two requests that differ only in
/// candidate order share a cache entry. Returns 64 lowercase hex characters.
pub fn fingerprint<'a, I>(query: &IssueQuery, candidate_paths: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut paths: Vec<&str> = candidate_paths.into_iter().collect();
    paths.sort_unstable();

    let mut hasher = Hasher::new();
    update_field(&mut hasher, query.owner.as_bytes());
    update_field(&mut hasher, query.repo.as_bytes());
    update_field(&mut hasher, query.title.as_bytes());
    update_field(&mut hasher, query.description.as_bytes());

    // BTreeSet iterates in sorted order.
    hasher.update(&(query.labels.len() as u64).to_le_bytes());
    for label in &query.labels {
        update_field(&mut hasher, label.as_bytes());
    }

    hasher.update(&(paths.len() as u64).to_le_bytes());
    for path in paths {
        update_field(&mut hasher, path.as_bytes());
    }

    hasher.finalize().to_hex().to_string()
}

/// Convenience wrapper over [`fingerprint`] taking the candidates themselves.
#[inline]
pub fn fingerprint_candidates(query: &IssueQuery, candidates: &[CandidateFile]) -> String {
    fingerprint(query, candidates.iter().map(|c| c.path.as_str()))
}

/// Hashes arbitrary text into one of `buckets` slots.
///
/// Used by the stub embedder for feature hashing.
#[inline]
pub fn hash_to_bucket(text: &str, buckets: usize) -> usize {
    let hash = blake3::hash(text.as_bytes());
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    (u64::from_le_bytes(bytes) % buckets.max(1) as u64) as usize
}

#[inline]
fn update_field(hasher: &mut Hasher, bytes: &[u8]) {
    hasher.update(&(bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}
