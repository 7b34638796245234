//! Cheap noise filter applied to file bodies before embedding.
//!
//! Only file contents go through here. Issue text is embedded as written.

/// Lower-cases `content` and keeps whitespace-separated tokens that are
/// alphanumeric or longer than two characters.
///
/// Drops short punctuation runs such as `{`, `=>` or `);` while keeping short
/// identifiers like `id` or `io`.
pub fn preprocess_content(content: &str) -> String {
    let lowered = content.to_lowercase();
    lowered
        .split_whitespace()
        .filter(|token| token.chars().count() > 2 || token.chars().all(char::is_alphanumeric))
        .collect::<Vec<_>>()
        .join(" ")
}
