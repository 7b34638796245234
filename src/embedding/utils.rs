use std::path::{Path, PathBuf};
use tokenizers::{Tokenizer, TruncationParams};

use super::error::EmbeddingError;

/// Resolves `tokenizer.json` from a model directory or an explicit tokenizer path.
pub fn tokenizer_path(model_path: &Path) -> PathBuf {
    if model_path
        .file_name()
        .is_some_and(|name| name == std::ffi::OsStr::new("tokenizer.json"))
    {
        model_path.to_path_buf()
    } else {
        model_path.join("tokenizer.json")
    }
}

/// Loads a tokenizer with truncation at `max_len` tokens.
///
/// BERT-family encoders reject sequences longer than their position table, so long
/// file bodies are cut rather than failing the whole request.
pub fn load_tokenizer_with_truncation(
    model_path: &Path,
    max_len: usize,
) -> Result<Tokenizer, EmbeddingError> {
    let path = tokenizer_path(model_path);
    let mut tokenizer =
        Tokenizer::from_file(&path).map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("failed to load {}: {}", path.display(), e),
        })?;

    let truncation = TruncationParams {
        max_length: max_len,
        ..Default::default()
    };

    tokenizer
        .with_truncation(Some(truncation))
        .map_err(|e| EmbeddingError::TokenizationFailed {
            reason: format!("failed to configure truncation: {}", e),
        })?;

    Ok(tokenizer)
}
