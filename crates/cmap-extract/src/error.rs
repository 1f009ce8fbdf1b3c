//! Extraction error types.

/// Structural extraction failures. Everything else (unparseable lines, invalid
/// grades) is dropped, not reported.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The document contained no text at all.
    #[error("no extractable text: the document is empty or whitespace-only")]
    NoExtractableText,
}
