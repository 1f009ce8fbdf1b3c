//! PII masking for text handed to external AI collaborators.
//!
//! [`MaskedText`] can only be built by [`mask_pii`], so a collaborator signature that
//! takes `&MaskedText` cannot receive unmasked transcript text.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
});
static SSN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").expect("valid regex"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d{3}-\d{3}-\d{4}\b").expect("valid regex"));
static STUDENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z]{2}\d{2}[A-Z]{2}\d{4}\b").expect("valid regex"));

/// Text with emails, SSN-like, phone-like, and ID-like tokens replaced by placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedText(String);

impl MaskedText {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MaskedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace personally identifying tokens with `[EMAIL]`, `[SSN]`, `[PHONE]`, `[ID]`.
#[must_use]
pub fn mask_pii(text: &str) -> MaskedText {
    let masked = EMAIL.replace_all(text, "[EMAIL]");
    let masked = SSN.replace_all(&masked, "[SSN]");
    let masked = PHONE.replace_all(&masked, "[PHONE]");
    let masked = STUDENT_ID.replace_all(&masked, "[ID]");
    MaskedText(masked.into_owned())
}
