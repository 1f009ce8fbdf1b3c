//! # cmap-config
//!
//! Layered configuration loading for coursemap using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CMAP_*` prefix, `__` as separator)
//! 2. Project-level `.coursemap/config.toml`
//! 3. User-level `~/.config/coursemap/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CMAP_MATCHING__THRESHOLD` -> `matching.threshold`,
//! `CMAP_LLM__API_KEY` -> `llm.api_key`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use cmap_config::CmapConfig;
//!
//! let config = CmapConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//!
//! if config.llm.is_configured() {
//!     println!("LLM endpoint: {}", config.llm.endpoint);
//! }
//! ```

mod embeddings;
mod error;
mod extraction;
mod grading;
mod llm;
mod matching;
mod semantic;

pub use embeddings::EmbeddingsConfig;
pub use error::ConfigError;
pub use extraction::ExtractionConfig;
pub use grading::GradingConfig;
pub use llm::LlmConfig;
pub use matching::MatchingConfig;
pub use semantic::SemanticConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CmapConfig {
    #[serde(default)]
    pub grading: GradingConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub semantic: SemanticConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub embeddings: EmbeddingsConfig,
}

impl CmapConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed or a value has
    /// the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".coursemap/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("CMAP_").split("__"))
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_interval("matching.threshold", self.matching.threshold)?;
        positive_factor(
            "matching.matching_partial_factor",
            self.matching.matching_partial_factor,
        )?;
        positive_factor(
            "matching.verification_partial_factor",
            self.matching.verification_partial_factor,
        )?;
        unit_interval(
            "extraction.min_alphanumeric_ratio",
            self.extraction.min_alphanumeric_ratio,
        )?;
        unit_interval("semantic.tfidf_prefilter", self.semantic.tfidf_prefilter)?;
        unit_interval("semantic.vector_prefilter", self.semantic.vector_prefilter)?;
        unit_interval(
            "semantic.single_document_min_score",
            self.semantic.single_document_min_score,
        )?;
        unit_interval(
            "semantic.dual_document_min_score",
            self.semantic.dual_document_min_score,
        )?;
        nonzero("semantic.batch_size", self.semantic.batch_size)?;
        nonzero("semantic.top_k", self.semantic.top_k)?;
        nonzero("semantic.vector_search_limit", self.semantic.vector_search_limit)?;
        if self.grading.threshold.trim().is_empty() {
            return Err(invalid("grading.threshold", "must not be empty"));
        }
        Ok(())
    }

    /// Fail with [`ConfigError::NotConfigured`] unless the LLM section is usable.
    ///
    /// # Errors
    ///
    /// When endpoint or API key is missing.
    pub fn require_llm(&self) -> Result<&LlmConfig, ConfigError> {
        if self.llm.is_configured() {
            Ok(&self.llm)
        } else {
            Err(ConfigError::NotConfigured {
                section: "llm".to_string(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("coursemap").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be within [0, 1]"))
    }
}

fn positive_factor(field: &str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be within (0, 1]"))
    }
}

fn nonzero(field: &str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(invalid(field, "must be greater than zero"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CmapConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.llm.is_configured());
        assert!(!config.extraction.ai_enabled);
        assert_eq!(config.grading.institution, "default");
        assert_eq!(config.grading.threshold, "C");
    }

    #[test]
    fn figment_builds_without_files() {
        let config: CmapConfig = CmapConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.extraction.expected_course_count, 16);
        assert_eq!(config.semantic.batch_size, 10);
        assert_eq!(config.semantic.top_k, 5);
    }

    #[test]
    fn zero_factor_is_rejected() {
        let mut config = CmapConfig::default();
        config.matching.matching_partial_factor = 0.0;
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "matching.matching_partial_factor")
        );
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let mut config = CmapConfig::default();
        config.semantic.batch_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn require_llm_reports_section() {
        let config = CmapConfig::default();
        let err = config.require_llm().unwrap_err();
        assert!(err.to_string().contains("'llm'"));
    }
}
