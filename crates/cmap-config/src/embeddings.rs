//! Local embedding model settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EmbeddingsConfig {
    /// Overrides the model cache directory (defaults to `~/.coursemap/cache/fastembed/`).
    #[serde(default)]
    pub cache_dir: Option<String>,
}
