use clap::ValueEnum;
use cmap_core::enums::MatchMode;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    Json,
    /// Single-line JSON.
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
}

/// `--mode` values.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ModeArg {
    /// Accepted courses take the reference description.
    #[default]
    Matching,
    /// Accepted courses keep their own description; stricter partial matching.
    Verification,
}

impl From<ModeArg> for MatchMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Matching => Self::Matching,
            ModeArg::Verification => Self::Verification,
        }
    }
}

/// `--similarity` values for the hybrid ranking appended to `cmap match`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SimilarityArg {
    /// TF-IDF prefilter against the reference list, semantic judge on the top K.
    Dual,
    /// Local embeddings and vector search over the reference list.
    Vector,
}
