use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::global::{ModeArg, SimilarityArg};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Extract graded courses from transcript text.
    Extract(ExtractArgs),
    /// Extract reference courses from curriculum text.
    Curriculum(CurriculumArgs),
    /// Match transcript courses against reference courses.
    Match(MatchArgs),
    /// Match, then list missing requirements and recommendations.
    Analyze(AnalyzeArgs),
}

/// Arguments for `cmap extract`.
#[derive(Clone, Debug, Args)]
pub struct ExtractArgs {
    /// OCR text file of the transcript.
    pub file: PathBuf,
    /// Minimum accepted grade (defaults to `grading.threshold`).
    #[arg(short = 't', long)]
    pub grade_threshold: Option<String>,
    /// Grade table to use (defaults to `grading.institution`).
    #[arg(short, long)]
    pub institution: Option<String>,
    /// Run AI-assisted extraction on text the patterns could not read.
    #[arg(long)]
    pub ai: bool,
    /// Replace templated descriptions with AI-written ones.
    #[arg(long)]
    pub describe: bool,
}

/// Arguments for `cmap curriculum`.
#[derive(Clone, Debug, Args)]
pub struct CurriculumArgs {
    /// OCR text file of the curriculum document.
    pub file: PathBuf,
    /// Keep required courses only.
    #[arg(long)]
    pub required_only: bool,
    /// Keep courses scheduled up to this semester.
    #[arg(long)]
    pub max_semester: Option<u32>,
}

/// Inputs shared by `cmap match` and `cmap analyze`.
#[derive(Clone, Debug, Args)]
pub struct MatchInputs {
    /// Transcript: OCR text, or a JSON array of extracted courses.
    #[arg(long)]
    pub transcript: PathBuf,
    /// Reference courses: curriculum text, or a JSON array of curriculum courses.
    #[arg(long)]
    pub reference: PathBuf,
    /// Lexical similarity threshold (defaults to `matching.threshold`).
    #[arg(long)]
    pub threshold: Option<f64>,
    /// Minimum accepted grade when matching.
    #[arg(long)]
    pub grade_threshold: Option<String>,
    #[arg(long, value_enum, default_value_t = ModeArg::Matching)]
    pub mode: ModeArg,
    /// Ask the LLM verifier about low-similarity rejections.
    #[arg(long)]
    pub verify: bool,
}

/// Arguments for `cmap match`.
#[derive(Clone, Debug, Args)]
pub struct MatchArgs {
    #[command(flatten)]
    pub inputs: MatchInputs,
    /// Also rank every course with the hybrid similarity engine.
    #[arg(long, value_enum)]
    pub similarity: Option<SimilarityArg>,
}

/// Arguments for `cmap analyze`.
#[derive(Clone, Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub inputs: MatchInputs,
    /// Semester the student is about to enter; requirements up to it are in scope.
    #[arg(long)]
    pub target_semester: u32,
    /// Ask the LLM how hard each course after the target semester will be.
    #[arg(long)]
    pub forecast: bool,
}
