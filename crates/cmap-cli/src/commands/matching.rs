use cmap_core::entities::{CurriculumCourse, ExtractedCourse, MatchReport};
use cmap_core::enums::MatchMode;
use cmap_embeddings::{EmbeddingEngine, LocalEmbedder, VectorIndex};
use cmap_match::{MatchOptions, Matcher, UncertainReview};
use cmap_similarity::{HybridMatch, SimilarityCache, SimilarityEngine};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::global::SimilarityArg;
use crate::cli::root_commands::{MatchArgs, MatchInputs};
use crate::context::AppContext;
use crate::input::{load_reference, load_transcript};
use crate::output::output;

/// Vector-index corpus holding the reference list of one run.
const REFERENCE_CORPUS: &str = "reference";

/// Inputs and the match report, shared with `cmap analyze`.
pub struct MatchRun {
    pub sources: Vec<ExtractedCourse>,
    pub references: Vec<CurriculumCourse>,
    pub report: MatchReport,
}

/// Options for a run: config values overridden by flags.
pub fn match_options(inputs: &MatchInputs, ctx: &AppContext) -> MatchOptions {
    let mut options = MatchOptions::from_config(&ctx.config.matching, MatchMode::from(inputs.mode));
    if let Some(threshold) = inputs.threshold {
        options.threshold = threshold;
    }
    options.grade_threshold.clone_from(&inputs.grade_threshold);
    options
}

/// Load both inputs, run the cascade, and optionally review uncertain rejections.
pub async fn run(inputs: &MatchInputs, ctx: &AppContext) -> anyhow::Result<MatchRun> {
    let options = match_options(inputs, ctx);
    if !(0.0..=1.0).contains(&options.threshold) {
        anyhow::bail!("--threshold must be within [0, 1], got {}", options.threshold);
    }
    let mode = options.mode;

    let sources = load_transcript(&inputs.transcript, ctx)?;
    let references = load_reference(&inputs.reference, ctx)?;
    tracing::info!(
        sources = sources.len(),
        references = references.len(),
        "loaded match inputs"
    );

    let mut report = Matcher::new(&ctx.grades, options).match_all(&sources, &references);
    if inputs.verify {
        let llm = ctx.require_llm("--verify")?;
        report = UncertainReview::new(llm, mode)
            .review(report, &references)
            .await;
    }

    Ok(MatchRun {
        sources,
        references,
        report,
    })
}

/// Rank with the hybrid engine; the LLM judges semantics when configured.
async fn hybrid(
    kind: SimilarityArg,
    run: &MatchRun,
    ctx: &AppContext,
) -> anyhow::Result<Vec<HybridMatch>> {
    let cache = SimilarityCache::new();
    let mut engine = SimilarityEngine::new(&cache, ctx.config.semantic.clone());
    if let Some(llm) = &ctx.llm {
        engine = engine.with_judge(llm);
    }

    let matches = match kind {
        SimilarityArg::Dual => engine.rank_dual_document(&run.sources, &run.references).await,
        SimilarityArg::Vector => {
            let embedder = LocalEmbedder::new(EmbeddingEngine::from_config(&ctx.config.embeddings)?);
            let index = VectorIndex::new();
            let items: Vec<(String, String)> = run
                .references
                .iter()
                .map(|c| (c.code.clone(), c.match_text().to_string()))
                .collect();
            index.index_texts(&embedder, REFERENCE_CORPUS, &items).await?;
            engine
                .with_vector_search(&embedder, &index)
                .rank_single_document(&run.sources, &run.references, REFERENCE_CORPUS)
                .await?
        }
    };
    tracing::info!(count = matches.len(), stats = ?cache.stats(), "hybrid ranking finished");
    Ok(matches)
}

/// Handle `cmap match`.
pub async fn handle(args: &MatchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let run = run(&args.inputs, ctx).await?;
    match args.similarity {
        Some(kind) => {
            let hybrid = hybrid(kind, &run, ctx).await?;
            output(
                &json!({
                    "report": run.report,
                    "hybrid": hybrid,
                }),
                flags.format,
            )
        }
        None => output(&run.report, flags.format),
    }
}
