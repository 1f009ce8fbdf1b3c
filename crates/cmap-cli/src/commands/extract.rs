use anyhow::Context;
use cmap_extract::Extractor;
use cmap_extract::describe::generate_descriptions;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExtractArgs;
use crate::context::AppContext;
use crate::input::read_text;
use crate::output::output;

/// Handle `cmap extract`.
pub async fn handle(args: &ExtractArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = read_text(&args.file)?;
    let grading = &ctx.config.grading;
    let threshold = args.grade_threshold.as_deref().unwrap_or(&grading.threshold);
    let institution = args.institution.as_deref().unwrap_or(&grading.institution);

    let ai = if args.ai {
        Some(ctx.require_llm("--ai")?)
    } else if ctx.config.extraction.ai_enabled {
        if ctx.llm.is_none() {
            tracing::warn!("extraction.ai_enabled is set but the llm section is not configured");
        }
        ctx.llm.as_ref()
    } else {
        None
    };

    let extractor = Extractor::new(ctx.config.extraction.clone());
    let mut courses = match ai {
        Some(llm) => {
            extractor
                .extract_courses_with_ai(&text, threshold, institution, llm)
                .await
        }
        None => extractor.extract_courses(&text, threshold, institution),
    }
    .with_context(|| format!("failed to extract courses from {}", args.file.display()))?;

    if args.describe {
        let llm = ctx.require_llm("--describe")?;
        generate_descriptions(llm, &mut courses).await;
    }

    tracing::info!(count = courses.len(), threshold, institution, "extracted courses");
    output(&courses, flags.format)
}
