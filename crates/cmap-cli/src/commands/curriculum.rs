use anyhow::Context;
use cmap_core::collaborators::CurriculumFilter;
use cmap_extract::Extractor;
use cmap_match::{InMemoryCatalog, load_references};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CurriculumArgs;
use crate::context::AppContext;
use crate::input::read_text;
use crate::output::output;

/// Handle `cmap curriculum`.
pub async fn handle(
    args: &CurriculumArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let text = read_text(&args.file)?;
    let courses = Extractor::new(ctx.config.extraction.clone())
        .extract_curriculum(&text)
        .with_context(|| format!("failed to extract curriculum from {}", args.file.display()))?;

    let catalog = InMemoryCatalog::new(courses);
    let filter = CurriculumFilter {
        required_only: args.required_only,
        max_semester: args.max_semester,
    };
    let courses = load_references(&catalog, filter).await?;
    output(&courses, flags.format)
}
