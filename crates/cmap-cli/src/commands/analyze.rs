use cmap_match::{analyze_gaps, analyze_gaps_with_forecast};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AnalyzeArgs;
use crate::commands::matching;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cmap analyze`: match, then report uncovered requirements.
pub async fn handle(
    args: &AnalyzeArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let assessor = if args.forecast {
        Some(ctx.require_llm("--forecast")?)
    } else {
        None
    };

    let run = matching::run(&args.inputs, ctx).await?;
    let gaps = match assessor {
        Some(llm) => {
            analyze_gaps_with_forecast(
                &run.report.matched,
                &run.references,
                args.target_semester,
                &ctx.grades,
                llm,
            )
            .await
        }
        None => analyze_gaps(
            &run.report.matched,
            &run.references,
            args.target_semester,
            &ctx.grades,
        ),
    };
    let gpa = ctx
        .grades
        .mean_grade_point(run.report.matched.iter().map(|m| m.source.grade.as_str()));

    tracing::info!(
        gaps = gaps.gaps.len(),
        recommendations = gaps.recommendations.len(),
        future_challenges = gaps.future_challenges.len(),
        target_semester = args.target_semester,
        "gap analysis finished"
    );
    output(
        &json!({
            "stats": run.report.stats,
            "gpa": gpa,
            "matched": run.report.matched,
            "unmatched": run.report.unmatched,
            "gaps": gaps.gaps,
            "recommendations": gaps.recommendations,
            "future_challenges": gaps.future_challenges,
        }),
        flags.format,
    )
}
