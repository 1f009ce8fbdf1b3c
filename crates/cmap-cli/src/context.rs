use anyhow::Context;
use cmap_config::CmapConfig;
use cmap_grades::GradeModel;
use cmap_llm::LlmClient;

/// Shared state for one invocation.
pub struct AppContext {
    pub config: CmapConfig,
    pub grades: GradeModel,
    /// Present only when the `[llm]` section is configured.
    pub llm: Option<LlmClient>,
}

impl AppContext {
    pub fn init(config: CmapConfig) -> anyhow::Result<Self> {
        let grades = GradeModel::for_institution(&config.grading.institution);
        let llm = if config.llm.is_configured() {
            Some(LlmClient::new(config.llm.clone()).context("failed to build LLM client")?)
        } else {
            tracing::debug!("llm not configured; AI-backed options are unavailable");
            None
        };
        Ok(Self {
            config,
            grades,
            llm,
        })
    }

    /// The LLM client, or an error naming the flag that needed it.
    pub fn require_llm(&self, flag: &str) -> anyhow::Result<&LlmClient> {
        self.llm.as_ref().with_context(|| {
            format!("{flag} requires the [llm] section (set CMAP_LLM__ENDPOINT and CMAP_LLM__API_KEY)")
        })
    }
}
