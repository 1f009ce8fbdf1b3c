use anyhow::Context;
use cmap_config::CmapConfig;

/// Load and validate configuration (defaults, TOML files, `.env`, `CMAP_*` variables).
pub fn load_config() -> anyhow::Result<CmapConfig> {
    let config = CmapConfig::load_with_dotenv().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}
