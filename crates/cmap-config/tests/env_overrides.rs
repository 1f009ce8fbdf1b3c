use figment::Jail;
use cmap_config::{CmapConfig, ConfigError};

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("CMAP_LLM__ENDPOINT", "https://env.openai.azure.com");
        jail.set_env("CMAP_LLM__API_KEY", "env-key");
        jail.set_env("CMAP_GRADING__THRESHOLD", "B");

        let config = CmapConfig::load().expect("config loads");
        assert!(config.llm.is_configured());
        assert_eq!(config.grading.threshold, "B");
        assert!(config.require_llm().is_ok());
        Ok(())
    });
}

#[test]
fn invalid_env_value_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("CMAP_MATCHING__THRESHOLD", "1.5");

        let config = CmapConfig::load().expect("config loads");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("matching.threshold"));
        Ok(())
    });
}
