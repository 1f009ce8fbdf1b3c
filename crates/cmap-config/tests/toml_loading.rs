//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use cmap_config::CmapConfig;

#[test]
fn loads_matching_and_grading_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[grading]
institution = "plaksha"
threshold = "B-"

[matching]
threshold = 0.45
verification_partial_factor = 0.9
"#,
        )?;

        let config: CmapConfig = Figment::from(Serialized::defaults(CmapConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.grading.institution, "plaksha");
        assert_eq!(config.grading.threshold, "B-");
        assert!((config.matching.threshold - 0.45).abs() < f64::EPSILON);
        assert!((config.matching.verification_partial_factor - 0.9).abs() < f64::EPSILON);
        // untouched field keeps its default
        assert!((config.matching.matching_partial_factor - 0.7).abs() < f64::EPSILON);
        Ok(())
    });
}

#[test]
fn loads_llm_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[llm]
endpoint = "https://example.openai.azure.com"
api_key = "toml-key"
chat_deployment = "gpt-4o-mini"
"#,
        )?;

        let config: CmapConfig = Figment::from(Serialized::defaults(CmapConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.llm.is_configured());
        assert_eq!(config.llm.chat_deployment, "gpt-4o-mini");
        assert_eq!(config.llm.embedding_deployment, "text-embedding-3-large");
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[semantic]
batch_size = 4
top_k = 3
"#,
        )?;
        jail.set_env("CMAP_SEMANTIC__BATCH_SIZE", "20");

        let config: CmapConfig = Figment::from(Serialized::defaults(CmapConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("CMAP_").split("__"))
            .extract()?;

        assert_eq!(config.semantic.batch_size, 20);
        assert_eq!(config.semantic.top_k, 3);
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_figment() {
    Jail::expect_with(|jail| {
        jail.create_dir(".coursemap")?;
        jail.create_file(
            ".coursemap/config.toml",
            r#"
[extraction]
expected_course_count = 30
ai_enabled = true
"#,
        )?;

        let config: CmapConfig = CmapConfig::figment().extract()?;
        assert_eq!(config.extraction.expected_course_count, 30);
        assert!(config.extraction.ai_enabled);
        Ok(())
    });
}

#[test]
fn wrong_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[semantic]
batch_size = "ten"
"#,
        )?;

        let result: Result<CmapConfig, _> =
            Figment::from(Serialized::defaults(CmapConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();
        assert!(result.is_err());
        Ok(())
    });
}
