mod registry;

pub use registry::{ModelRegistry, ModelSpec, CAPABILITY_TEXT, CAPABILITY_VISION};

/// Default vision model used for frame analysis.
pub const DEFAULT_VISION_MODEL: &str = "qwen/qwen2.5-vl-32b-instruct:free";
/// Default text model used for code refinement.
pub const DEFAULT_REFINE_MODEL: &str = "openai/gpt-4o-mini";

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::{
        ModelRegistry, ModelSpec, CAPABILITY_TEXT, CAPABILITY_VISION, DEFAULT_REFINE_MODEL,
        DEFAULT_VISION_MODEL,
    };

    #[test]
    fn defaults_are_registered_with_expected_capabilities() {
        let registry = ModelRegistry::default();
        assert!(registry.is_known(DEFAULT_VISION_MODEL, CAPABILITY_VISION));
        assert!(registry.is_known(DEFAULT_REFINE_MODEL, CAPABILITY_TEXT));
        assert!(registry.is_known(" openai/gpt-4o ", CAPABILITY_VISION));
    }

    #[test]
    fn text_only_model_is_not_known_for_vision() {
        let registry = ModelRegistry::default();
        assert!(registry.is_known("deepseek/deepseek-chat", CAPABILITY_TEXT));
        assert!(!registry.is_known("deepseek/deepseek-chat", CAPABILITY_VISION));
        assert!(!registry.is_known("someone/unlisted-model", CAPABILITY_TEXT));
    }

    #[test]
    fn custom_registry_replaces_defaults() {
        let mut models = IndexMap::new();
        models.insert(
            "local/tiny".to_string(),
            ModelSpec {
                name: "local/tiny".to_string(),
                capabilities: vec![CAPABILITY_TEXT.to_string()],
            },
        );
        let registry = ModelRegistry::new(models);
        assert!(registry.is_known("local/tiny", CAPABILITY_TEXT));
        assert!(!registry.is_known(DEFAULT_VISION_MODEL, CAPABILITY_VISION));
        assert_eq!(
            registry.get("local/tiny").map(|model| model.name.as_str()),
            Some("local/tiny")
        );
    }
}
