use indexmap::IndexMap;

pub const CAPABILITY_VISION: &str = "vision";
pub const CAPABILITY_TEXT: &str = "text";

/// OpenRouter slug and the input kinds it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSpec {
    pub name: String,
    pub capabilities: Vec<String>,
}

impl ModelSpec {
    pub fn supports(&self, capability: &str) -> bool {
        self.capabilities.iter().any(|item| item == capability)
    }
}

/// Models this service has been exercised against. Configuration may still
/// name any slug; an unlisted one is only reported, never rejected.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    models: IndexMap<String, ModelSpec>,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new(default_models())
    }
}

impl ModelRegistry {
    pub fn new(models: IndexMap<String, ModelSpec>) -> Self {
        Self { models }
    }

    pub fn get(&self, name: &str) -> Option<&ModelSpec> {
        self.models.get(name.trim())
    }

    pub fn is_known(&self, name: &str, capability: &str) -> bool {
        self.get(name)
            .map(|model| model.supports(capability))
            .unwrap_or(false)
    }
}

fn default_models() -> IndexMap<String, ModelSpec> {
    const VISION_TEXT: &[&str] = &[CAPABILITY_VISION, CAPABILITY_TEXT];
    let entries: [(&str, &[&str]); 8] = [
        ("qwen/qwen2.5-vl-32b-instruct:free", VISION_TEXT),
        ("qwen/qwen2.5-vl-72b-instruct", VISION_TEXT),
        ("meta-llama/llama-3.2-11b-vision-instruct", VISION_TEXT),
        ("google/gemini-2.0-flash-001", VISION_TEXT),
        ("openai/gpt-4o-mini", VISION_TEXT),
        ("openai/gpt-4o", VISION_TEXT),
        ("anthropic/claude-3.5-sonnet", VISION_TEXT),
        ("deepseek/deepseek-chat", &[CAPABILITY_TEXT]),
    ];

    entries
        .into_iter()
        .map(|(name, capabilities)| {
            (
                name.to_string(),
                ModelSpec {
                    name: name.to_string(),
                    capabilities: capabilities.iter().map(|item| item.to_string()).collect(),
                },
            )
        })
        .collect()
}
