use serde::{Deserialize, Serialize};

/// Request to rewrite one generated artifact according to a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RefineRequest {
    #[serde(default)]
    pub artifact: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineResponse {
    pub updated_code: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{RefineRequest, RefineResponse};

    #[test]
    fn request_fields_default_when_missing() -> anyhow::Result<()> {
        let request: RefineRequest = serde_json::from_value(json!({"prompt": "dark mode"}))?;
        assert_eq!(request.prompt, "dark mode");
        assert!(request.code.is_empty());
        assert!(request.artifact.is_empty());
        Ok(())
    }

    #[test]
    fn response_uses_updated_code_key() -> anyhow::Result<()> {
        let value = serde_json::to_value(RefineResponse {
            updated_code: "x".to_string(),
        })?;
        assert_eq!(value, json!({"updatedCode": "x"}));
        Ok(())
    }
}
