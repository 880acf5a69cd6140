mod extract;

pub use extract::{extract_analysis, strip_code_fence, Extraction};

use serde::{Deserialize, Serialize};

/// Summary recorded when the frame provider had nothing to analyze.
pub const NO_FRAMES_SUMMARY: &str = "No frames found";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Component {
    pub fn new(kind: impl Into<String>, label: Option<&str>) -> Self {
        Self {
            kind: kind.into(),
            label: label.map(str::to_string),
        }
    }

    /// Label with surrounding whitespace removed; `None` when blank.
    pub fn label_text(&self) -> Option<&str> {
        self.label
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screen {
    pub id: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

/// Structured result recovered from one model reply.
///
/// Every field is always present: `screens` and `actions` fall back to empty
/// sequences and `raw_summary` keeps the reply text untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    #[serde(default)]
    pub screens: Vec<Screen>,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub raw_summary: String,
}

impl Analysis {
    pub fn empty(raw_summary: impl Into<String>) -> Self {
        Self {
            screens: Vec::new(),
            actions: Vec::new(),
            raw_summary: raw_summary.into(),
        }
    }

    pub fn no_frames() -> Self {
        Self::empty(NO_FRAMES_SUMMARY)
    }

    pub fn component_count(&self) -> usize {
        self.screens
            .iter()
            .map(|screen| screen.components.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifacts {
    pub analysis: Analysis,
    pub frontend_source: String,
    pub api_spec: String,
    pub backend_source: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Analysis, Artifacts, Component, Screen};

    #[test]
    fn analysis_serializes_with_camel_case_keys() -> anyhow::Result<()> {
        let analysis = Analysis {
            screens: vec![Screen {
                id: "1".to_string(),
                components: vec![Component::new("button", Some("Submit"))],
            }],
            actions: vec!["click".to_string()],
            raw_summary: "reply".to_string(),
        };
        let value = serde_json::to_value(&analysis)?;
        assert_eq!(value["rawSummary"], json!("reply"));
        assert_eq!(value["screens"][0]["components"][0]["type"], json!("button"));
        assert_eq!(value["screens"][0]["components"][0]["label"], json!("Submit"));
        Ok(())
    }

    #[test]
    fn unlabeled_component_omits_label_key() -> anyhow::Result<()> {
        let value = serde_json::to_value(Component::new("widget", None))?;
        assert_eq!(value, json!({"type": "widget"}));
        Ok(())
    }

    #[test]
    fn component_count_spans_screens() {
        let screen = |id: &str, kinds: &[&str]| Screen {
            id: id.to_string(),
            components: kinds.iter().map(|kind| Component::new(*kind, None)).collect(),
        };
        let analysis = Analysis {
            screens: vec![
                screen("1", &["button", "input"]),
                screen("2", &[]),
                screen("3", &["text"]),
            ],
            actions: Vec::new(),
            raw_summary: String::new(),
        };
        assert_eq!(analysis.component_count(), 3);
        assert_eq!(Analysis::no_frames().component_count(), 0);
    }

    #[test]
    fn blank_label_is_treated_as_missing() {
        assert_eq!(Component::new("text", Some("   ")).label_text(), None);
        assert_eq!(Component::new("text", Some(" Hi ")).label_text(), Some("Hi"));
    }

    #[test]
    fn artifacts_round_trip_keeps_all_fields() -> anyhow::Result<()> {
        let artifacts = Artifacts {
            analysis: Analysis::no_frames(),
            frontend_source: "a".to_string(),
            api_spec: "b".to_string(),
            backend_source: "c".to_string(),
        };
        let value = serde_json::to_value(&artifacts)?;
        assert_eq!(value["frontendSource"], json!("a"));
        assert_eq!(value["analysis"]["screens"], json!([]));
        let parsed: Artifacts = serde_json::from_value(value)?;
        assert_eq!(parsed, artifacts);
        Ok(())
    }
}
