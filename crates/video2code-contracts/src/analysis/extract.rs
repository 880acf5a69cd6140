use serde_json::{Map, Value};

use super::{Analysis, Component, Screen};

const FENCES: [&str; 2] = ["```", "~~~"];

/// Outcome of recovering an [`Analysis`] from model output.
///
/// Both variants carry a well-formed value; `Defaulted` means the reply held
/// no parseable object and the empty structure was substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Recovered(Analysis),
    Defaulted(Analysis),
}

impl Extraction {
    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered(_))
    }

    pub fn analysis(&self) -> &Analysis {
        match self {
            Self::Recovered(analysis) | Self::Defaulted(analysis) => analysis,
        }
    }

    pub fn into_analysis(self) -> Analysis {
        match self {
            Self::Recovered(analysis) | Self::Defaulted(analysis) => analysis,
        }
    }
}

/// Recover screens and actions from free-form model output.
///
/// Total over all inputs. The reply is kept verbatim as `raw_summary`.
pub fn extract_analysis(reply: &str) -> Extraction {
    match recover_fields(reply) {
        Some((screens, actions)) => Extraction::Recovered(Analysis {
            screens,
            actions,
            raw_summary: reply.to_string(),
        }),
        None => Extraction::Defaulted(Analysis::empty(reply)),
    }
}

/// Trim the text and, when it is wrapped in a fenced block, return the inner
/// body without the fence lines or language tag.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    for fence in FENCES {
        if trimmed.len() < fence.len() * 2
            || !trimmed.starts_with(fence)
            || !trimmed.ends_with(fence)
        {
            continue;
        }
        let inner = &trimmed[fence.len()..trimmed.len() - fence.len()];
        let body = match inner.split_once('\n') {
            Some((tag, rest)) if is_language_tag(tag) => rest,
            _ => inner,
        };
        return body.trim();
    }
    trimmed
}

fn is_language_tag(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '+' | '.'))
}

fn recover_fields(reply: &str) -> Option<(Vec<Screen>, Vec<String>)> {
    let body = strip_code_fence(reply);
    let start = body.find('{')?;
    let end = body.rfind('}')?;
    if start >= end {
        return None;
    }
    let parsed: Value = serde_json::from_str(&body[start..=end]).ok()?;
    let object = parsed.as_object()?;
    Some((screens_from(object), actions_from(object)))
}

fn screens_from(object: &Map<String, Value>) -> Vec<Screen> {
    let Some(rows) = object.get("screens").and_then(Value::as_array) else {
        return Vec::new();
    };
    rows.iter()
        .enumerate()
        .filter_map(|(position, row)| {
            let row = row.as_object()?;
            Some(Screen {
                id: screen_id(row.get("id"), position),
                components: components_from(row.get("components")),
            })
        })
        .collect()
}

fn screen_id(value: Option<&Value>, position: usize) -> String {
    match value {
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::String(text)) if !text.trim().is_empty() => text.trim().to_string(),
        _ => (position + 1).to_string(),
    }
}

fn components_from(value: Option<&Value>) -> Vec<Component> {
    let Some(rows) = value.and_then(Value::as_array) else {
        return Vec::new();
    };
    rows.iter()
        .filter_map(Value::as_object)
        .map(|row| Component {
            kind: row
                .get("type")
                .and_then(Value::as_str)
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            label: row.get("label").and_then(Value::as_str).map(str::to_string),
        })
        .collect()
}

fn actions_from(object: &Map<String, Value>) -> Vec<String> {
    object
        .get("actions")
        .and_then(Value::as_array)
        .map(|rows| {
            rows.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
