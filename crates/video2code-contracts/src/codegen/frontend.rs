use crate::analysis::{Analysis, Component, Screen};

const INDENT: &str = "      ";

/// React component source showing the raw summary and one section per screen.
pub fn render_frontend(analysis: &Analysis) -> String {
    let mut out = String::new();
    out.push_str("import React from 'react'\n\n");
    out.push_str(&format!(
        "const SUMMARY = `{}`\n\n",
        escape_template_literal(&analysis.raw_summary)
    ));
    out.push_str("export default function GeneratedScreen() {\n");
    out.push_str("  return (\n");
    out.push_str("    <div style={{ padding: 16 }}>\n");
    out.push_str(&format!("{INDENT}<h2>Generated UI</h2>\n"));
    out.push_str(&format!("{INDENT}<p>LLM summary:</p>\n"));
    out.push_str(&format!("{INDENT}<pre>{{SUMMARY}}</pre>\n"));

    if analysis.screens.is_empty() {
        out.push_str(&format!("{INDENT}<p>No screens detected</p>\n"));
    }
    for screen in &analysis.screens {
        render_screen(&mut out, screen);
    }

    if !analysis.actions.is_empty() {
        out.push_str(&format!("{INDENT}<ul className=\"actions\">\n"));
        for action in &analysis.actions {
            out.push_str(&format!("{INDENT}  <li>{}</li>\n", escape_jsx_text(action)));
        }
        out.push_str(&format!("{INDENT}</ul>\n"));
    }

    out.push_str("    </div>\n");
    out.push_str("  )\n");
    out.push_str("}\n");
    out
}

fn render_screen(out: &mut String, screen: &Screen) {
    out.push_str(&format!(
        "{INDENT}<section data-screen=\"{}\">\n",
        escape_jsx_attr(&screen.id)
    ));
    out.push_str(&format!(
        "{INDENT}  <h3>Screen {}</h3>\n",
        escape_jsx_text(&screen.id)
    ));
    if screen.components.is_empty() {
        out.push_str(&format!("{INDENT}  <p>No components detected</p>\n"));
    }
    for component in &screen.components {
        out.push_str(&format!("{INDENT}  {}\n", render_component(component)));
    }
    out.push_str(&format!("{INDENT}</section>\n"));
}

fn render_component(component: &Component) -> String {
    let label = component.label_text();
    match component.kind.trim().to_ascii_lowercase().as_str() {
        "button" => format!(
            "<button>{}</button>",
            escape_jsx_text(label.unwrap_or("Button"))
        ),
        "input" => format!(
            "<input placeholder=\"{}\" />",
            escape_jsx_attr(label.unwrap_or("Input"))
        ),
        "text" => format!("<p>{}</p>", escape_jsx_text(label.unwrap_or_default())),
        "label" => format!(
            "<label>{}</label>",
            escape_jsx_text(label.unwrap_or_default())
        ),
        _ => {
            let kind = component.kind.trim();
            let shown = label
                .or_else(|| (!kind.is_empty()).then_some(kind))
                .unwrap_or("Component");
            format!(
                "<div className=\"component\">{}</div>",
                escape_jsx_text(shown)
            )
        }
    }
}

fn escape_template_literal(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

fn escape_jsx_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_jsx_attr(raw: &str) -> String {
    escape_jsx_text(raw).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::render_frontend;
    use crate::analysis::{Analysis, Component, Screen};

    fn single_screen(components: Vec<Component>) -> Analysis {
        Analysis {
            screens: vec![Screen {
                id: "1".to_string(),
                components,
            }],
            actions: Vec::new(),
            raw_summary: String::new(),
        }
    }

    #[test]
    fn renders_labeled_button() {
        let source = render_frontend(&single_screen(vec![Component::new(
            "button",
            Some("Submit"),
        )]));
        assert!(source.contains("<button>Submit</button>"));
        assert!(source.contains("<section data-screen=\"1\">"));
        assert!(source.contains("<h3>Screen 1</h3>"));
    }

    #[test]
    fn unknown_type_without_label_shows_type() {
        let source = render_frontend(&single_screen(vec![Component::new("widget", None)]));
        assert!(source.contains("<div className=\"component\">widget</div>"));
    }

    #[test]
    fn applies_defaults_per_type() {
        let source = render_frontend(&single_screen(vec![
            Component::new("BUTTON", None),
            Component::new("Input", None),
            Component::new("input", Some("Email")),
            Component::new("text", None),
            Component::new("text", Some("Welcome")),
            Component::new("label", Some("Name")),
            Component::new("", None),
            Component::new("slider", Some("Volume")),
        ]));
        assert!(source.contains("<button>Button</button>"));
        assert!(source.contains("<input placeholder=\"Input\" />"));
        assert!(source.contains("<input placeholder=\"Email\" />"));
        assert!(source.contains("<p></p>"));
        assert!(source.contains("<p>Welcome</p>"));
        assert!(source.contains("<label>Name</label>"));
        assert!(source.contains("<div className=\"component\">Component</div>"));
        assert!(source.contains("<div className=\"component\">Volume</div>"));
    }

    #[test]
    fn empty_screen_renders_fallback_notice() {
        let source = render_frontend(&single_screen(Vec::new()));
        assert!(source.contains("<p>No components detected</p>"));
    }

    #[test]
    fn no_screens_renders_notice() {
        let source = render_frontend(&Analysis::no_frames());
        assert!(source.contains("<p>No screens detected</p>"));
        assert!(source.contains("const SUMMARY = `No frames found`"));
    }

    #[test]
    fn summary_delimiters_are_escaped() {
        let source = render_frontend(&Analysis::empty("use `code` and ${x} or \\n"));
        assert!(source.contains("const SUMMARY = `use \\`code\\` and \\${x} or \\\\n`"));
    }

    #[test]
    fn labels_cannot_inject_markup() {
        let source = render_frontend(&single_screen(vec![
            Component::new("button", Some("<b>{x}</b> & co")),
            Component::new("input", Some("say \"hi\"")),
        ]));
        assert!(source.contains("<button>&lt;b&gt;&#123;x&#125;&lt;/b&gt; &amp; co</button>"));
        assert!(source.contains("<input placeholder=\"say &quot;hi&quot;\" />"));
    }

    #[test]
    fn actions_are_listed() {
        let mut analysis = single_screen(Vec::new());
        analysis.actions = vec!["click".to_string(), "scroll".to_string()];
        let source = render_frontend(&analysis);
        assert!(source.contains("<li>click</li>"));
        assert!(source.contains("<li>scroll</li>"));
    }
}
