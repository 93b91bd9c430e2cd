//! Markdown page for a single component.

use super::{escape_cell, name_list};
use crate::model::{ComponentDoc, DesignToken, FieldSpec, PropertySection, TreeNode};
use serde_json::Value;

/// Render the documentation page of one component.
///
/// Sections, in order: title, group and description, variants, one property
/// table per section, structure, styles, design tokens, dependencies.
/// Empty sections are left out, except dependencies.
pub fn render_component(doc: &ComponentDoc) -> String {
    let mut md = String::with_capacity(4096);

    // Title
    md.push_str("# ");
    md.push_str(&doc.name);
    md.push_str("\n\n");

    if let Some(group) = &doc.group {
        md.push_str(&format!("**Group:** {}\n\n", group));
    }

    if let Some(description) = &doc.description {
        md.push_str(description);
        md.push_str("\n\n");
    }

    if !doc.variants.is_empty() {
        md.push_str("## Variants\n\n");
        md.push_str("| Property | Options |\n");
        md.push_str("|----------|---------|\n");
        for variant in &doc.variants {
            let options: Vec<&str> = variant.options.iter().map(|o| o.name.as_str()).collect();
            md.push_str(&format!(
                "| {} | {} |\n",
                escape_cell(&variant.property_name),
                escape_cell(&options.join(", "))
            ));
        }
        md.push('\n');
    }

    if !doc.sections.is_empty() {
        md.push_str("## Properties\n\n");
        for section in &doc.sections {
            md.push_str(&render_section(section));
        }
    }

    if let Some(tree) = &doc.tree {
        md.push_str("## Structure\n\n");
        md.push_str("```text\n");
        md.push_str(&tree.label);
        md.push('\n');
        render_children(&tree.children, "", &mut md);
        md.push_str("```\n\n");
    }

    if !doc.css.is_empty() {
        md.push_str("## Styles\n\n");
        md.push_str("```css\n");
        md.push_str(&doc.css);
        md.push_str("\n```\n\n");
        if !doc.css_unresolved.is_empty() {
            let ids: Vec<String> =
                doc.css_unresolved.iter().map(|id| format!("`{}`", id)).collect();
            md.push_str(&format!("**Unresolved variables:** {}\n\n", ids.join(", ")));
        }
    }

    if !doc.tokens.is_empty() {
        md.push_str(&render_tokens(&doc.tokens));
    }

    md.push_str("## Dependencies\n\n");
    md.push_str(&format!("- **Contains:** {}\n", name_list(&doc.contains)));
    md.push_str(&format!("- **Used by:** {}\n", name_list(&doc.used_by)));

    md
}

fn render_section(section: &PropertySection) -> String {
    let mut md = String::with_capacity(256);
    md.push_str("### ");
    md.push_str(&section.title);
    md.push_str("\n\n");
    md.push_str("| Field | Label | Kind | Default | Notes |\n");
    md.push_str("|-------|-------|------|---------|-------|\n");
    for field in &section.fields {
        md.push_str(&format!(
            "| `{}` | {} | {} | {} | {} |\n",
            field.id,
            escape_cell(&field.label),
            field.kind.as_str(),
            escape_cell(&default_cell(&field.default_value)),
            escape_cell(&notes_cell(field)),
        ));
    }
    md.push('\n');
    md
}

fn default_cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) if s.trim().is_empty() => "-".to_string(),
        Value::String(s) => s.clone(),
        _ => value.to_string(),
    }
}

fn notes_cell(field: &FieldSpec) -> String {
    let mut notes = Vec::new();
    if let Some(help) = &field.help_text {
        notes.push(help.clone());
    }
    if !field.options.is_empty() {
        let labels: Vec<&str> = field.options.iter().map(|o| o.label.as_str()).collect();
        notes.push(format!("Options: {}", labels.join(", ")));
    }
    if field.bindable {
        notes.push("Bindable".to_string());
    }
    if notes.is_empty() {
        "-".to_string()
    } else {
        notes.join("\n")
    }
}

fn render_children(children: &[TreeNode], prefix: &str, md: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        md.push_str(prefix);
        md.push_str(if last { "└── " } else { "├── " });
        md.push_str(&child.label);
        md.push('\n');

        let nested = format!("{}{}", prefix, if last { "    " } else { "│   " });
        render_children(&child.children, &nested, md);
    }
}

fn render_tokens(tokens: &[DesignToken]) -> String {
    let mut modes: Vec<&str> = tokens
        .iter()
        .flat_map(|t| t.modes.keys().map(String::as_str))
        .collect();
    modes.sort_unstable();
    modes.dedup();

    let mut md = String::with_capacity(512);
    md.push_str("## Design Tokens\n\n");

    md.push_str("| Token | Type | Default |");
    for mode in &modes {
        md.push_str(&format!(" {} |", escape_cell(mode)));
    }
    md.push('\n');
    md.push_str("|-------|------|---------|");
    for _ in &modes {
        md.push_str("------|");
    }
    md.push('\n');

    for token in tokens {
        md.push_str(&format!(
            "| `{}` | {} | {} |",
            token.css_name,
            escape_cell(&token.kind),
            escape_cell(&token.value)
        ));
        for mode in &modes {
            let value = token.modes.get(*mode).map(String::as_str).unwrap_or("-");
            md.push_str(&format!(" {} |", escape_cell(value)));
        }
        md.push('\n');
    }
    md.push('\n');

    let unresolved: Vec<&str> = tokens
        .iter()
        .flat_map(|t| t.unresolved.iter().map(String::as_str))
        .collect();
    if !unresolved.is_empty() {
        md.push_str(&format!("Unresolved references: {}\n\n", unresolved.join(", ")));
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate_from_json, GenerateOptions};

    fn doc(source: &str) -> ComponentDoc {
        let mut output = generate_from_json(source, &GenerateOptions::default()).unwrap();
        output.docs.remove(0)
    }

    #[test]
    fn test_minimal_page() {
        let page = render_component(&doc(
            r#"{ "breakpoints": {}, "components": [
                { "id": "c1", "name": "Spacer", "render": null, "properties": [] }
            ] }"#,
        ));
        insta::assert_snapshot!(page, @r"
        # Spacer

        ## Dependencies

        - **Contains:** None
        - **Used by:** None
        ");
    }

    #[test]
    fn test_unresolved_variables_listed_under_styles() {
        let page = render_component(&doc(
            r#"{ "breakpoints": {}, "components": [
                { "id": "c1", "name": "Chip", "render": null, "properties": [],
                  "classes": { "chip": { "css": "color: @var_gone; fill: @var_lost" } } }
            ] }"#,
        ));

        let styles = page.find("## Styles").unwrap();
        let unresolved = page.find("**Unresolved variables:** `gone`, `lost`\n").unwrap();
        let deps = page.find("## Dependencies").unwrap();
        assert!(styles < unresolved && unresolved < deps);
    }

    #[test]
    fn test_structure_and_tables() {
        let page = render_component(&doc(
            r##"{ "breakpoints": {}, "components": [
                {
                  "id": "c1", "name": "Card", "group": "Layout",
                  "description": "Groups content.",
                  "properties": [
                    { "id": "p1", "label": "Title", "type": "text", "default": "A | B" },
                    { "id": "p2", "label": "Tone", "type": "style-variant" }
                  ],
                  "variants": { "p2": [{ "id": "v1", "name": "Warm" }] },
                  "render": { "tag": "div", "classes": ["card"], "children": [
                    { "tag": "h3", "children": [{ "bind": "p1" }] },
                    { "tag": "p" }
                  ] },
                  "variables": {
                    "x": { "name": "Card/Bg", "type": "color",
                           "value": { "type": "color", "value": "#fff" },
                           "modes": { "WarmMode": { "type": "color", "value": "#fed" } } }
                  }
                }
            ] }"##,
        ));

        assert!(page.starts_with("# Card\n\n**Group:** Layout\n\nGroups content.\n\n## Variants\n"));
        assert!(page.contains("| Tone | Warm |\n"));
        assert!(page.contains("| `title` | Title | text | A \\| B | - |\n"));
        assert!(page.contains("| `tone` | Tone | style | base | Options: Warm |\n"));
        assert!(page.contains(
            "```text\n<div.card>\n├── <h3>\n│   └── binds: Title\n└── <p>\n```\n"
        ));
        assert!(page.contains("| Token | Type | Default | Warm |\n"));
        assert!(page.contains("| `--Card-Bg` | color | #fff | #fed |\n"));

        let variants = page.find("## Variants").unwrap();
        let properties = page.find("## Properties").unwrap();
        let structure = page.find("## Structure").unwrap();
        let tokens = page.find("## Design Tokens").unwrap();
        let deps = page.find("## Dependencies").unwrap();
        assert!(variants < properties && properties < structure && structure < tokens && tokens < deps);
    }
}
