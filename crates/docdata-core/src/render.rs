use crate::model::{ItemSchema, Property, ResponseSchema, SchemaType};

/// Column budget for word-wrapped description comments.
const COMMENT_WIDTH: usize = 33;

/// Render a resource's property list as an indented, commented example
/// literal.
pub fn render_resource(properties: &[Property]) -> String {
    render_block(properties, "")
}

/// Render a resolved response/model schema as an example literal.
pub fn render_example(schema: &ResponseSchema) -> String {
    render_schema(schema, "")
}

fn render_schema(schema: &ResponseSchema, offset: &str) -> String {
    match &schema.kind {
        SchemaType::Array => match schema.items.as_deref() {
            Some(items) => match &items.kind {
                SchemaType::Inline(def) => {
                    let deeper = format!("{offset}  ");
                    format!(
                        "{offset}[\n{deeper}{}\n{offset}]",
                        render_block(&def.properties, &deeper)
                    )
                }
                other => format!("{offset}{}[]", item_label(items, other)),
            },
            None => format!("{offset}array"),
        },
        SchemaType::Inline(def) => format!("{offset}{}", render_block(&def.properties, offset)),
        other => format!("{offset}{}", other.label()),
    }
}

/// A brace-delimited property block. The opening brace carries no leading
/// offset so the block can sit directly after a `"name": ` prefix; nested
/// lines are indented two spaces past `offset`.
fn render_block(properties: &[Property], offset: &str) -> String {
    let inner = format!("{offset}  ");
    let mut out = String::from("{");
    for property in properties {
        if let Some(description) = &property.description {
            for line in wrap_comment(description) {
                out.push('\n');
                out.push_str(&inner);
                out.push_str("// ");
                out.push_str(&line);
            }
        }
        out.push('\n');
        out.push_str(&inner);
        out.push('"');
        out.push_str(&property.name);
        out.push_str("\": ");
        out.push_str(&render_value(property, offset));
    }
    out.push('\n');
    out.push_str(offset);
    out.push('}');
    out
}

fn render_value(property: &Property, offset: &str) -> String {
    match (&property.kind, property.items.as_deref()) {
        (SchemaType::Array, Some(items)) => match &items.kind {
            SchemaType::Inline(def) => {
                let deeper = format!("{offset}    ");
                format!(
                    "[\n{deeper}{}\n{offset}  ]",
                    render_block(&def.properties, &deeper)
                )
            }
            other => format!("{}[]", item_label(items, other)),
        },
        (SchemaType::Array, None) => "array".to_string(),
        (SchemaType::Inline(def), _) => render_block(&def.properties, &format!("{offset}  ")),
        (kind, _) => property
            .format
            .clone()
            .unwrap_or_else(|| kind.label().to_string()),
    }
}

fn item_label<'a>(items: &'a ItemSchema, kind: &'a SchemaType) -> &'a str {
    items.format.as_deref().unwrap_or_else(|| kind.label())
}

/// Greedily pack words into comment lines: a word joins the current line
/// only while the line stays within the column budget.
fn wrap_comment(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for word in text.split_whitespace() {
        match lines.last_mut() {
            Some(last) if last.len() + word.len() + 1 <= COMMENT_WIDTH => {
                last.push(' ');
                last.push_str(word);
            }
            _ => lines.push(word.to_string()),
        }
    }
    lines
}
