//! `{name}` URL template parser/renderer.
//!
//! Templates are literal URL text with `{name}` placeholder spans. A
//! placeholder whose name is present in the substitution map is replaced
//! by the escaped value; an unmapped placeholder stays in the output as
//! its literal `{name}` text so an unexpected name never aborts a render.

use std::collections::HashMap;

/// Key/value substitution source for one render pass.
///
/// Only explicitly inserted keys resolve; there is no fallback key space.
#[derive(Debug, Default)]
pub struct SubstitutionMap {
    values: HashMap<&'static str, String>,
}

impl SubstitutionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, value: impl Into<String>) {
        self.values.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplateSegment {
    Text(String),
    Placeholder(String),
}

/// Renders `template` against `values`, escaping each substituted value
/// with `escape`. Literal template text is never escaped.
pub fn render<F>(template: &str, values: &SubstitutionMap, escape: F) -> String
where
    F: Fn(&str) -> String,
{
    let mut output = String::with_capacity(template.len());
    for segment in parse_template(template) {
        match segment {
            TemplateSegment::Text(text) => output.push_str(&text),
            TemplateSegment::Placeholder(name) => match values.get(&name) {
                Some(value) => output.push_str(&escape(value)),
                None => {
                    output.push('{');
                    output.push_str(&name);
                    output.push('}');
                }
            },
        }
    }
    output
}

fn parse_template(source: &str) -> Vec<TemplateSegment> {
    let mut segments = Vec::new();
    let mut text_buffer = String::new();
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            text_buffer.push(ch);
            continue;
        }
        match read_span(&mut chars) {
            Ok(content) if is_placeholder_name(&content) => {
                flush_text(&mut segments, &mut text_buffer);
                segments.push(TemplateSegment::Placeholder(content));
            }
            // Empty or non-identifier span: keep the braces as text.
            Ok(content) => {
                text_buffer.push('{');
                text_buffer.push_str(&content);
                text_buffer.push('}');
            }
            // Unterminated brace: the rest of the template is text.
            Err(rest) => {
                text_buffer.push('{');
                text_buffer.push_str(&rest);
            }
        }
    }
    flush_text(&mut segments, &mut text_buffer);
    segments
}

fn is_placeholder_name(content: &str) -> bool {
    !content.is_empty()
        && content
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn flush_text(segments: &mut Vec<TemplateSegment>, text_buffer: &mut String) {
    if text_buffer.is_empty() {
        return;
    }
    segments.push(TemplateSegment::Text(std::mem::take(text_buffer)));
}

fn read_span(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<String, String> {
    let mut collected = String::new();
    for ch in chars.by_ref() {
        if ch == '}' {
            return Ok(collected);
        }
        collected.push(ch);
    }
    Err(collected)
}
