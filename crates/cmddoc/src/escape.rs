//! Dialect escaping and the small string helpers exposed to templates.

use regex::Regex;
use std::sync::LazyLock;

/// Two or more consecutive newlines: a paragraph break in prose input.
static RE_PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+\n").unwrap());

/// Paragraph-break directive for the target dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakMarker {
    /// `.PP` (man macros)
    Troff,
    /// `.Pp` (mdoc macros)
    Mdoc,
}

impl BreakMarker {
    pub fn as_str(self) -> &'static str {
        match self {
            BreakMarker::Troff => ".PP",
            BreakMarker::Mdoc => ".Pp",
        }
    }
}

/// Text that already starts with a roff request is passed through untouched.
fn is_raw_markup(text: &str) -> bool {
    text.len() > 1 && text.starts_with('.')
}

/// Escape the characters roff treats specially: `-`, `_`, `&`, `\` and `~`.
///
/// Every character is examined once, so a backslash produced by one
/// substitution is never escaped again.
pub fn escape_control_chars(text: &str) -> String {
    if is_raw_markup(text) {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        match c {
            '-' | '_' | '&' | '\\' | '~' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

/// Turn blank-line separated prose into roff paragraphs, then escape it.
///
/// A single newline continues the paragraph. Any run of two or more newlines
/// collapses into one break directive on its own line.
pub fn normalize_paragraphs(text: &str, marker: BreakMarker) -> String {
    if is_raw_markup(text) {
        return text.to_string();
    }
    let replacement = format!("\n{}\n", marker.as_str());
    let collapsed = RE_PARAGRAPH_BREAK.replace_all(text, regex::NoExpand(&replacement));
    escape_control_chars(&collapsed)
}

/// Prose to man(7) body text.
pub fn simple_to_troff(text: &str) -> String {
    normalize_paragraphs(text, BreakMarker::Troff)
}

/// Prose to mdoc(7) body text.
pub fn simple_to_mdoc(text: &str) -> String {
    normalize_paragraphs(text, BreakMarker::Mdoc)
}

pub fn dashify(text: &str) -> String {
    text.replace(' ', "-")
}

pub fn underscoreify(text: &str) -> String {
    text.replace(' ', "_")
}

pub fn trim_right_space(text: &str) -> String {
    text.trim_end().to_string()
}

/// Left-justify `text` in a field `width` characters wide.
pub fn rpad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

/// A line of `fill` as long as `text`, for setext headings and rules.
pub fn makeline(text: &str, fill: char) -> String {
    std::iter::repeat(fill).take(text.chars().count()).collect()
}
