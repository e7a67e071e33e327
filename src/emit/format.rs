//! Pretty-printing of generated CSS and JSON.

use serde::Serialize;

use crate::error::{Result, TokensError};

/// Indentation used for both CSS and JSON output.
const INDENT: &str = "    ";

/// Pretty-print a CSS rule block.
///
/// One declaration per line, one indent level per open brace, closing brace
/// on its own line. Empty blocks stay as `{}`. Output ends with a newline.
/// A `;` inside parentheses (`url(data:...;base64,...)`) is part of the value.
pub fn format_css(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + raw.len() / 4 + 16);
    let mut depth: usize = 0;
    let mut parens: usize = 0;
    let mut line_start = true;

    for ch in raw.chars() {
        match ch {
            '{' => {
                if line_start {
                    push_indent(&mut out, depth);
                } else {
                    trim_trailing_spaces(&mut out);
                    out.push(' ');
                }
                out.push_str("{\n");
                depth += 1;
                line_start = true;
            }
            '}' => {
                depth = depth.saturating_sub(1);
                if out.ends_with("{\n") {
                    out.pop();
                } else {
                    if !line_start {
                        trim_trailing_spaces(&mut out);
                        out.push('\n');
                    }
                    push_indent(&mut out, depth);
                }
                out.push_str("}\n");
                line_start = true;
            }
            ';' if parens == 0 => {
                if line_start {
                    push_indent(&mut out, depth);
                }
                out.push_str(";\n");
                line_start = true;
            }
            c if c.is_whitespace() => {
                if !line_start && !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            c => {
                match c {
                    '(' => parens += 1,
                    ')' => parens = parens.saturating_sub(1),
                    _ => {}
                }
                if line_start {
                    push_indent(&mut out, depth);
                    line_start = false;
                }
                out.push(c);
            }
        }
    }

    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    out.push('\n');
    out
}

/// Serialize a value as four-space indented JSON with a trailing newline.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);

    value
        .serialize(&mut serializer)
        .map_err(|e| TokensError::Build {
            message: format!("Failed to serialize JSON: {}", e),
            help: None,
        })?;

    let mut json = String::from_utf8(buf).map_err(|e| TokensError::Build {
        message: format!("Serialized JSON is not UTF-8: {}", e),
        help: None,
    })?;
    json.push('\n');
    Ok(json)
}

/// Remove every double quotation mark.
///
/// Token values written as JSON strings sometimes carry their own quotes
/// (`"\"Inter\""`); CSS output drops them all.
pub fn remove_quotation_marks(raw: &str) -> String {
    raw.replace('"', "")
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn trim_trailing_spaces(out: &mut String) {
    let trimmed = out.trim_end_matches([' ', '\t']).len();
    out.truncate(trimmed);
}
