//! JSON5 reading for hand-edited workflow templates
//!
//! Templates may use comments, trailing commas, unquoted keys, and
//! triple-quoted multi-line strings, which keeps Code node sources readable:
//!
//! ```json5
//! {
//!   // runs after the webhook
//!   jsCode: """const items = $input.all();
//! return items;""",
//! }
//! ```

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// Read and parse a JSON5 file
pub fn read_json5_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    from_json5_str(&content).map_err(|e| Error::parse(path, e))
}

/// Parse a JSON5 string, accepting triple-quoted strings
pub fn from_json5_str(s: &str) -> std::result::Result<Value, String> {
    json5::from_str(&expand_triple_quotes(s)).map_err(|e| e.to_string())
}

/// Rewrite `"""..."""` literals as ordinary escaped JSON strings.
///
/// Quotes directly before the closing delimiter belong to the content,
/// so `"""say "hi""""` holds `say "hi"`.
fn expand_triple_quotes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(r#"""""#) {
        out.push_str(&rest[..start]);
        let body = &rest[start + 3..];

        let Some(end) = body.find(r#"""""#) else {
            // Unterminated, leave it for the parser to report
            out.push_str(&rest[start..]);
            return out;
        };

        // Extend the match over any extra quotes so the last three close it
        let quote_run = body[end..].chars().take_while(|&c| c == '"').count();
        let content = &body[..end + quote_run - 3];

        out.push_str(&escape(content));
        rest = &body[end + quote_run..];
    }

    out.push_str(rest);
    out
}

fn escape(content: &str) -> String {
    // serde_json produces a quoted, escaped literal that JSON5 accepts as-is
    Value::String(content.to_string()).to_string()
}
