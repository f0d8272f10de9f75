//! Structural diff of two JSON trees
//!
//! The walk visits object keys in alphabetical order and array elements by
//! index, so the emitted differences depend only on the two values and not
//! on key order in the source files.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// How a value differs between the built and pulled side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffKind {
    /// Present on both sides with different values or types
    Changed,
    /// Present only in the pulled document
    Added,
    /// Present only in the built document
    Removed,
    /// Arrays of different lengths; the values are the two lengths
    Length,
}

impl DiffKind {
    /// The kind seen from the other side
    pub fn swapped(self) -> Self {
        match self {
            Self::Added => Self::Removed,
            Self::Removed => Self::Added,
            other => other,
        }
    }
}

impl std::fmt::Display for DiffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Changed => write!(f, "changed"),
            Self::Added => write!(f, "added"),
            Self::Removed => write!(f, "removed"),
            Self::Length => write!(f, "length"),
        }
    }
}

/// One differing location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Difference {
    pub path: String,
    pub kind: DiffKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub built: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pulled: Option<Value>,
}

impl Difference {
    /// The same difference seen with the sides exchanged
    pub fn swapped(self) -> Self {
        Self {
            path: self.path,
            kind: self.kind.swapped(),
            built: self.pulled,
            pulled: self.built,
        }
    }
}

/// Compute every difference between `built` and `pulled`
pub fn diff(built: &Value, pulled: &Value) -> Vec<Difference> {
    let mut out = Vec::new();
    diff_at(&mut String::new(), built, pulled, &mut out);
    out
}

fn diff_at(path: &mut String, built: &Value, pulled: &Value, out: &mut Vec<Difference>) {
    match (built, pulled) {
        (Value::Object(b), Value::Object(p)) => diff_objects(path, b, p, out),
        (Value::Array(b), Value::Array(p)) => diff_arrays(path, b, p, out),
        _ if built == pulled => {}
        _ => out.push(Difference {
            path: path.clone(),
            kind: DiffKind::Changed,
            built: Some(built.clone()),
            pulled: Some(pulled.clone()),
        }),
    }
}

fn diff_objects(
    path: &mut String,
    built: &Map<String, Value>,
    pulled: &Map<String, Value>,
    out: &mut Vec<Difference>,
) {
    let keys: BTreeSet<&String> = built.keys().chain(pulled.keys()).collect();

    for key in keys {
        let len = path.len();
        push_key(path, key);

        match (built.get(key), pulled.get(key)) {
            (Some(b), Some(p)) => diff_at(path, b, p, out),
            (Some(b), None) => out.push(Difference {
                path: path.clone(),
                kind: DiffKind::Removed,
                built: Some(b.clone()),
                pulled: None,
            }),
            (None, Some(p)) => out.push(Difference {
                path: path.clone(),
                kind: DiffKind::Added,
                built: None,
                pulled: Some(p.clone()),
            }),
            (None, None) => unreachable!("key comes from one of the maps"),
        }

        path.truncate(len);
    }
}

fn diff_arrays(path: &mut String, built: &[Value], pulled: &[Value], out: &mut Vec<Difference>) {
    let shared = built.len().min(pulled.len());

    for (index, (b, p)) in built.iter().zip(pulled).enumerate() {
        let len = path.len();
        push_index(path, index);
        diff_at(path, b, p, out);
        path.truncate(len);
    }

    if built.len() == pulled.len() {
        return;
    }

    out.push(Difference {
        path: path.clone(),
        kind: DiffKind::Length,
        built: Some(built.len().into()),
        pulled: Some(pulled.len().into()),
    });

    for index in shared..built.len().max(pulled.len()) {
        let len = path.len();
        push_index(path, index);
        out.push(match (built.get(index), pulled.get(index)) {
            (Some(b), _) => Difference {
                path: path.clone(),
                kind: DiffKind::Removed,
                built: Some(b.clone()),
                pulled: None,
            },
            (None, p) => Difference {
                path: path.clone(),
                kind: DiffKind::Added,
                built: None,
                pulled: p.cloned(),
            },
        });
        path.truncate(len);
    }
}

/// Append `.key`, or `["key"]` when the key would make the path ambiguous
fn push_key(path: &mut String, key: &str) {
    let plain = !key.is_empty() && !key.contains(['.', '[', ']', '"']);
    if plain {
        if !path.is_empty() {
            path.push('.');
        }
        path.push_str(key);
    } else {
        path.push('[');
        path.push_str(&Value::String(key.to_string()).to_string());
        path.push(']');
    }
}

fn push_index(path: &mut String, index: usize) {
    path.push('[');
    path.push_str(&index.to_string());
    path.push(']');
}
