//! Field-level differences between two serialized records

use serde_json::{Map, Value};

/// Longest string value shown before truncating
const MAX_SHOWN_CHARS: usize = 40;

/// List the fields that differ between `before` and `after`
///
/// Nested objects are walked with dotted paths (`cap.cents`). Non-object
/// values are compared as a whole. Changed and removed fields come first,
/// then fields only `after` has.
pub fn field_changes(before: &Value, after: &Value) -> Vec<String> {
    let mut changes = Vec::new();
    collect(before, after, "", &mut changes);
    changes
}

fn collect(before: &Value, after: &Value, path: &str, out: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(b), Value::Object(a)) => collect_fields(b, a, path, out),
        _ if before != after => out.push(describe(path, Some(before), Some(after))),
        _ => {}
    }
}

fn collect_fields(before: &Map<String, Value>, after: &Map<String, Value>, path: &str, out: &mut Vec<String>) {
    for (key, old) in before {
        let field = join(path, key);
        match after.get(key) {
            Some(new) => collect(old, new, &field, out),
            None => out.push(describe(&field, Some(old), None)),
        }
    }
    for (key, new) in after {
        if !before.contains_key(key) {
            out.push(describe(&join(path, key), None, Some(new)));
        }
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn describe(path: &str, old: Option<&Value>, new: Option<&Value>) -> String {
    let shown = |v: Option<&Value>| v.map(render).unwrap_or_else(|| "(none)".to_string());
    let change = format!("{} -> {}", shown(old), shown(new));
    if path.is_empty() {
        change
    } else {
        format!("{}: {}", path, change)
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > MAX_SHOWN_CHARS => {
            let cut: String = s.chars().take(MAX_SHOWN_CHARS - 3).collect();
            format!("\"{}...\"", cut)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
