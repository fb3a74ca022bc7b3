//! Undo/redo history listing

use crate::history::ModelHistory;

pub fn format_history(history: &ModelHistory) -> String {
    let mut output = String::new();
    let undo: Vec<&str> = history.past_descriptions().collect();
    let redo: Vec<&str> = history.future_descriptions().collect();

    if undo.is_empty() && redo.is_empty() {
        return "No commands to undo or redo.\n".to_string();
    }
    if !undo.is_empty() {
        output.push_str("Undo (most recent first):\n");
        for (i, description) in undo.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, description));
        }
    }
    if !redo.is_empty() {
        output.push_str("Redo (next first):\n");
        for (i, description) in redo.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, description));
        }
    }
    output
}
