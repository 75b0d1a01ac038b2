// Case-insensitive keyword search over normalized sentences
use shared_types::{Document, Sentence};

/// Sentences containing `query`, ignoring case, in document order
pub fn search<'a>(document: &'a Document, query: &str) -> Vec<&'a Sentence> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    document
        .sentences
        .iter()
        .filter(|s| s.text.to_lowercase().contains(&query))
        .collect()
}
