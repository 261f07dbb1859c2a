//! Joins fetched items into a single JSON-array document.
//!
//! Item bodies are trusted verbatim; only their trailing line breaks
//! are trimmed so the separators stay well-formed.

/// Encode item contents as `[\n<item>,\n<item>\n]`.
pub fn encode<S: AsRef<str>>(contents: &[S]) -> String {
    let body_len: usize = contents.iter().map(|c| c.as_ref().len() + 2).sum();
    let mut doc = String::with_capacity(body_len + 4);

    doc.push_str("[\n");
    for (i, content) in contents.iter().enumerate() {
        if i > 0 {
            doc.push_str(",\n");
        }
        doc.push_str(content.as_ref().trim_end_matches(['\r', '\n']));
    }
    doc.push_str("\n]");
    doc
}
