//! Writing words, settings and markers in their text form.

use crate::{settings::Revision, word::parser::split_lines, DictionarySettings, Markers, Revisions, Word};

/// Writes a word block. Languages with blank contents are left out.
pub fn serialize_word(word: &Word) -> String {
    let mut string = format!("* @{} {}\n\n", word.date(), word.unique_name());
    let mut first = true;
    for (language, content) in word.contents().iter() {
        if content.trim().is_empty() {
            continue;
        }
        if !first {
            string.push('\n');
        }
        string.push('!');
        string.push_str(&language.to_uppercase());
        string.push('\n');
        let content = split_lines(content).collect::<Vec<_>>().join("\n");
        string.push_str(content.trim());
        string.push('\n');
        first = false;
    }
    string
}

/// Writes the `!VERSION`, `!ALPHABET` and `!REVISION` sections, preceded by the `**` header
/// if `root_header` is set.
pub fn serialize_settings(settings: &DictionarySettings, root_header: bool) -> String {
    let mut string = String::new();
    if root_header {
        string.push_str("**\n\n");
    }
    string.push_str(&format!("!VERSION\n- {}\n\n", settings.version));
    string.push_str(&format!("!ALPHABET\n- {}\n\n", settings.alphabet_rule));
    string.push_str(&serialize_revisions(&settings.revisions));
    string
}

pub fn serialize_revisions(revisions: &Revisions) -> String {
    let mut string = String::from("!REVISION\n");
    for revision in revisions {
        string.push_str(&serialize_revision(revision));
    }
    string
}

fn serialize_revision(revision: &Revision) -> String {
    match revision.date {
        Some(date) => format!("- @{date} {{{}}} → {{{}}}\n", revision.before_name, revision.after_name),
        None => format!("- {{{}}} → {{{}}}\n", revision.before_name, revision.after_name),
    }
}

/// Writes the `!MARKER` section, preceded by the `**` header if `root_header` is set.
pub fn serialize_markers(markers: &Markers, root_header: bool) -> String {
    let mut string = String::new();
    if root_header {
        string.push_str("**\n\n");
    }
    string.push_str("!MARKER\n");
    for (name, list) in markers.iter() {
        let list: Vec<_> = list.iter().map(|marker| marker.as_str()).collect();
        string.push_str(&format!("- {}: {}\n", name, list.join(", ")));
    }
    string
}
