//! Line-level delta between two free-text notes.
//!
//! Uses the `similar` crate (Myers diff algorithm). Notes are short, so the
//! whole text is kept instead of grouping into hunks.

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

/// The result of comparing two notes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NotesDelta {
    pub lines: Vec<NoteLine>,
}

impl NotesDelta {
    /// Returns `true` if the notes are identical.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| matches!(l, NoteLine::Same(_)))
    }

    pub fn additions(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, NoteLine::Added(_)))
            .count()
    }

    pub fn removals(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, NoteLine::Removed(_)))
            .count()
    }
}

/// A single line of a notes delta.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum NoteLine {
    Same(String),
    Added(String),
    Removed(String),
}

/// Compute the line delta from `old` to `new`.
///
/// Trailing whitespace at the end of either note is ignored.
pub fn diff_notes(old: &str, new: &str) -> NotesDelta {
    let old = normalize(old);
    let new = normalize(new);

    let text_diff = TextDiff::from_lines(old.as_str(), new.as_str());
    let lines = text_diff
        .iter_all_changes()
        .map(|change| {
            let text = change.value().trim_end_matches(['\r', '\n']).to_string();
            match change.tag() {
                ChangeTag::Equal => NoteLine::Same(text),
                ChangeTag::Delete => NoteLine::Removed(text),
                ChangeTag::Insert => NoteLine::Added(text),
            }
        })
        .collect();

    NotesDelta { lines }
}

/// Terminate the last line so an appended line does not rewrite it.
fn normalize(text: &str) -> String {
    let trimmed = text.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_notes_empty_delta() {
        let delta = diff_notes("focus ring visible\n", "focus ring visible");
        assert!(delta.is_empty());
        assert_eq!(delta.additions(), 0);
    }

    #[test]
    fn rewrite_shows_remove_and_add() {
        let delta = diff_notes("ok", "broken on mobile");
        assert_eq!(
            delta.lines,
            vec![
                NoteLine::Removed("ok".into()),
                NoteLine::Added("broken on mobile".into()),
            ]
        );
    }

    #[test]
    fn appended_line() {
        let delta = diff_notes("alt text missing", "alt text missing\nlogo is decorative");
        assert_eq!(delta.additions(), 1);
        assert_eq!(delta.removals(), 0);
        assert!(delta.lines.contains(&NoteLine::Same("alt text missing".into())));
    }

    #[test]
    fn empty_to_text() {
        let delta = diff_notes("", "checked with VoiceOver");
        assert_eq!(delta.lines, vec![NoteLine::Added("checked with VoiceOver".into())]);
    }

    #[test]
    fn serializes_tagged() {
        let json = serde_json::to_string(&NoteLine::Added("x".into())).unwrap();
        assert_eq!(json, r#"{"kind":"added","text":"x"}"#);
    }
}
