//! Field labels, widget keys, and field paths.

use std::fmt;

/// Converts a display label to a stable machine key.
///
/// `"User Profile"` becomes `"user_profile"`.
#[must_use]
pub fn label_to_key(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Converts a machine key back to a human-readable label.
///
/// `"nested_nested"` becomes `"Nested Nested"`.
#[must_use]
pub fn key_to_label(key: &str) -> String {
    key.split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect()
    })
}

/// Root-relative location of a field inside the value tree.
///
/// Paths are recorded for every rendered leaf and matched against validator
/// violation locations; they also produce the underscore-composed widget
/// keys that identify editor instances inside the host's keyed state store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The empty path at the form root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns the path extended with one more segment.
    #[must_use]
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    /// The path's segments, root first.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this is the form root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Widget key for this path under the given form prefix.
    ///
    /// The prefix is the form's own key, so sibling forms sharing one host
    /// store never collide.
    #[must_use]
    pub fn widget_key(&self, prefix: &str) -> String {
        if self.segments.is_empty() {
            prefix.to_string()
        } else {
            format!("{}_{}", prefix, self.segments.join("_"))
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
