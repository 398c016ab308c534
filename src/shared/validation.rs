use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating external playback identifiers
    /// Letters, digits, underscores and hyphens only
    /// - Valid: "dQw4w9WgXcQ", "abc_123-x"
    /// - Invalid: "", "has space", "a/b", "id?x=1"
    pub static ref PLAYBACK_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();

    /// Runs of characters that are not allowed in an upload folder segment
    static ref FOLDER_SEGMENT_SEPARATORS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Turn a human-readable name into an upload folder segment.
///
/// Lowercases, collapses every run of non-alphanumerics into a single hyphen
/// and trims hyphens from both ends. Falls back to `"untitled"` when nothing
/// usable remains.
pub fn folder_segment(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let slug = FOLDER_SEGMENT_SEPARATORS.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        "untitled".to_string()
    } else {
        slug.to_string()
    }
}
