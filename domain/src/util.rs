//! Shared utility functions.

/// Convert a display name to an API-safe author label.
///
/// Provider APIs reject message author names containing spaces or
/// punctuation, so everything outside `[a-zA-Z0-9_-]` becomes an underscore.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
