/// Characters that may not appear in a single path segment.
const RESERVED: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replace every reserved character with `_` so the text can be used as
/// one file or folder name.
///
/// Length, repeated underscores, device names (`CON`, `NUL`, ...) and
/// trailing dots are left alone.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect()
}
