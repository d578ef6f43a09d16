use std::path::Path;

/// Guards a snippet or folder name before it is joined onto the root.
///
/// Returns the name unchanged when it is exactly one path component, and the
/// empty string otherwise: separators, `.`/`..`, trailing slashes and embedded
/// NUL bytes are all rejected. Callers must treat an empty result as invalid
/// input, never as "no folder".
pub fn sanitize(raw: &str) -> String {
    if raw.contains('\0') {
        return String::new();
    }
    match Path::new(raw).file_name() {
        Some(base) if base == raw => raw.to_string(),
        _ => String::new(),
    }
}
