//! Content-type lookup by file extension.

use std::path::Path;

pub const DEFAULT_MIME: &str = "text/plain";

static MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("txt", "text/plain"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("ico", "image/x-icon"),
    ("svg", "image/svg+xml"),
];

/// Content type for `path`, `text/plain` when the extension is missing or unknown.
///
/// Extensions match case-sensitively.
pub fn content_type(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| MIME_TYPES.iter().find(|(e, _)| *e == ext))
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_MIME)
}
