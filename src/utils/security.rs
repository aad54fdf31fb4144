//! Input sanitization and validation helpers.
//!
//! Every function here is total: malformed or empty input maps to an empty
//! string, `false`, or an unchanged pass-through. Callers chain checks without
//! wrapping each one in error handling.
//!
//! Tag stripping is a regex denylist, not an HTML parser. Nested or malformed
//! markup such as `<<b>script>` can leave tag-like fragments behind. Text that
//! must be shown as literal HTML should also go through [`encode_html`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;
use url::Url;

/// Media types accepted for gallery uploads
pub const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/gif",
];

/// Upload limit used when the site configuration does not override it
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 10;

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static SCRIPT_ELEMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("script pattern is valid")
});

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?\(?[0-9]{1,4}\)?[-\s.]?\(?[0-9]{1,4}\)?[-\s.]?[0-9]{1,9}$")
        .expect("phone pattern is valid")
});

/// Patterns removed by [`sanitize_html`], applied in order.
static HTML_DENYLIST: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?is)<script\b.*?</script>",
        r#"(?i)on\w+\s*=\s*["'][^"']*["']"#,
        r"(?i)on\w+\s*=\s*[^\s>]*",
        r"(?i)javascript:",
        r"(?i)data:text/html",
        r"(?is)<iframe\b.*?</iframe>",
        r"(?is)<object\b.*?</object>",
        r"(?is)<embed\b.*?</embed>",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("denylist pattern is valid"))
    .collect()
});

/// Metadata of a file picked for upload. The bytes themselves are not needed
/// for validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    /// Declared media type, e.g. `image/png`
    pub media_type: String,
    /// Size in bytes
    pub size: u64,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size,
        }
    }
}

/// Removes every `<...>` tag, leaving the remaining text untouched.
/// `<script>` blocks go with their bodies.
pub fn sanitize_text<'a>(input: impl Into<Option<&'a str>>) -> String {
    match input.into() {
        Some(text) if !text.is_empty() => {
            let without_scripts = SCRIPT_ELEMENT_PATTERN.replace_all(text, "");
            TAG_PATTERN.replace_all(&without_scripts, "").into_owned()
        }
        _ => String::new(),
    }
}

/// Keeps ordinary markup but drops script/iframe/object/embed blocks, inline
/// event handlers and script-capable URL schemes.
pub fn sanitize_html<'a>(input: impl Into<Option<&'a str>>) -> String {
    let Some(html) = input.into().filter(|html| !html.is_empty()) else {
        return String::new();
    };

    HTML_DENYLIST
        .iter()
        .fold(html.to_string(), |acc, pattern| {
            pattern.replace_all(&acc, "").into_owned()
        })
}

/// Escapes HTML-significant characters. `&` goes first so entities produced by
/// the later replacements are not escaped twice.
pub fn encode_html<'a>(input: impl Into<Option<&'a str>>) -> String {
    let Some(text) = input.into() else {
        return String::new();
    };

    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
        .replace('/', "&#x2F;")
}

/// Drops `..` sequences, then maps anything outside `[a-zA-Z0-9._-]` to `_`.
pub fn sanitize_filename<'a>(input: impl Into<Option<&'a str>>) -> String {
    let Some(filename) = input.into() else {
        return String::new();
    };

    filename
        .replace("..", "")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// True when the declared media type is exactly one of [`ALLOWED_IMAGE_TYPES`].
/// No trimming, case folding or parameters.
pub fn is_valid_image_type(file: &UploadedFile) -> bool {
    ALLOWED_IMAGE_TYPES.contains(&file.media_type.as_str())
}

/// True when the file is at most `max_size_mb` mebibytes.
pub fn is_valid_file_size(file: &UploadedFile, max_size_mb: u64) -> bool {
    file.size <= max_size_mb.saturating_mul(1024 * 1024)
}

/// Permissive `local@domain.tld` shape check.
pub fn is_valid_email(input: &str) -> bool {
    EMAIL_PATTERN.is_match(input)
}

/// Optional `+`, digit groups, and space/hyphen/dot/parenthesis separators.
pub fn is_valid_phone(input: &str) -> bool {
    PHONE_PATTERN.is_match(input)
}

/// Returns a copy of the form where every string field went through
/// [`sanitize_text`] and was trimmed. Other values pass through unchanged.
pub fn sanitize_form_data(form: &Map<String, Value>) -> Map<String, Value> {
    form.iter()
        .map(|(key, value)| {
            let cleaned = match value {
                Value::String(text) => Value::String(sanitize_text(text.as_str()).trim().to_string()),
                other => other.clone(),
            };
            (key.clone(), cleaned)
        })
        .collect()
}

/// Resolves `url` against `current_origin` and accepts it only if it stays on
/// that origin.
pub fn is_valid_redirect_url(url: &str, current_origin: &str) -> bool {
    let Ok(base) = Url::parse(current_origin) else {
        return false;
    };

    match base.join(url) {
        Ok(resolved) => resolved.origin() == base.origin(),
        Err(_) => false,
    }
}
