// src/utils.rs
use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

// Left unescaped in `filename*`: alphanumerics plus `-`, `.` and `_`
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_');

/// Normalize a person name for use in a download filename
pub fn sanitize_filename(name: &str) -> String {
    name.trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// `{sanitized name}_CV_{YYYYMMDD}.docx`
pub fn cv_filename(name: &str, date: NaiveDate) -> String {
    let stem = sanitize_filename(name);
    let stem = if stem.is_empty() { "CV".to_string() } else { stem };
    format!("{}_CV_{}.docx", stem, date.format("%Y%m%d"))
}

/// `Content-Disposition` value for a download, per RFC 6266: a quoted ASCII
/// `filename` for old clients plus the exact UTF-8 name in `filename*`.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_graphic() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        utf8_percent_encode(filename, FILENAME_ENCODE_SET)
    )
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

/// First `max_chars` characters, with "..." appended when anything was cut
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}
