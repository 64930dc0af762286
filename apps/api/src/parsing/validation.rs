pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx"];
const ALLOWED_MEDIA_TYPES: &[&str] = &[PDF_MEDIA_TYPE, DOCX_MEDIA_TYPE];

/// Largest accepted upload (inclusive).
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Formats a byte count as megabytes: whole numbers without decimals, otherwise two.
pub fn pretty_file_size(bytes: u64) -> String {
    let mb = bytes as f64 / (1024.0 * 1024.0);
    if mb.fract() == 0.0 {
        format!("{mb}MB")
    } else {
        format!("{mb:.2}MB")
    }
}

/// Lower-cased extension after the last dot, if any.
pub fn file_extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Returns `None` for an acceptable file, or the user-facing rejection message.
pub fn validate_resume_file(file_name: &str, media_type: &str, size: u64) -> Option<String> {
    let extension_ok = file_extension(file_name)
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false);
    if !extension_ok {
        return Some("Only .pdf or .docx files are supported.".to_string());
    }

    if !ALLOWED_MEDIA_TYPES.contains(&media_type) {
        return Some("Unsupported file type provided.".to_string());
    }

    if size > MAX_FILE_SIZE_BYTES {
        return Some(format!(
            "File must be {} or smaller.",
            pretty_file_size(MAX_FILE_SIZE_BYTES)
        ));
    }

    None
}
