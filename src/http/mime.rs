//! MIME type detection module
//!
//! Maps file extensions of served assets to a Content-Type.

/// Fallback for anything outside the table
pub const OCTET_STREAM: &str = "application/octet-stream";

pub const PDF: &str = "application/pdf";

/// Extensions accepted as certification images
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "gif", "webp", "svg"];

/// Get MIME Content-Type based on file extension (case-insensitive)
///
/// # Examples
/// ```
/// use portfolio_backend::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("PNG")), "image/png");
/// assert_eq!(get_content_type(Some("bmp")), "application/octet-stream");
/// assert_eq!(get_content_type(None), "application/octet-stream");
/// ```
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return OCTET_STREAM;
    };

    match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => PDF,
        _ => OCTET_STREAM,
    }
}

/// Whether the extension belongs to a listable image
pub fn is_image_extension(extension: Option<&str>) -> bool {
    extension.is_some_and(|ext| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(ext))
    })
}
