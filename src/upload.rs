//! File storage for uploaded images.

use std::io;
use std::path::Path;

use tokio::fs;

/// Minimal sanitization: spaces become underscores, nothing else is touched.
pub fn sanitize_filename(name: &str) -> String {
    name.replace(' ', "_")
}

/// Splits at the last `.`; a leading dot does not count as an extension.
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Writes `data` under `dir`, probing `<stem>_1<ext>`, `<stem>_2<ext>`, ...
/// until a free name is found. Returns the name actually used.
///
/// The existence check and the write are not atomic; two concurrent uploads
/// of the same name can race.
pub async fn store_file(dir: &Path, filename: &str, data: &[u8]) -> io::Result<String> {
    let sanitized = sanitize_filename(filename);
    let (stem, ext) = split_extension(&sanitized);

    let mut candidate = sanitized.clone();
    let mut attempt = 1u32;
    while fs::try_exists(dir.join(&candidate)).await? {
        candidate = format!("{stem}_{attempt}{ext}");
        attempt += 1;
    }

    fs::write(dir.join(&candidate), data).await?;
    Ok(candidate)
}
