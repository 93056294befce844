use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::catalog::form::UploadedFile;
use crate::models::CatalogKind;

/// Images accepted per create/update request.
pub const MAX_IMAGES: usize = 5;

/// `<unix-millis>-<random><.ext>`, keeping only a short alphanumeric extension.
pub fn stored_file_name(original: Option<&str>, millis: i64, random: u32) -> String {
    let ext = original
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.len() <= 10 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default();
    format!("{millis}-{random}{ext}")
}

pub fn public_path(kind: CatalogKind, file_name: &str) -> String {
    format!("/uploads/{}/{file_name}", kind.as_str())
}

fn disk_path(root: &Path, public: &str) -> Option<PathBuf> {
    let relative = public.strip_prefix("/uploads/")?;
    Some(root.join(relative))
}

/// Write every file under `<root>/<kind>/` and return their public paths.
pub async fn store_images(
    root: &Path,
    kind: CatalogKind,
    files: &[&UploadedFile],
) -> Result<Vec<String>, String> {
    if files.is_empty() {
        return Ok(Vec::new());
    }

    let dir = root.join(kind.as_str());
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| format!("Failed to create upload dir {}: {e}", dir.display()))?;

    let mut stored = Vec::with_capacity(files.len());
    for file in files {
        let name = stored_file_name(
            file.file_name.as_deref(),
            Utc::now().timestamp_millis(),
            rand::random_range(0..1_000_000_000),
        );
        let path = dir.join(&name);
        if let Err(e) = tokio::fs::write(&path, &file.data).await {
            discard(root, &stored).await;
            return Err(format!("Failed to write {}: {e}", path.display()));
        }
        stored.push(public_path(kind, &name));
    }

    tracing::debug!("Stored {} image(s) for {}", stored.len(), kind.as_str());
    Ok(stored)
}

/// Best-effort removal of files written for a request that then failed.
pub async fn discard(root: &Path, public_paths: &[String]) {
    for public in public_paths {
        let Some(path) = disk_path(root, public) else { continue };
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!("Failed to remove orphaned upload {}: {e}", path.display());
        }
    }
}
