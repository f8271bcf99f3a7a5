//! Static export of the downloader pages for serverless hosting.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    error::ApiError,
    pages::{API_DOWNLOAD_PATH, render_page},
    sites::SITES,
};

pub const DEFAULT_EXPORT_DIR: &str = "public";

/// Writes one HTML file per site into `out_dir`, pointing at the relative proxy path.
pub async fn export_pages(out_dir: &Path) -> Result<Vec<PathBuf>, ApiError> {
    tokio::fs::create_dir_all(out_dir).await.map_err(|error| {
        ApiError::internal(format!(
            "Could not create export directory {}: {error}",
            out_dir.display()
        ))
    })?;

    let mut written = Vec::with_capacity(SITES.len());
    for site in &SITES {
        let html = render_page(site, API_DOWNLOAD_PATH);
        let out_file = out_dir.join(format!("{}.html", site.export_name));
        tokio::fs::write(&out_file, html).await.map_err(|error| {
            ApiError::internal(format!("Could not write {}: {error}", out_file.display()))
        })?;

        info!("Wrote {}", out_file.display());
        written.push(out_file);
    }

    Ok(written)
}
