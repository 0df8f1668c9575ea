use std::path::{self, PathBuf};

use colored::Colorize;
use serde::Deserialize;
use tokio::fs;

use crate::error::SyncError;
use crate::gist::GistClient;

/// One file to download: which gist, which file within it, and where to
/// write it
///
/// Fields are optional so that a config file with a malformed item still
/// parses; `fields` hands them out only when all three are present and
/// non-empty.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GistItem {
    pub gist_id: Option<String>,
    pub file_name: Option<String>,
    pub output_dir: Option<String>,
}

impl GistItem {
    pub fn new(gist_id: String, file_name: String, output_dir: String) -> Self {
        Self {
            gist_id: Some(gist_id),
            file_name: Some(file_name),
            output_dir: Some(output_dir),
        }
    }

    fn fields(&self) -> Option<(&str, &str, &str)> {
        Some((
            present(&self.gist_id)?,
            present(&self.file_name)?,
            present(&self.output_dir)?,
        ))
    }

    /// A short identifier for log lines
    pub fn describe(&self) -> String {
        format!(
            "gist {} file {}",
            self.gist_id.as_deref().unwrap_or("?"),
            self.file_name.as_deref().unwrap_or("?"),
        )
    }
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Downloads one gist file to its output directory
///
/// An item missing a field is skipped with a warning, before any network
/// call, and counts as success. Everything else runs in order: fetch the
/// gist metadata, resolve the file's raw content URL, fetch the bytes,
/// write them to `output_dir/file_name` (creating the directory chain if
/// needed, overwriting silently).
pub async fn process_item(client: &GistClient, item: &GistItem) -> Result<(), SyncError> {
    let Some((gist_id, file_name, output_dir)) = item.fields() else {
        eprintln!(
            "{}",
            format!("skipping item missing gistId, fileName, or outputDir: {item:?}").yellow()
        );
        return Ok(());
    };

    let metadata = client.fetch_metadata(gist_id).await?;

    let raw_url = metadata
        .raw_url(file_name)
        .ok_or_else(|| SyncError::NotFound {
            gist_id: gist_id.to_string(),
            file_name: file_name.to_string(),
        })?;

    let content = client.fetch_raw(raw_url).await?;
    let output_path = write_output(output_dir, file_name, &content).await?;

    println!(
        "{}",
        format!("saved {} to {}", file_name, output_path.display()).cyan()
    );

    Ok(())
}

/// Prints a per-item failure without letting it escape the item boundary
pub fn report_item_error(item: &GistItem, err: &SyncError) {
    eprintln!(
        "{}",
        format!("failed to sync {}: {err}", item.describe()).red()
    );
}

async fn write_output(
    output_dir: &str,
    file_name: &str,
    content: &[u8],
) -> Result<PathBuf, SyncError> {
    let dir = path::absolute(output_dir).map_err(|source| SyncError::Io {
        path: PathBuf::from(output_dir),
        source,
    })?;

    fs::create_dir_all(&dir)
        .await
        .map_err(|source| SyncError::Io {
            path: dir.clone(),
            source,
        })?;

    let output_path = dir.join(file_name);

    fs::write(&output_path, content)
        .await
        .map_err(|source| SyncError::Io {
            path: output_path.clone(),
            source,
        })?;

    Ok(output_path)
}
