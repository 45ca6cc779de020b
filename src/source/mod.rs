// SPDX-License-Identifier: MPL-2.0
//! Remote listing adapter: lists the photo collection through a
//! repository-content API.
//!
//! The adapter speaks the GitHub-contents payload shape: a `GET` on
//! `{api_base}/repos/{owner}/{repo}/contents/{path}` returns a JSON array of
//! entries with a `name`, a repository-relative `path` and a `type`. Each
//! directory directly under the collection root is a category; image files
//! inside it become [`Photo`]s with that category, image files at the root
//! itself fall into [`UNCATEGORIZED`]. Everything else (a `readme.txt`, a
//! nested sub-subdirectory, a symlink) is ignored.
//!
//! The scan is all-or-nothing: any network, status, or payload problem
//! aborts it with a [`SourceError`], and the caller surfaces that once.

use crate::catalog::{Photo, UNCATEGORIZED};
use crate::config::SourceConfig;
use crate::error::SourceError;
use crate::media;
use serde::Deserialize;

const USER_AGENT: &str = concat!("IcedGallery/", env!("CARGO_PKG_VERSION"));

/// One entry of a content listing response.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ContentEntry {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ContentEntry {
    fn is_file(&self) -> bool {
        self.kind == "file"
    }

    fn is_dir(&self) -> bool {
        self.kind == "dir"
    }
}

/// Builds the HTTP client used for listing and image fetches.
pub fn build_client() -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| SourceError::Network(e.to_string()))
}

/// Builds the listing URL for a path inside the repository.
fn contents_url(config: &SourceConfig, path: &str) -> String {
    format!(
        "{}/repos/{}/{}/contents/{}?ref={}",
        config.api_base.trim_end_matches('/'),
        config.owner,
        config.repo,
        path,
        config.branch
    )
}

/// Fetches and decodes one content listing.
async fn fetch_entries(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<ContentEntry>, SourceError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SourceError::Network(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }

    response
        .json::<Vec<ContentEntry>>()
        .await
        .map_err(|e| SourceError::Listing(e.to_string()))
}

/// Converts a file entry into a [`Photo`], or `None` when its extension is
/// not in the allowed set.
fn photo_from_file_entry(entry: &ContentEntry, category: &str, include_gif: bool) -> Option<Photo> {
    if !entry.is_file() || !media::is_supported_image(&entry.name, include_gif) {
        return None;
    }
    Some(Photo::new(
        entry.path.clone(),
        category.to_string(),
        entry.name.clone(),
    ))
}

/// Splits a root listing into its category directories and its loose files,
/// both in original listing order.
fn partition_root(entries: Vec<ContentEntry>) -> (Vec<ContentEntry>, Vec<ContentEntry>) {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for entry in entries {
        if entry.is_dir() {
            dirs.push(entry);
        } else if entry.is_file() {
            files.push(entry);
        }
        // Other entry kinds (symlinks, submodules) are ignored.
    }
    (dirs, files)
}

/// Lists the whole photo collection.
///
/// Category sub-requests run sequentially in root-listing order so the
/// combined list is deterministic regardless of network timing.
pub async fn list_photos(
    client: &reqwest::Client,
    config: &SourceConfig,
    include_gif: bool,
) -> Result<Vec<Photo>, SourceError> {
    let root_url = contents_url(config, &config.root);
    log::info!("scanning photo collection at {root_url}");

    let (dirs, files) = partition_root(fetch_entries(client, &root_url).await?);

    let mut photos: Vec<Photo> = files
        .iter()
        .filter_map(|entry| photo_from_file_entry(entry, UNCATEGORIZED, include_gif))
        .collect();

    for dir in &dirs {
        let entries = fetch_entries(client, &contents_url(config, &dir.path)).await?;
        photos.extend(
            entries
                .iter()
                .filter_map(|entry| photo_from_file_entry(entry, &dir.name, include_gif)),
        );
    }

    log::info!(
        "scan finished: {} photos in {} categories",
        photos.len(),
        dirs.len()
    );
    Ok(photos)
}
