// SPDX-License-Identifier: MPL-2.0
//! Image fetching, thumbnailing, and the session image cache.
//!
//! Photo bytes live on the remote host; this module turns them into Iced
//! image handles. Full-size images keep their encoded bytes (Iced decodes
//! them on the GPU upload path), thumbnails are downscaled here first so the
//! grid never uploads multi-megabyte textures.

pub mod sanitize;

use crate::config::SourceConfig;
use crate::error::{Error, Result};
use iced::widget::image;
use image_rs::GenericImageView;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Extensions admitted to the gallery, lower-case, without the dot.
const SUPPORTED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Default bound for the full-size image cache.
pub const DEFAULT_CACHE_ENTRIES: usize = 16;

/// Longest edge of a grid thumbnail, in pixels.
pub const THUMBNAIL_EDGE: u32 = 320;

/// Checks whether a file name carries a supported image extension.
///
/// Matching is case-insensitive. `.gif` is only accepted when `include_gif`
/// is set.
pub fn is_supported_image(filename: &str, include_gif: bool) -> bool {
    let Some((_, extension)) = filename.rsplit_once('.') else {
        return false;
    };
    let extension = extension.to_ascii_lowercase();
    SUPPORTED_EXTENSIONS.contains(&extension.as_str()) || (include_gif && extension == "gif")
}

/// Builds the raw-content URL for a photo path.
pub fn raw_url(config: &SourceConfig, photo_path: &str) -> String {
    format!(
        "{}/{}/{}/{}/{}",
        config.raw_base.trim_end_matches('/'),
        config.owner,
        config.repo,
        config.branch,
        photo_path
    )
}

/// A fetched, validated full-size image ready for display.
#[derive(Debug, Clone)]
pub struct RemoteImage {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Image(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Image(format!("HTTP {status} for {url}")));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::Image(e.to_string()))?;
    Ok(bytes.to_vec())
}

/// Fetches a photo and validates that it decodes.
///
/// The encoded bytes are handed to Iced unchanged; decoding here only
/// guards against truncated or mislabeled files so a broken photo surfaces
/// as a load failure instead of a blank widget.
pub async fn fetch_image(client: reqwest::Client, url: String) -> Result<RemoteImage> {
    let bytes = fetch_bytes(&client, &url).await?;
    let decoded = image_rs::load_from_memory(&bytes)?;
    let (width, height) = (decoded.width(), decoded.height());

    Ok(RemoteImage {
        handle: image::Handle::from_bytes(bytes),
        width,
        height,
    })
}

/// Fetches a photo and downscales it to a grid thumbnail.
pub async fn fetch_thumbnail(client: reqwest::Client, url: String) -> Result<image::Handle> {
    let bytes = fetch_bytes(&client, &url).await?;
    let thumbnail = image_rs::load_from_memory(&bytes)?.thumbnail(THUMBNAIL_EDGE, THUMBNAIL_EDGE);
    let (width, height) = (thumbnail.width(), thumbnail.height());

    Ok(image::Handle::from_rgba(
        width,
        height,
        thumbnail.to_rgba8().into_raw(),
    ))
}

/// Session cache of full-size images, keyed by photo path.
///
/// Bounded LRU so adjacent-photo prefetching cannot grow without limit.
#[derive(Debug)]
pub struct ImageCache {
    entries: LruCache<String, RemoteImage>,
}

impl ImageCache {
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    /// Returns the cached image and marks it most recently used.
    pub fn get(&mut self, path: &str) -> Option<RemoteImage> {
        self.entries.get(path).cloned()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains(path)
    }

    pub fn put(&mut self, path: String, image: RemoteImage) {
        self.entries.put(path, image);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_ENTRIES)
    }
}
