// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::catalog::Photo;
use crate::error::{Error, SourceError};
use crate::media::RemoteImage;
use crate::ui::{category_bar, gallery_grid, lightbox};
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`. The variants forward
/// component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Grid(gallery_grid::Message),
    CategoryBar(category_bar::Message),
    Lightbox(lightbox::Message),
    /// Result of the startup scan. All-or-nothing; never retried.
    ScanCompleted(Result<Vec<Photo>, SourceError>),
    /// A grid thumbnail finished fetching.
    ThumbnailFetched {
        path: String,
        result: Result<iced::widget::image::Handle, Error>,
    },
    /// A full-size lightbox image finished fetching.
    ImageFetched {
        path: String,
        result: Result<RemoteImage, Error>,
    },
    /// The deferred display clear scheduled by a lightbox close.
    ClearDisplayed { generation: u64 },
    /// Periodic tick for the loading-spinner animation.
    SpinnerTick,
    /// Raw runtime event (keyboard, window resize).
    RawEvent(iced::event::Event),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional path to a settings file, overriding the platform default.
    pub config_path: Option<PathBuf>,
    /// Force-admit `.gif` files regardless of the configured default.
    pub include_gif: bool,
}
