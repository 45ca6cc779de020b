// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the source adapter, the
//! grid, and the lightbox.
//!
//! The `App` struct owns the photo catalog scanned at startup, the session
//! caches, and the lightbox state, and translates component effects into
//! tasks (image fetches, the deferred display clear). Policy decisions such
//! as window sizing and the thumbnail request margin live close to the
//! update loop so user-facing behavior is easy to audit.

mod message;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::catalog::{self, Category, Photo, ALL_CATEGORY};
use crate::config::{self, Config};
use crate::media::{self, ImageCache};
use crate::source;
use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::{gallery_grid, lightbox};
use iced::{window, Size, Subscription, Task, Theme};
use std::collections::{HashMap, HashSet};
use std::fmt;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 768;
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 360;

/// Most columns the grid will spread to on wide windows.
const MAX_GRID_COLUMNS: usize = 8;

/// Root Iced application state.
pub struct App {
    config: Config,
    include_gif: bool,
    /// `None` only when HTTP client construction failed at startup; the scan
    /// then reports the failure and nothing is ever fetched.
    client: Option<reqwest::Client>,
    /// Full photo set, populated once per scan.
    photos: Vec<Photo>,
    categories: Vec<Category>,
    current_category: String,
    /// The grid's subset for the current category, in stable order.
    current_photos: Vec<Photo>,
    thumbnails: HashMap<String, iced::widget::image::Handle>,
    /// Paths whose thumbnail fetch has been issued, successful or not.
    /// Failed thumbnails keep their tile placeholder instead of refetching.
    thumbnails_requested: HashSet<String>,
    grid_status: gallery_grid::Status,
    scan_error_message: Option<String>,
    lightbox: lightbox::State,
    image_cache: ImageCache,
    /// Full-size fetches currently in flight, to avoid duplicates.
    images_in_flight: HashSet<String>,
    window_size: Size,
    grid_offset_y: f32,
    grid_viewport_height: f32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("photos", &self.photos.len())
            .field("current_category", &self.current_category)
            .field("lightbox_open", &self.lightbox.is_open())
            .finish()
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH as f32, MIN_WINDOW_HEIGHT as f32)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy the Fn trait requirement
    // while only consuming flags once (the boot closure must be Fn).
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = match &flags.config_path {
            Some(path) => config::load_from_path(path),
            None => config::load(),
        }
        .unwrap_or_else(|err| {
            log::warn!("falling back to default config: {err}");
            Config::default()
        });

        let include_gif = config.include_gif || flags.include_gif;
        let cache_entries = config
            .image_cache_entries
            .unwrap_or(media::DEFAULT_CACHE_ENTRIES);

        let mut app = Self {
            include_gif,
            client: None,
            photos: Vec::new(),
            categories: Vec::new(),
            current_category: ALL_CATEGORY.to_string(),
            current_photos: Vec::new(),
            thumbnails: HashMap::new(),
            thumbnails_requested: HashSet::new(),
            grid_status: gallery_grid::Status::Scanning,
            scan_error_message: None,
            lightbox: lightbox::State::new(),
            image_cache: ImageCache::new(cache_entries),
            images_in_flight: HashSet::new(),
            window_size: Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
            grid_offset_y: 0.0,
            grid_viewport_height: WINDOW_DEFAULT_HEIGHT as f32,
            config,
        };

        if app.config.source.owner.is_empty() || app.config.source.repo.is_empty() {
            app.grid_status = gallery_grid::Status::ScanFailed;
            app.scan_error_message = Some(
                "No photo source configured. Set [source] owner and repo in settings.toml."
                    .to_string(),
            );
            return (app, Task::none());
        }

        let task = match source::build_client() {
            Ok(client) => {
                app.client = Some(client.clone());
                let source_config = app.config.source.clone();
                let include_gif = app.include_gif;
                Task::perform(
                    async move { source::list_photos(&client, &source_config, include_gif).await },
                    Message::ScanCompleted,
                )
            }
            Err(err) => Task::perform(async move { Err(err) }, Message::ScanCompleted),
        };

        (app, task)
    }

    fn title(&self) -> String {
        match self.lightbox.displayed() {
            Some(photo) if self.lightbox.is_open() => {
                format!("{} \u{2014} Iced Gallery", photo.filename)
            }
            _ => "Iced Gallery".to_string(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create(self)
    }

    /// Number of tile columns that fit the current window width.
    fn columns(&self) -> usize {
        let available = (self.window_size.width - 2.0 * spacing::SM).max(0.0);
        let per_tile = sizing::GRID_TILE + spacing::XS;
        ((available / per_tile) as usize).clamp(1, MAX_GRID_COLUMNS)
    }

    /// Rebuilds the grid subset after the catalog or the filter changed.
    fn refresh_current_photos(&mut self) {
        self.current_photos = catalog::visible_photos(&self.photos, &self.current_category);
    }
}
