// SPDX-License-Identifier: MPL-2.0
//! Message handling for the application root.

use super::{App, Message};
use crate::media;
use crate::ui::{category_bar, gallery_grid, lightbox};
use iced::widget::operation;
use iced::widget::scrollable::RelativeOffset;
use iced::widget::Id;
use iced::{event, keyboard, window, Task};

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ScanCompleted(Ok(photos)) => {
                self.photos = photos;
                self.categories = crate::catalog::build_categories(&self.photos);
                self.grid_status = gallery_grid::Status::Ready;
                self.refresh_current_photos();
                self.request_near_visible_thumbnails()
            }
            Message::ScanCompleted(Err(error)) => {
                log::error!("photo scan failed: {error}");
                self.grid_status = gallery_grid::Status::ScanFailed;
                self.scan_error_message = Some(error.user_message());
                Task::none()
            }
            Message::CategoryBar(category_bar::Message::CategorySelected(key)) => {
                if key == self.current_category {
                    return Task::none();
                }
                self.current_category = key;
                self.refresh_current_photos();
                self.grid_offset_y = 0.0;

                let snap_top = operation::snap_to(
                    Id::new(gallery_grid::GRID_SCROLLABLE_ID),
                    RelativeOffset { x: 0.0, y: 0.0 },
                );
                Task::batch([snap_top, self.request_near_visible_thumbnails()])
            }
            Message::Grid(gallery_grid::Message::Scrolled {
                offset_y,
                viewport_height,
            }) => {
                self.grid_offset_y = offset_y;
                self.grid_viewport_height = viewport_height;
                self.request_near_visible_thumbnails()
            }
            Message::Grid(gallery_grid::Message::PhotoClicked(photo)) => {
                // The subset is re-derived from the live category here, not
                // taken from whatever the grid happened to render.
                let effect = self
                    .lightbox
                    .open(&self.photos, &self.current_category, &photo);
                self.run_lightbox_effect(effect)
            }
            Message::Lightbox(message) => self.handle_lightbox_message(message),
            Message::ImageFetched { path, result } => {
                self.images_in_flight.remove(&path);
                if let Ok(image) = &result {
                    self.image_cache.put(path.clone(), image.clone());
                }
                self.lightbox.image_loaded(&path, result);
                Task::none()
            }
            Message::ThumbnailFetched { path, result } => {
                match result {
                    Ok(handle) => {
                        self.thumbnails.insert(path, handle);
                    }
                    Err(error) => {
                        // The tile keeps its placeholder; no refetch loop.
                        log::warn!("thumbnail fetch failed for {path}: {error}");
                    }
                }
                Task::none()
            }
            Message::ClearDisplayed { generation } => {
                self.lightbox.clear_displayed(generation);
                Task::none()
            }
            Message::SpinnerTick => {
                self.lightbox.spinner_tick();
                Task::none()
            }
            Message::RawEvent(event) => self.handle_raw_event(event),
        }
    }

    fn handle_lightbox_message(&mut self, message: lightbox::Message) -> Task<Message> {
        let effect = match message {
            lightbox::Message::CloseRequested => self.lightbox.close(),
            lightbox::Message::NextRequested => self.lightbox.next(),
            lightbox::Message::PreviousRequested => self.lightbox.previous(),
            // Consumed so clicks on the photo never reach the backdrop's
            // click-to-close handler.
            lightbox::Message::ImageAreaPressed => lightbox::Effect::None,
        };
        self.run_lightbox_effect(effect)
    }

    fn run_lightbox_effect(&mut self, effect: lightbox::Effect) -> Task<Message> {
        match effect {
            lightbox::Effect::None => Task::none(),
            lightbox::Effect::ScheduleClear { generation } => Task::perform(
                tokio::time::sleep(lightbox::CLOSE_CLEAR_DELAY),
                move |_| Message::ClearDisplayed { generation },
            ),
            lightbox::Effect::FetchImage { path } => {
                let mut tasks = vec![self.display_image(path)];
                for adjacent in self.lightbox.adjacent_paths() {
                    tasks.push(self.prefetch_image(adjacent));
                }
                Task::batch(tasks)
            }
        }
    }

    /// Serves the displayed image from the cache, or fetches it.
    fn display_image(&mut self, path: String) -> Task<Message> {
        if let Some(image) = self.image_cache.get(&path) {
            self.lightbox.image_loaded(&path, Ok(image));
            return Task::none();
        }
        self.fetch_full_image(path)
    }

    /// Warms the cache for an adjacent photo without touching the display.
    fn prefetch_image(&mut self, path: String) -> Task<Message> {
        if self.image_cache.contains(&path) {
            return Task::none();
        }
        self.fetch_full_image(path)
    }

    fn fetch_full_image(&mut self, path: String) -> Task<Message> {
        let Some(client) = self.client.clone() else {
            return Task::none();
        };
        if !self.images_in_flight.insert(path.clone()) {
            return Task::none();
        }

        let url = media::raw_url(&self.config.source, &path);
        Task::perform(media::fetch_image(client, url), move |result| {
            Message::ImageFetched {
                path: path.clone(),
                result,
            }
        })
    }

    /// Issues thumbnail fetches for tiles near the visible viewport.
    fn request_near_visible_thumbnails(&mut self) -> Task<Message> {
        let Some(client) = self.client.clone() else {
            return Task::none();
        };

        let range = gallery_grid::near_visible_range(
            self.grid_offset_y,
            self.grid_viewport_height,
            self.columns(),
            self.current_photos.len(),
        );

        let mut tasks = Vec::new();
        for photo in &self.current_photos[range] {
            if self.thumbnails.contains_key(&photo.path)
                || !self.thumbnails_requested.insert(photo.path.clone())
            {
                continue;
            }

            let url = media::raw_url(&self.config.source, &photo.path);
            let path = photo.path.clone();
            tasks.push(Task::perform(
                media::fetch_thumbnail(client.clone(), url),
                move |result| Message::ThumbnailFetched {
                    path: path.clone(),
                    result,
                },
            ));
        }
        Task::batch(tasks)
    }

    fn handle_raw_event(&mut self, event: event::Event) -> Task<Message> {
        match event {
            event::Event::Window(window::Event::Resized(size)) => {
                self.window_size = size;
                self.request_near_visible_thumbnails()
            }
            // Keyboard shortcuts are only bound while the lightbox is open.
            event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. })
                if self.lightbox.is_open() =>
            {
                let effect = match key {
                    keyboard::Key::Named(keyboard::key::Named::Escape) => self.lightbox.close(),
                    keyboard::Key::Named(keyboard::key::Named::ArrowLeft) => {
                        self.lightbox.previous()
                    }
                    keyboard::Key::Named(keyboard::key::Named::ArrowRight) => self.lightbox.next(),
                    _ => lightbox::Effect::None,
                };
                self.run_lightbox_effect(effect)
            }
            _ => Task::none(),
        }
    }
}
