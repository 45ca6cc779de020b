// SPDX-License-Identifier: MPL-2.0
//! Lightbox component: full-screen display of one photo with wraparound
//! navigation.
//!
//! The component is a two-phase state machine (Closed/Open). Opening always
//! re-derives the visible subset from the live category, so a click on a
//! tile rendered against a stale filter can never produce an index into the
//! wrong list; if the clicked photo is not in the recomputed subset the
//! lightbox simply stays closed.
//!
//! Closing does not clear the displayed photo immediately: the clear is
//! deferred so the close transition never flashes an empty frame, and the
//! deferred clear carries the generation it was scheduled under. A reopen
//! advances the generation, which makes the stale clear a no-op instead of
//! letting it stomp the newer photo.

use crate::catalog::{self, Photo};
use crate::error::Result;
use crate::media::RemoteImage;
use crate::ui::design_tokens::{opacity, palette, sizing, spacing, typography};
use crate::ui::styles;
use crate::ui::widgets::AnimatedSpinner;
use iced::alignment;
use iced::widget::{button, mouse_area, Container, Stack, Text};
use iced::{Element, Length};
use std::time::Duration;

/// Delay before the displayed photo is cleared after closing.
pub const CLOSE_CLEAR_DELAY: Duration = Duration::from_millis(300);

/// Spinner rotation speed in radians per tick.
const SPINNER_SPEED: f32 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Closed,
    Open,
}

/// UI events emitted by the lightbox view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    CloseRequested,
    NextRequested,
    PreviousRequested,
    /// A click landed on the photo itself. Consumed so it never reaches the
    /// backdrop's click-to-close handler.
    ImageAreaPressed,
}

/// Side effects the application should perform after a state change.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Fetch (or serve from cache) the image at `path` for display.
    FetchImage { path: String },
    /// Schedule the deferred display clear for this generation.
    ScheduleClear { generation: u64 },
}

/// Lightbox state.
#[derive(Debug, Default)]
pub struct State {
    phase: Phase,
    /// Subset of the catalog visible under the category active at open time.
    visible: Vec<Photo>,
    /// Index into `visible`; only meaningful while Open.
    current: usize,
    /// Photo whose image is (or is being) displayed. Survives closing until
    /// the deferred clear fires.
    displayed: Option<Photo>,
    /// Last successfully loaded image. Kept on screen below the spinner
    /// while the next photo loads.
    image: Option<RemoteImage>,
    loading: bool,
    load_failed: bool,
    /// Advanced on every open; stale deferred clears compare against it.
    generation: u64,
    spinner_rotation: f32,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the lightbox at `photo` within the live category's subset.
    ///
    /// Returns [`Effect::None`] without opening when the photo is not part
    /// of the recomputed subset.
    pub fn open(&mut self, photos: &[Photo], category_key: &str, photo: &Photo) -> Effect {
        let visible = catalog::visible_photos(photos, category_key);
        let Some(index) = catalog::position_of(&visible, &photo.path) else {
            log::warn!(
                "refusing to open lightbox: {} not in category {category_key}",
                photo.path
            );
            return Effect::None;
        };

        self.phase = Phase::Open;
        self.visible = visible;
        self.generation += 1;
        self.show_photo_at(index)
    }

    /// Closes the lightbox and schedules the deferred display clear.
    pub fn close(&mut self) -> Effect {
        if self.phase == Phase::Closed {
            return Effect::None;
        }
        self.phase = Phase::Closed;
        self.loading = false;
        Effect::ScheduleClear {
            generation: self.generation,
        }
    }

    /// Advances to the next photo with wraparound. No-op when fewer than two
    /// photos are visible.
    pub fn next(&mut self) -> Effect {
        self.navigate(catalog::next_index)
    }

    /// Retreats to the previous photo with wraparound. No-op when fewer than
    /// two photos are visible.
    pub fn previous(&mut self) -> Effect {
        self.navigate(catalog::previous_index)
    }

    fn navigate(&mut self, step: fn(usize, usize) -> usize) -> Effect {
        if self.phase == Phase::Closed || self.visible.len() <= 1 {
            return Effect::None;
        }
        let index = step(self.current, self.visible.len());
        self.show_photo_at(index)
    }

    fn show_photo_at(&mut self, index: usize) -> Effect {
        let photo = self.visible[index].clone();
        self.current = index;
        self.loading = true;
        self.load_failed = false;
        let path = photo.path.clone();
        self.displayed = Some(photo);
        Effect::FetchImage { path }
    }

    /// Applies the result of an image fetch.
    ///
    /// Results for a photo that is no longer displayed are dropped.
    pub fn image_loaded(&mut self, path: &str, result: Result<RemoteImage>) {
        let is_current = self
            .displayed
            .as_ref()
            .is_some_and(|photo| photo.path == path);
        if !is_current {
            return;
        }

        match result {
            Ok(image) => {
                self.image = Some(image);
                self.loading = false;
                self.load_failed = false;
            }
            Err(error) => {
                log::warn!("image load failed for {path}: {error}");
                self.image = None;
                self.loading = false;
                self.load_failed = true;
            }
        }
    }

    /// Applies a deferred display clear scheduled by [`State::close`].
    ///
    /// The clear only takes effect when the generation still matches and the
    /// lightbox has stayed closed; otherwise a reopen happened in the
    /// meantime and the clear is stale.
    pub fn clear_displayed(&mut self, generation: u64) {
        if self.phase == Phase::Closed && self.generation == generation {
            self.displayed = None;
            self.image = None;
            self.load_failed = false;
        }
    }

    /// Advances the spinner animation. Only meaningful while loading.
    pub fn spinner_tick(&mut self) {
        if self.loading {
            self.spinner_rotation += SPINNER_SPEED;
            if self.spinner_rotation > std::f32::consts::TAU {
                self.spinner_rotation -= std::f32::consts::TAU;
            }
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.phase == Phase::Open
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn displayed(&self) -> Option<&Photo> {
        self.displayed.as_ref()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        (self.phase == Phase::Open && !self.visible.is_empty()).then_some(self.current)
    }

    /// Counter text, e.g. `"3 / 12"`.
    #[must_use]
    pub fn counter_text(&self) -> String {
        format!("{} / {}", self.current + 1, self.visible.len())
    }

    /// Navigation controls and counter are only shown when there is
    /// somewhere to navigate to.
    #[must_use]
    pub fn controls_visible(&self) -> bool {
        self.phase == Phase::Open && self.visible.len() > 1
    }

    /// Paths of the photos adjacent to the current one, for prefetching.
    #[must_use]
    pub fn adjacent_paths(&self) -> Vec<String> {
        if self.phase == Phase::Closed || self.visible.len() <= 1 {
            return Vec::new();
        }
        let len = self.visible.len();
        let next = catalog::next_index(self.current, len);
        let previous = catalog::previous_index(self.current, len);
        let mut paths = vec![self.visible[next].path.clone()];
        if previous != next {
            paths.push(self.visible[previous].path.clone());
        }
        paths
    }

    /// Renders the lightbox overlay. Must only be called while Open.
    pub fn view(&self) -> Element<'_, Message> {
        // Backdrop: dimmed, full-window, click closes. Widgets stacked above
        // consume their own clicks, so only true backdrop clicks land here.
        let backdrop = mouse_area(
            Container::new(iced::widget::Column::new())
                .width(Length::Fill)
                .height(Length::Fill)
                .style(styles::container::backdrop),
        )
        .on_press(Message::CloseRequested);

        let mut stack = Stack::new().push(backdrop).push(self.photo_layer());

        if self.loading {
            stack = stack.push(
                Container::new(AnimatedSpinner::new(self.spinner_rotation).into_element())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(alignment::Horizontal::Center)
                    .align_y(alignment::Vertical::Center),
            );
        }

        stack = stack.push(
            Container::new(self.close_button())
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Right)
                .padding(spacing::MD),
        );

        if self.controls_visible() {
            stack = stack
                .push(
                    Container::new(self.nav_button("\u{2039}", Message::PreviousRequested))
                        .height(Length::Fill)
                        .align_y(alignment::Vertical::Center)
                        .padding(spacing::MD),
                )
                .push(
                    Container::new(self.nav_button("\u{203A}", Message::NextRequested))
                        .width(Length::Fill)
                        .height(Length::Fill)
                        .align_x(alignment::Horizontal::Right)
                        .align_y(alignment::Vertical::Center)
                        .padding(spacing::MD),
                )
                .push(
                    Container::new(
                        Container::new(
                            Text::new(self.counter_text()).size(typography::CAPTION),
                        )
                        .style(styles::container::counter)
                        .padding([spacing::XXS, spacing::SM]),
                    )
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(alignment::Horizontal::Center)
                    .align_y(alignment::Vertical::Bottom)
                    .padding(spacing::LG),
                );
        }

        stack.into()
    }

    fn photo_layer(&self) -> Element<'_, Message> {
        let content: Element<'_, Message> = if self.load_failed {
            let filename = self
                .displayed
                .as_ref()
                .map(|photo| photo.filename.as_str())
                .unwrap_or("image");
            Text::new(format!("Could not load {filename}"))
                .size(typography::BODY)
                .color(palette::GRAY_200)
                .into()
        } else if let Some(image) = &self.image {
            iced::widget::image(image.handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(iced::ContentFit::Contain)
                .into()
        } else {
            // Nothing loaded yet; the spinner layer carries the feedback.
            iced::widget::Column::new().into()
        };

        Container::new(mouse_area(content).on_press(Message::ImageAreaPressed))
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .padding(spacing::XL)
            .into()
    }

    fn close_button(&self) -> Element<'_, Message> {
        button(Text::new("\u{2715}").size(typography::TITLE_MD))
            .style(styles::button::overlay(
                palette::WHITE,
                opacity::OVERLAY_MEDIUM,
                opacity::OVERLAY_HOVER,
            ))
            .padding([spacing::XXS, spacing::SM])
            .on_press(Message::CloseRequested)
            .into()
    }

    fn nav_button(&self, glyph: &'static str, message: Message) -> Element<'_, Message> {
        button(Text::new(glyph).size(typography::NAV_GLYPH))
            .style(styles::button::overlay(
                palette::WHITE,
                opacity::OVERLAY_MEDIUM,
                opacity::OVERLAY_HOVER,
            ))
            .width(Length::Fixed(sizing::NAV_BUTTON_WIDTH))
            .padding([spacing::SM, spacing::XXS])
            .on_press(message)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Photo;
    use crate::error::Error;
    use iced::widget::image;

    fn sample_photos() -> Vec<Photo> {
        vec![
            Photo::new("photos/a/1.jpg", "a", "1.jpg"),
            Photo::new("photos/b/2.jpg", "b", "2.jpg"),
            Photo::new("photos/a/3.jpg", "a", "3.jpg"),
        ]
    }

    fn sample_image() -> RemoteImage {
        RemoteImage {
            handle: image::Handle::from_rgba(1, 1, vec![0, 0, 0, 255]),
            width: 1,
            height: 1,
        }
    }

    fn fetch_path(effect: &Effect) -> &str {
        match effect {
            Effect::FetchImage { path } => path,
            other => panic!("expected FetchImage, got {other:?}"),
        }
    }

    #[test]
    fn open_recomputes_subset_and_finds_position() {
        let photos = sample_photos();
        let mut state = State::new();

        let effect = state.open(&photos, "a", &photos[2]);

        assert!(state.is_open());
        assert_eq!(state.current_index(), Some(1));
        assert_eq!(fetch_path(&effect), "photos/a/3.jpg");
        assert!(state.is_loading());
    }

    #[test]
    fn open_is_guarded_against_photos_outside_the_subset() {
        let photos = sample_photos();
        let mut state = State::new();

        // photos/b/2.jpg is not part of category "a".
        let effect = state.open(&photos, "a", &photos[1]);

        assert_eq!(effect, Effect::None);
        assert!(!state.is_open());
        assert_eq!(state.current_index(), None);
    }

    #[test]
    fn next_wraps_around_the_subset() {
        let photos = sample_photos();
        let mut state = State::new();
        state.open(&photos, "a", &photos[2]);

        let effect = state.next();

        assert_eq!(state.current_index(), Some(0));
        assert_eq!(fetch_path(&effect), "photos/a/1.jpg");
    }

    #[test]
    fn previous_wraps_around_the_subset() {
        let photos = sample_photos();
        let mut state = State::new();
        state.open(&photos, "a", &photos[0]);

        let effect = state.previous();

        assert_eq!(state.current_index(), Some(1));
        assert_eq!(fetch_path(&effect), "photos/a/3.jpg");
    }

    #[test]
    fn full_cycle_of_next_returns_to_the_start() {
        let photos = sample_photos();
        let mut state = State::new();
        state.open(&photos, "all", &photos[1]);

        for _ in 0..photos.len() {
            state.next();
        }

        assert_eq!(state.current_index(), Some(1));
    }

    #[test]
    fn navigation_is_a_no_op_with_a_single_visible_photo() {
        let photos = vec![Photo::new("photos/a/1.jpg", "a", "1.jpg")];
        let mut state = State::new();
        state.open(&photos, "a", &photos[0]);

        assert_eq!(state.next(), Effect::None);
        assert_eq!(state.previous(), Effect::None);
        assert_eq!(state.current_index(), Some(0));
        assert!(!state.controls_visible());
    }

    #[test]
    fn navigation_is_a_no_op_while_closed() {
        let mut state = State::new();
        assert_eq!(state.next(), Effect::None);
        assert_eq!(state.previous(), Effect::None);
    }

    #[test]
    fn controls_are_visible_with_multiple_photos() {
        let photos = sample_photos();
        let mut state = State::new();
        state.open(&photos, "all", &photos[0]);
        assert!(state.controls_visible());
        assert_eq!(state.counter_text(), "1 / 3");
    }

    #[test]
    fn close_schedules_a_clear_for_the_current_generation() {
        let photos = sample_photos();
        let mut state = State::new();
        state.open(&photos, "all", &photos[0]);

        let effect = state.close();

        assert!(!state.is_open());
        assert!(matches!(effect, Effect::ScheduleClear { .. }));
        // The displayed photo survives until the deferred clear fires.
        assert!(state.displayed().is_some());
    }

    #[test]
    fn close_while_closed_is_a_no_op() {
        let mut state = State::new();
        assert_eq!(state.close(), Effect::None);
    }

    #[test]
    fn deferred_clear_fires_when_still_closed() {
        let photos = sample_photos();
        let mut state = State::new();
        state.open(&photos, "all", &photos[0]);
        state.image_loaded("photos/a/1.jpg", Ok(sample_image()));

        let Effect::ScheduleClear { generation } = state.close() else {
            panic!("expected ScheduleClear");
        };
        state.clear_displayed(generation);

        assert!(state.displayed().is_none());
    }

    #[test]
    fn stale_clear_does_not_stomp_a_fast_reopen() {
        let photos = sample_photos();
        let mut state = State::new();
        state.open(&photos, "all", &photos[0]);

        let Effect::ScheduleClear { generation } = state.close() else {
            panic!("expected ScheduleClear");
        };

        // Reopen on a different photo before the deferred clear fires.
        state.open(&photos, "all", &photos[1]);
        state.clear_displayed(generation);

        assert!(state.is_open());
        assert_eq!(
            state.displayed().map(|p| p.path.as_str()),
            Some("photos/b/2.jpg")
        );
    }

    #[test]
    fn image_loaded_clears_the_loading_flag() {
        let photos = sample_photos();
        let mut state = State::new();
        state.open(&photos, "all", &photos[0]);

        state.image_loaded("photos/a/1.jpg", Ok(sample_image()));

        assert!(!state.is_loading());
    }

    #[test]
    fn image_loaded_for_a_stale_path_is_dropped() {
        let photos = sample_photos();
        let mut state = State::new();
        state.open(&photos, "all", &photos[0]);
        state.next();

        // Result for the photo we already navigated away from.
        state.image_loaded("photos/a/1.jpg", Ok(sample_image()));

        assert!(state.is_loading());
    }

    #[test]
    fn load_failure_degrades_but_keeps_navigation_usable() {
        let photos = sample_photos();
        let mut state = State::new();
        state.open(&photos, "all", &photos[0]);

        state.image_loaded(
            "photos/a/1.jpg",
            Err(Error::Image("HTTP 404".to_string())),
        );

        assert!(!state.is_loading());
        assert!(state.load_failed);
        assert!(state.controls_visible());

        let effect = state.next();
        assert_eq!(fetch_path(&effect), "photos/b/2.jpg");
        assert!(!state.load_failed);
    }

    #[test]
    fn adjacent_paths_cover_both_directions_without_duplicates() {
        let photos = sample_photos();
        let mut state = State::new();
        state.open(&photos, "all", &photos[0]);

        let paths = state.adjacent_paths();
        assert_eq!(paths.len(), 2);
        assert!(paths.contains(&"photos/b/2.jpg".to_string()));
        assert!(paths.contains(&"photos/a/3.jpg".to_string()));

        // With two photos, next and previous coincide.
        let two = vec![
            Photo::new("photos/a/1.jpg", "a", "1.jpg"),
            Photo::new("photos/a/3.jpg", "a", "3.jpg"),
        ];
        let mut state = State::new();
        state.open(&two, "a", &two[0]);
        assert_eq!(state.adjacent_paths(), vec!["photos/a/3.jpg".to_string()]);
    }

    #[test]
    fn spinner_only_advances_while_loading() {
        let photos = sample_photos();
        let mut state = State::new();
        state.open(&photos, "all", &photos[0]);

        let before = state.spinner_rotation;
        state.spinner_tick();
        assert!(state.spinner_rotation > before);

        state.image_loaded("photos/a/1.jpg", Ok(sample_image()));
        let settled = state.spinner_rotation;
        state.spinner_tick();
        assert_eq!(state.spinner_rotation, settled);
    }
}
