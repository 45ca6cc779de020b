// SPDX-License-Identifier: MPL-2.0
//! Thumbnail grid for the current category's photos.
//!
//! Tiles keep the subset's original relative order. A tile renders a neutral
//! placeholder until its thumbnail arrives; the application only fetches
//! thumbnails for the tile range near the visible viewport (see
//! [`near_visible_range`]), which gives the grid its lazy-loading behavior.

use crate::catalog::Photo;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::styles;
use iced::alignment;
use iced::widget::{button, scrollable, Column, Container, Row, Text};
use iced::{Element, Length};
use std::collections::HashMap;
use std::ops::Range;

/// Identifier of the grid scrollable, used to snap back to the top when the
/// category filter changes.
pub const GRID_SCROLLABLE_ID: &str = "gallery-grid-scrollable";

/// Vertical pitch of one grid row (tile edge plus spacing).
pub const ROW_PITCH: f32 = sizing::GRID_TILE + spacing::XS;

/// Extra rows of thumbnails requested above and below the viewport.
const PREFETCH_ROWS: usize = 2;

/// Messages emitted by the grid.
#[derive(Debug, Clone)]
pub enum Message {
    PhotoClicked(Photo),
    Scrolled {
        offset_y: f32,
        viewport_height: f32,
    },
}

/// What the grid area should currently display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The startup scan is still running.
    Scanning,
    /// The scan failed; the message is shown once and never retried.
    ScanFailed,
    /// Photos are available (the subset may still be empty).
    Ready,
}

/// Context required to render the grid.
pub struct ViewContext<'a> {
    /// The current category's subset, in stable order.
    pub photos: &'a [Photo],
    /// Thumbnails fetched so far, keyed by photo path.
    pub thumbnails: &'a HashMap<String, iced::widget::image::Handle>,
    pub columns: usize,
    pub status: Status,
    /// Placeholder text when `status` is [`Status::ScanFailed`].
    pub error_message: Option<&'a str>,
}

/// Index range of tiles whose row is inside the viewport plus the prefetch
/// margin. This is what makes thumbnail fetching lazy: only tiles in this
/// range are ever requested.
pub fn near_visible_range(
    offset_y: f32,
    viewport_height: f32,
    columns: usize,
    total: usize,
) -> Range<usize> {
    if total == 0 || columns == 0 {
        return 0..0;
    }

    let first_visible_row = (offset_y.max(0.0) / ROW_PITCH) as usize;
    let visible_rows = (viewport_height.max(0.0) / ROW_PITCH).ceil() as usize + 1;

    let start_row = first_visible_row.saturating_sub(PREFETCH_ROWS);
    let end_row = first_visible_row + visible_rows + PREFETCH_ROWS;

    let start = (start_row * columns).min(total);
    let end = (end_row * columns).min(total);
    start..end
}

/// Renders the grid area for the given context.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    match ctx.status {
        Status::Scanning => centered_notice("Loading photos\u{2026}"),
        Status::ScanFailed => centered_notice(
            ctx.error_message
                .unwrap_or("Could not load the photo listing."),
        ),
        Status::Ready if ctx.photos.is_empty() => centered_notice("No photos in this category."),
        Status::Ready => photo_grid(ctx),
    }
}

fn centered_notice<'a>(message: &'a str) -> Element<'a, Message> {
    Container::new(Text::new(message).size(typography::BODY).color(palette::GRAY_200))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

fn photo_grid<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let columns = ctx.columns.max(1);
    let mut grid = Column::new().spacing(spacing::XS);

    for row_photos in ctx.photos.chunks(columns) {
        let mut row = Row::new().spacing(spacing::XS);
        for photo in row_photos {
            row = row.push(tile(photo, ctx.thumbnails.get(&photo.path)));
        }
        grid = grid.push(row);
    }

    scrollable(
        Container::new(grid)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .padding(spacing::SM),
    )
    .id(iced::widget::Id::new(GRID_SCROLLABLE_ID))
    .width(Length::Fill)
    .height(Length::Fill)
    .on_scroll(|viewport| Message::Scrolled {
        offset_y: viewport.absolute_offset().y,
        viewport_height: viewport.bounds().height,
    })
    .into()
}

fn tile<'a>(
    photo: &Photo,
    thumbnail: Option<&iced::widget::image::Handle>,
) -> Element<'a, Message> {
    let content: Element<'a, Message> = match thumbnail {
        Some(handle) => iced::widget::image(handle.clone())
            .width(Length::Fixed(sizing::GRID_TILE))
            .height(Length::Fixed(sizing::GRID_TILE))
            .content_fit(iced::ContentFit::Cover)
            .into(),
        None => Container::new(Column::new())
            .width(Length::Fixed(sizing::GRID_TILE))
            .height(Length::Fixed(sizing::GRID_TILE))
            .style(styles::container::tile_placeholder)
            .into(),
    };

    button(content)
        .style(styles::button::tile)
        .padding(0)
        .on_press(Message::PhotoClicked(photo.clone()))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_visible_range_is_empty_for_no_photos() {
        assert_eq!(near_visible_range(0.0, 600.0, 4, 0), 0..0);
    }

    #[test]
    fn near_visible_range_starts_at_zero_before_any_scroll() {
        let range = near_visible_range(0.0, 600.0, 4, 1000);
        assert_eq!(range.start, 0);
        assert!(range.end > 0);
        // Viewport of ~3 rows, +1 rounding row, +2 prefetch rows, 4 columns.
        assert!(range.end <= 4 * (3 + 1 + 1 + PREFETCH_ROWS));
    }

    #[test]
    fn near_visible_range_moves_with_the_scroll_offset() {
        // Both offsets sit away from the clamped edges, so the spans match.
        let upper = near_visible_range(10.0 * ROW_PITCH, 600.0, 4, 10_000);
        let lower = near_visible_range(50.0 * ROW_PITCH, 600.0, 4, 10_000);
        assert!(lower.start > upper.start);
        assert_eq!(lower.end - lower.start, upper.end - upper.start);
    }

    #[test]
    fn near_visible_range_includes_the_prefetch_margin_above() {
        let range = near_visible_range(10.0 * ROW_PITCH, 600.0, 4, 10_000);
        assert_eq!(range.start, (10 - PREFETCH_ROWS) * 4);
    }

    #[test]
    fn near_visible_range_is_clamped_to_the_photo_count() {
        let range = near_visible_range(0.0, 10_000.0, 4, 10);
        assert_eq!(range, 0..10);

        let past_end = near_visible_range(1_000.0 * ROW_PITCH, 600.0, 4, 10);
        assert_eq!(past_end, 10..10);
    }

    #[test]
    fn near_visible_range_handles_zero_columns() {
        assert_eq!(near_visible_range(0.0, 600.0, 0, 10), 0..0);
    }
}
