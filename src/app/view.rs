// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.

use super::{App, Message};
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::widgets::ScrollGuard;
use crate::ui::{category_bar, gallery_grid};
use iced::widget::{Column, Container, Stack, Text};
use iced::{Element, Length};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let header = Container::new(
            Text::new("Iced Gallery")
                .size(typography::TITLE_MD)
                .color(palette::GRAY_200),
        )
        .padding([spacing::SM, spacing::SM]);

        let mut base = Column::new().push(header);

        if self.grid_status == gallery_grid::Status::Ready {
            base = base.push(
                category_bar::view(&self.categories, &self.current_category)
                    .map(Message::CategoryBar),
            );
        }

        let grid = gallery_grid::view(gallery_grid::ViewContext {
            photos: &self.current_photos,
            thumbnails: &self.thumbnails,
            columns: self.columns(),
            status: self.grid_status,
            error_message: self.scan_error_message.as_deref(),
        })
        .map(Message::Grid);

        base = base.push(
            Container::new(grid)
                .width(Length::Fill)
                .height(Length::Fill),
        );

        // The guard keeps the grid mounted (and its scroll position intact)
        // while suppressing background scrolling for as long as the lightbox
        // is open.
        let base: Element<'_, Message> = ScrollGuard::new(
            base.width(Length::Fill).height(Length::Fill),
        )
        .lock(self.lightbox.is_open())
        .into();

        if self.lightbox.is_open() {
            Stack::new()
                .push(base)
                .push(self.lightbox.view().map(Message::Lightbox))
                .into()
        } else {
            base
        }
    }
}
