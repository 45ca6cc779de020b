// SPDX-License-Identifier: MPL-2.0
//! Category filter bar rendered above the grid.
//!
//! Buttons carry the canonical category key; the capitalized label is only
//! ever displayed, so activation never has to match display text back to a
//! key.

use crate::catalog::Category;
use crate::ui::design_tokens::{spacing, typography};
use crate::ui::styles;
use iced::widget::{button, Row, Text};
use iced::Element;

/// Messages emitted by the category bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    CategorySelected(String),
}

/// Renders one button per category, highlighting the active one.
pub fn view<'a>(categories: &'a [Category], current_key: &str) -> Element<'a, Message> {
    let mut row = Row::new().spacing(spacing::XS);
    for category in categories {
        let active = category.key == current_key;
        row = row.push(
            button(Text::new(category.label.as_str()).size(typography::BODY))
                .style(styles::button::category(active))
                .padding([spacing::XXS, spacing::SM])
                .on_press(Message::CategorySelected(category.key.clone())),
        );
    }
    row.padding(spacing::SM).into()
}
