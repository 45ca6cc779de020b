// SPDX-License-Identifier: MPL-2.0
//! Container styles.

use crate::ui::design_tokens::{opacity, palette, radius};
use iced::widget::container;
use iced::{Background, Border, Color, Theme};

/// Dimmed backdrop behind the lightbox. Strong enough that the grid beneath
/// reads as inactive.
pub fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(Color {
            a: opacity::BACKDROP,
            ..palette::BLACK
        })),
        ..container::Style::default()
    }
}

/// Neutral surface shown while a thumbnail has not arrived yet.
pub fn tile_placeholder(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(palette::GRAY_900)),
        border: Border {
            color: palette::GRAY_700,
            width: 1.0,
            radius: radius::SM.into(),
        },
        ..container::Style::default()
    }
}

/// Pill behind the lightbox counter text.
pub fn counter(_theme: &Theme) -> container::Style {
    container::Style {
        text_color: Some(palette::WHITE),
        background: Some(Background::Color(Color {
            a: opacity::OVERLAY_MEDIUM,
            ..palette::BLACK
        })),
        border: Border {
            radius: radius::MD.into(),
            ..Border::default()
        },
        ..container::Style::default()
    }
}
