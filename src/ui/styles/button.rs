// SPDX-License-Identifier: MPL-2.0
//! Centralized button styles.

use crate::ui::design_tokens::{
    opacity,
    palette::{self, BLACK, WHITE},
    radius,
};
use iced::widget::button;
use iced::{Background, Border, Color, Shadow, Theme};

/// Style for a category filter button. The active category is highlighted.
pub fn category(active: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let background = if active {
            palette::PRIMARY_500
        } else {
            match status {
                button::Status::Hovered => palette::GRAY_700,
                _ => palette::GRAY_900,
            }
        };

        button::Style {
            background: Some(Background::Color(background)),
            text_color: WHITE,
            border: Border {
                color: if active {
                    palette::PRIMARY_600
                } else {
                    palette::GRAY_700
                },
                width: 1.0,
                radius: radius::SM.into(),
            },
            shadow: Shadow::default(),
            snap: true,
        }
    }
}

/// Style for overlay buttons (lightbox navigation and close).
pub fn overlay(
    text_color: Color,
    alpha_normal: f32,
    alpha_hover: f32,
) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let alpha = match status {
            button::Status::Hovered => alpha_hover,
            button::Status::Pressed => opacity::OVERLAY_PRESSED,
            _ => alpha_normal,
        };

        button::Style {
            background: Some(Background::Color(Color { a: alpha, ..BLACK })),
            text_color,
            border: Border {
                radius: radius::MD.into(),
                ..Border::default()
            },
            shadow: Shadow::default(),
            snap: true,
        }
    }
}

/// Style for a grid tile: no chrome at all, the thumbnail is the button.
pub fn tile(_theme: &Theme, status: button::Status) -> button::Style {
    let border = match status {
        button::Status::Hovered => Border {
            color: palette::PRIMARY_400,
            width: 2.0,
            radius: radius::SM.into(),
        },
        _ => Border {
            radius: radius::SM.into(),
            ..Border::default()
        },
    };

    button::Style {
        background: Some(Background::Color(palette::GRAY_900)),
        text_color: WHITE,
        border,
        shadow: Shadow::default(),
        snap: true,
    }
}
