// SPDX-License-Identifier: MPL-2.0
//! Animated loading spinner drawn on a Canvas.

use crate::ui::design_tokens::{palette, sizing};
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};

const STROKE_WIDTH: f32 = 3.0;

/// Sweep of the animated arc (three quarters of a turn).
const ARC_SWEEP: f32 = 1.5 * PI;

/// Spinner whose arc rotates with the angle supplied on each tick.
pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32,
    color: Color,
    size: f32,
}

impl AnimatedSpinner {
    /// Creates a spinner at the given rotation angle in radians.
    #[must_use]
    pub fn new(rotation: f32) -> Self {
        Self {
            cache: Cache::default(),
            rotation: rotation % TAU,
            color: palette::WHITE,
            size: sizing::ICON_XL,
        }
    }

    /// Wraps the spinner into a Canvas element.
    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let size = self.size;
        Canvas::new(self)
            .width(Length::Fixed(size))
            .height(Length::Fixed(size))
            .into()
    }

    fn point_at(center: Point, radius: f32, angle: f32) -> Point {
        Point::new(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let radius = frame.width().min(frame.height()) / 2.0 - STROKE_WIDTH;
                let start = self.rotation - PI / 2.0;

                // Approximate the arc with short line segments.
                let segments = 36;
                let mut path = canvas::path::Builder::new();
                path.move_to(Self::point_at(center, radius, start));
                for i in 1..=segments {
                    let angle = start + ARC_SWEEP * (i as f32 / segments as f32);
                    path.line_to(Self::point_at(center, radius, angle));
                }

                frame.stroke(
                    &path.build(),
                    Stroke::default()
                        .with_width(STROKE_WIDTH)
                        .with_color(self.color)
                        .with_line_cap(canvas::LineCap::Round),
                );
            });

        vec![geometry]
    }
}
