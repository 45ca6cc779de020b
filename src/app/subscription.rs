// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Keyboard events are forwarded as raw events and gated on the lightbox
//! being open inside the update loop, so the bindings are only ever active
//! in that state. The spinner tick subscription exists only while an image
//! is actually loading.

use super::{App, Message};
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Interval of the spinner animation tick.
const SPINNER_TICK: Duration = Duration::from_millis(16);

pub fn create(app: &App) -> Subscription<Message> {
    let mut subscriptions = vec![event::listen_with(|event, status, _window| match &event {
        event::Event::Window(window::Event::Resized(_)) => Some(Message::RawEvent(event.clone())),
        event::Event::Keyboard(_) => match status {
            event::Status::Ignored => Some(Message::RawEvent(event.clone())),
            event::Status::Captured => None,
        },
        _ => None,
    })];

    if app.lightbox.is_loading() {
        subscriptions.push(time::every(SPINNER_TICK).map(|_| Message::SpinnerTick));
    }

    Subscription::batch(subscriptions)
}
