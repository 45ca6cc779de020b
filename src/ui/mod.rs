// SPDX-License-Identifier: MPL-2.0
//! UI components: the category bar, the thumbnail grid, the lightbox, and
//! their shared styling.

pub mod category_bar;
pub mod design_tokens;
pub mod gallery_grid;
pub mod lightbox;
pub mod styles;
pub mod widgets;
