// SPDX-License-Identifier: MPL-2.0
//! `iced_gallery` is a categorized photo-gallery viewer built with the Iced
//! GUI framework.
//!
//! It lists a remote photo collection through a repository-content API,
//! groups the photos into categories derived from directory structure, and
//! displays them as a filterable thumbnail grid with a lightbox overlay.
//! The companion `strip-metadata` binary removes image metadata for use from
//! a pre-commit hook.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod media;
pub mod source;
pub mod ui;
