//! Tabbed page controller with hue-rotated accent colours and an
//! auto-advancing carousel.
//!
//! Decision logic ([`tabs`], [`scroll`], [`carousel`]) is pure; [`page::Page`]
//! applies it to any [`document::Document`]. Time enters only through a
//! [`schedule::Scheduler`].

pub mod accents;
pub mod carousel;
pub mod cli;
pub mod color;
pub mod config;
pub mod document;
pub mod event;
pub mod logging;
pub mod page;
pub mod schedule;
pub mod scroll;
pub mod tabs;
