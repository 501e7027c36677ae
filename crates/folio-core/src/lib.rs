//! Core of the folio portfolio viewer.
//!
//! Everything here is independent of the GUI toolkit: the viewport section
//! tracker and its frame gate, the article feed consumer, the content
//! provider and the configuration layer. The binary crate mounts these on an
//! `iced` event loop.

pub mod config;
pub mod content;
pub mod error;
pub mod feed;
pub mod tracker;
