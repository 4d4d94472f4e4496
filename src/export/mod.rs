//! Rendering assembled outlines.
//!
//! - [`render_text`]: indented plain-text outline
//! - [`render_ncx`]: NCX `navMap` document, as used by EPUB 2 readers
//!
//! JSON output comes from the `serde::Serialize` derive on
//! [`InfoNode`](crate::InfoNode) when the `cli` feature is enabled.

mod ncx;
mod text;

pub use ncx::render_ncx;
pub use text::render_text;
