//! LovelyComposer song documents

pub mod document;
pub mod reader;

pub use document::{Bar, Channel, Song, Voice};
