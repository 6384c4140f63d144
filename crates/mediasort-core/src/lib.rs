//! Core types for mediasort.
//!
//! This crate provides the data structures shared by the store, the
//! migration engine and the terminal interface: presets, the media
//! category classifier and validation errors.

mod category;
mod error;
mod preset;

pub use category::{Category, classify};
pub use error::ValidationError;
pub use preset::Preset;
