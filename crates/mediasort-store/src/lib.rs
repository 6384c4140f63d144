//! Preset persistence for mediasort.
//!
//! Presets live in a small line-oriented text file, one preset per line:
//!
//! ```text
//! card|src::/Volumes/EOS_DIGITAL|dst::/home/me/Pictures/Import
//! ```
//!
//! Every mutation rewrites the whole file. Reading is lenient: malformed
//! lines are dropped instead of failing the load (see [`codec::parse_line`]).
//!
//! # Example
//!
//! ```rust,no_run
//! use mediasort_core::Preset;
//! use mediasort_store::PresetStore;
//!
//! let store = PresetStore::open_default().unwrap();
//! store.add(Preset::new("card", "/Volumes/CARD", "/home/me/Import")).unwrap();
//!
//! for preset in store.load().unwrap() {
//!     println!("{} -> {}", preset.source.display(), preset.destination.display());
//! }
//! ```

pub mod codec;
mod error;
mod store;

pub use error::StoreError;
pub use store::PresetStore;
