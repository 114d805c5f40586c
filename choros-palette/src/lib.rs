#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod catalog;
pub mod definition;
mod error;
mod palette;
mod sampler;
mod suitability;
mod types;

pub use catalog::PaletteCatalog;
pub use error::{PaletteError, PaletteResult};
pub use palette::{BrewerPalette, ColorPalette, parse_hex, to_hex};
pub use sampler::{MAX_SAMPLE_CLASSES, MIN_SAMPLE_CLASSES, SampleScheme};
pub use suitability::{
    MAX_SUITABILITY_CLASSES, MIN_SUITABILITY_CLASSES, PaletteSuitability, Suitability, Viewer,
    ViewerSet,
};
pub use types::PaletteType;

/// The color value type used throughout the crate.
pub use rgb::RGB8;
