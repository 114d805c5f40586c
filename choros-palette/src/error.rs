//! Error types for palette loading and lookup.

use std::path::PathBuf;

/// A convenience [`Result`] for palette operations.
pub type PaletteResult<T> = Result<T, PaletteError>;

/// Errors raised while parsing palette definition documents or
/// resolving colors from a registered palette.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum PaletteError {
    /// Definition document is not valid YAML.
    #[error(transparent)]
    InvalidDocument(#[from] serde_yaml::Error),

    /// I/O error reading a definition document.
    #[error("IO error {0}: {1}")]
    IoError(#[source] std::io::Error, PathBuf),

    /// A color group in a definition document is not `R,G,B` with
    /// components in `0..=255`.
    #[error("Invalid color {value:?} in palette {palette}")]
    InvalidColor {
        /// The offending color group text.
        value: String,
        /// Name of the palette being parsed.
        palette: String,
    },

    /// A suitability row did not contain exactly 6 viewer codes.
    #[error("Suitability for {classes} classes needs exactly 6 codes, got {got}")]
    BadSuitabilityRow {
        /// Class count the row was declared for.
        classes: usize,
        /// Number of codes actually supplied.
        got: usize,
    },

    /// A suitability or sample row was declared for an unsupported
    /// class count.
    #[error("Class count {0} is outside the supported range {1}..={2}")]
    ClassCountOutOfRange(usize, usize, usize),

    /// A sample row index is not a non-negative integer.
    #[error("Invalid sample index {0:?}")]
    InvalidIndex(String),

    /// A sample row's index list length does not match its declared size.
    #[error("Sample scheme for {classes} classes expects {classes} indices, got {got}")]
    BadSampleRow {
        /// Declared class count.
        classes: usize,
        /// Number of indices actually supplied.
        got: usize,
    },

    /// A sample row index or color request points past the palette's
    /// color ramp.
    #[error("Color index {index} is out of range for palette {palette} with {count} colors")]
    ColorIndexOutOfRange {
        /// The out-of-range index.
        index: usize,
        /// Name of the palette.
        palette: String,
        /// Number of colors the palette actually has.
        count: usize,
    },

    /// The palette has no sampling entry for the requested class count.
    #[error("Palette {palette} cannot provide {requested} colors")]
    UnsupportedClassCount {
        /// Name of the palette.
        palette: String,
        /// The unsupported class count.
        requested: usize,
    },
}
