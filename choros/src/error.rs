//! Error types for style generation, expression conversion and palette
//! evaluation.

use choros_palette::PaletteError;

/// A convenience [`Result`] for the crate's aggregated error.
pub type ChorosResult<T> = Result<T, ChorosError>;
/// A convenience [`Result`] for style generation.
pub type StyleResult<T> = Result<T, StyleError>;
/// A convenience [`Result`] for style-expression conversion.
pub type ExpressionResult<T> = Result<T, ExpressionError>;
/// A convenience [`Result`] for palette function evaluation.
pub type FunctionResult<T> = Result<T, FunctionError>;

/// Errors raised by the style generator.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum StyleError {
    /// Fewer colors than the classification needs.
    #[error("Classification needs {required} colors but only {got} were supplied")]
    NotEnoughColors {
        /// Colors required: one per class, plus one when an else rule is
        /// requested.
        required: usize,
        /// Colors actually supplied.
        got: usize,
    },
}

/// Errors raised by the style-expression codec. All are local
/// validation failures of the text or filter shape at hand.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ExpressionError {
    /// Ranged text did not split into exactly a min and a max.
    #[error("Ranged expression {0:?} must have the form min..max")]
    MalformedRange(String),

    /// A conjunction filter did not have exactly two children.
    #[error("Ranged filter must be a conjunction of exactly 2 comparisons, found {0} children")]
    WrongChildCount(usize),

    /// A comparison child had an unexpected operator or sides.
    #[error("Comparison does not relate an attribute to a literal bound")]
    UnexpectedComparison,

    /// The two comparison children were both lower or both upper
    /// bounds.
    #[error("Conjunction does not combine a lower and an upper bound")]
    UnchainedBounds,

    /// The filter kind has no style-expression form.
    #[error("Unsupported filter for conversion: {0}")]
    UnsupportedFilter(&'static str),
}

/// Errors raised by the per-feature palette function.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum FunctionError {
    /// The configured palette name is not registered.
    #[error("Palette {0} is not registered in the catalog")]
    PaletteNotFound(String),

    /// The feature's value fell outside every class.
    #[error("Value {1:?} of attribute {0} matches no class")]
    NoMatchingClass(String, String),

    /// The classifier produced an index past the color slice.
    #[error("Class index {index} is out of range for {classes} classes")]
    ClassOutOfRange {
        /// The resolved class index.
        index: usize,
        /// Number of classes (and colors) available.
        classes: usize,
    },

    /// The palette could not supply the classification's color count.
    #[error(transparent)]
    Palette(#[from] PaletteError),
}

/// Aggregated error for callers that funnel everything into one type.
#[non_exhaustive]
#[derive(thiserror::Error, Debug)]
pub enum ChorosError {
    /// Style generation failed.
    #[error(transparent)]
    Style(#[from] StyleError),

    /// Expression conversion failed.
    #[error(transparent)]
    Expression(#[from] ExpressionError),

    /// Palette function evaluation failed.
    #[error(transparent)]
    Function(#[from] FunctionError),

    /// Palette loading or lookup failed.
    #[error(transparent)]
    Palette(#[from] PaletteError),
}
