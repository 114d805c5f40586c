#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod classifier;
mod error;
pub mod expression;
mod filter;
mod function;
mod generator;
mod style;

pub use classifier::{
    Classifier, ExplicitClass, ExplicitClassifier, RangedClass, RangedClassifier,
};
pub use error::{
    ChorosError, ChorosResult, ExpressionError, ExpressionResult, FunctionError, FunctionResult,
    StyleError, StyleResult,
};
pub use filter::{CompareOp, Expr, Feature, Filter, Value};
pub use function::PaletteFunction;
pub use generator::{ElseMode, StyleGenerator};
pub use style::{Fill, FeatureTypeStyle, GeometryKind, Mark, Rule, Stroke, Symbolizer};
