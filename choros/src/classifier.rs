//! Classifications of a feature attribute.
//!
//! A classifier partitions attribute values into ordered classes,
//! either by numeric range or by explicit value sets. Class boundaries
//! are supplied by the caller; nothing here computes breaks.

use itertools::Itertools as _;
use serde::Serialize;

use crate::filter::Value;

/// One ranged class: `[min, max)`, except the classifier's last class
/// which is `[min, max]`. An absent bound leaves that side unbounded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RangedClass {
    /// Inclusive lower bound.
    pub min: Option<Value>,
    /// Upper bound; exclusive except on the last class.
    pub max: Option<Value>,
    /// Human-readable class title.
    pub title: String,
}

impl RangedClass {
    /// A class with both bounds.
    #[must_use]
    pub fn new(
        min: Option<Value>,
        max: Option<Value>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            min,
            max,
            title: title.into(),
        }
    }

    /// A numeric class `[min, max)`.
    #[must_use]
    pub fn numeric(min: f64, max: f64, title: impl Into<String>) -> Self {
        Self::new(Some(Value::Number(min)), Some(Value::Number(max)), title)
    }
}

/// An ordered sequence of ranged classes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RangedClassifier {
    classes: Vec<RangedClass>,
}

impl RangedClassifier {
    /// Wraps the given classes.
    #[must_use]
    pub fn new(classes: Vec<RangedClass>) -> Self {
        Self { classes }
    }

    /// The classes in order.
    #[must_use]
    pub fn classes(&self) -> &[RangedClass] {
        &self.classes
    }

    /// The index of the class containing `value`: lower bound
    /// inclusive, upper bound exclusive except on the last class.
    #[must_use]
    pub fn classify(&self, value: &Value) -> Option<usize> {
        let last = self.classes.len().checked_sub(1)?;
        self.classes.iter().enumerate().find_map(|(i, class)| {
            let above_min = class.min.as_ref().is_none_or(|min| value >= min);
            let below_max = class.max.as_ref().is_none_or(|max| {
                if i == last { value <= max } else { value < max }
            });
            (above_min && below_max).then_some(i)
        })
    }
}

/// One explicit class: a set of discrete values (possibly including
/// null).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExplicitClass {
    /// The class's values; `None` stands for null.
    pub values: Vec<Option<Value>>,
    /// Human-readable class title.
    pub title: String,
}

impl ExplicitClass {
    /// A class with an explicit title.
    #[must_use]
    pub fn titled(values: Vec<Option<Value>>, title: impl Into<String>) -> Self {
        Self {
            values,
            title: title.into(),
        }
    }

    /// A class titled from its values: string forms joined with `", "`,
    /// null rendered as `NULL`.
    #[must_use]
    pub fn new(values: Vec<Option<Value>>) -> Self {
        let title = values
            .iter()
            .map(|v| v.as_ref().map_or_else(|| "NULL".to_string(), Value::to_string))
            .join(", ");
        Self { values, title }
    }
}

/// An ordered sequence of explicit-value classes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExplicitClassifier {
    classes: Vec<ExplicitClass>,
}

impl ExplicitClassifier {
    /// Wraps the given classes.
    #[must_use]
    pub fn new(classes: Vec<ExplicitClass>) -> Self {
        Self { classes }
    }

    /// The classes in order.
    #[must_use]
    pub fn classes(&self) -> &[ExplicitClass] {
        &self.classes
    }

    /// The index of the first class containing `value` (`None` for
    /// null).
    #[must_use]
    pub fn classify(&self, value: Option<&Value>) -> Option<usize> {
        self.classes
            .iter()
            .position(|class| class.values.iter().any(|v| v.as_ref() == value))
    }
}

/// A classification: ranged or explicit.
///
/// A closed sum type; the generator matches exhaustively, so there is
/// no unrecognized-variant path.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Classifier {
    /// Numeric (or otherwise ordered) ranges.
    Ranged(RangedClassifier),
    /// Explicit value sets.
    Explicit(ExplicitClassifier),
}

impl Classifier {
    /// The number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Ranged(c) => c.classes.len(),
            Self::Explicit(c) => c.classes.len(),
        }
    }

    /// Whether the classification has no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The title of class `i`.
    #[must_use]
    pub fn title(&self, i: usize) -> Option<&str> {
        match self {
            Self::Ranged(c) => c.classes.get(i).map(|class| class.title.as_str()),
            Self::Explicit(c) => c.classes.get(i).map(|class| class.title.as_str()),
        }
    }

    /// The index of the class containing `value`, using the same
    /// boundary rule as the generated filters.
    #[must_use]
    pub fn classify(&self, value: Option<&Value>) -> Option<usize> {
        match self {
            Self::Ranged(c) => value.and_then(|v| c.classify(v)),
            Self::Explicit(c) => c.classify(value),
        }
    }
}
