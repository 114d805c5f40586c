//! A small, owned filter algebra.
//!
//! Stands in for the host's filter object model: comparisons, null
//! checks, and logical combinations over feature attributes, with
//! enough structural introspection for the style-expression codec. A
//! host with its own filter tree can translate from this one; the
//! generator and codec only ever produce or consume these shapes.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

/// A literal attribute value: numeric or textual.
///
/// Numbers order by [`f64::total_cmp`] and sort before text, giving the
/// type the total order the classifier and codec need. Integral numbers
/// display without a trailing `.0` so generated expressions read as
/// `"1..5"` rather than `"1.0..5.0"`; comparison semantics are
/// unaffected.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A numeric value.
    Number(f64),
    /// A textual value.
    Text(String),
}

impl Value {
    /// Parses a token: numeric when it reads as a float, text otherwise.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        token
            .parse::<f64>()
            .map_or_else(|_| Self::Text(token.to_string()), Self::Number)
    }

    /// The value as a number, if it is one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => {
                // Render integral values without the trailing `.0`.
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

/// One side of a comparison: a named attribute or a literal.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Expr {
    /// A feature attribute reference.
    Property(String),
    /// A literal value.
    Literal(Value),
}

impl Expr {
    /// An attribute reference.
    #[must_use]
    pub fn property(name: impl Into<String>) -> Self {
        Self::Property(name.into())
    }

    /// A literal value.
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    /// The attribute name, if this side is a property reference.
    #[must_use]
    pub fn property_name(&self) -> Option<&str> {
        match self {
            Self::Property(name) => Some(name),
            Self::Literal(_) => None,
        }
    }

    fn resolve<'a>(&'a self, feature: &'a Feature) -> Option<&'a Value> {
        match self {
            Self::Property(name) => feature.get(name),
            Self::Literal(value) => Some(value),
        }
    }
}

/// Comparison operators the filter algebra supports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `<`
    Less,
    /// `<=`
    LessOrEq,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEq,
}

impl CompareOp {
    fn test(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Less => ordering == Ordering::Less,
            Self::LessOrEq => ordering != Ordering::Greater,
            Self::Greater => ordering == Ordering::Greater,
            Self::GreaterOrEq => ordering != Ordering::Less,
        }
    }
}

/// A filter predicate tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Filter {
    /// A binary comparison between two expressions.
    Compare {
        /// The operator.
        op: CompareOp,
        /// Left-hand side.
        left: Expr,
        /// Right-hand side.
        right: Expr,
    },
    /// True when the attribute is null or missing.
    IsNull(Expr),
    /// Logical conjunction.
    And(Vec<Filter>),
    /// Logical disjunction.
    Or(Vec<Filter>),
}

impl Filter {
    /// `attr = value`
    #[must_use]
    pub fn equals(attr: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(CompareOp::Eq, attr, value)
    }

    /// `attr < value`
    #[must_use]
    pub fn less(attr: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(CompareOp::Less, attr, value)
    }

    /// `attr <= value`
    #[must_use]
    pub fn less_or_equal(attr: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(CompareOp::LessOrEq, attr, value)
    }

    /// `attr >= value`
    #[must_use]
    pub fn greater_or_equal(attr: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(CompareOp::GreaterOrEq, attr, value)
    }

    /// `attr is null`
    #[must_use]
    pub fn is_null(attr: impl Into<String>) -> Self {
        Self::IsNull(Expr::property(attr))
    }

    /// Conjunction of two filters.
    #[must_use]
    pub fn and(a: Self, b: Self) -> Self {
        Self::And(vec![a, b])
    }

    /// Disjunction of the given filters.
    #[must_use]
    pub fn or(filters: Vec<Self>) -> Self {
        Self::Or(filters)
    }

    fn compare(op: CompareOp, attr: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::Compare {
            op,
            left: Expr::property(attr),
            right: Expr::literal(value),
        }
    }

    /// Evaluates the filter against a feature's attributes.
    ///
    /// A comparison against a missing or null attribute is false;
    /// [`Filter::IsNull`] is the only predicate matching such features.
    #[must_use]
    pub fn matches(&self, feature: &Feature) -> bool {
        match self {
            Self::Compare { op, left, right } => {
                match (left.resolve(feature), right.resolve(feature)) {
                    (Some(a), Some(b)) => op.test(a.cmp(b)),
                    _ => false,
                }
            }
            Self::IsNull(expr) => expr.resolve(feature).is_none(),
            Self::And(children) => children.iter().all(|c| c.matches(feature)),
            Self::Or(children) => children.iter().any(|c| c.matches(feature)),
        }
    }
}

/// A minimal feature: a map of attribute names to nullable values.
///
/// Narrow stand-in for the host's feature model; only what filter
/// evaluation and the palette function need.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Feature {
    attributes: HashMap<String, Option<Value>>,
}

impl Feature {
    /// An empty feature.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), Some(value.into()));
        self
    }

    /// Adds an explicitly null attribute, builder style.
    #[must_use]
    pub fn with_null(mut self, name: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), None);
        self
    }

    /// The attribute's value; `None` for null or missing attributes.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).and_then(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Value::Number(5.0), "5")]
    #[case(Value::Number(5.5), "5.5")]
    #[case(Value::Number(-3.0), "-3")]
    #[case(Value::Number(0.25), "0.25")]
    #[case(Value::Text("LIB".into()), "LIB")]
    fn value_display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[test]
    fn value_ordering_is_total() {
        let mut values = vec![
            Value::from("b"),
            Value::from(2.0),
            Value::from("a"),
            Value::from(-1.0),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::from(-1.0),
                Value::from(2.0),
                Value::from("a"),
                Value::from("b"),
            ]
        );
    }

    #[test]
    fn parse_prefers_numbers() {
        assert_eq!(Value::parse("4.5"), Value::Number(4.5));
        assert_eq!(Value::parse("NDP"), Value::Text("NDP".into()));
    }

    #[test]
    fn comparison_matching() {
        let feature = Feature::new().with("x", 5.0);
        assert!(Filter::equals("x", 5.0).matches(&feature));
        assert!(Filter::greater_or_equal("x", 5.0).matches(&feature));
        assert!(Filter::less_or_equal("x", 5.0).matches(&feature));
        assert!(!Filter::less("x", 5.0).matches(&feature));
        assert!(Filter::less("x", 6.0).matches(&feature));
    }

    #[test]
    fn and_or_matching() {
        let feature = Feature::new().with("x", 5.0);
        let range = Filter::and(
            Filter::greater_or_equal("x", 0.0),
            Filter::less("x", 10.0),
        );
        assert!(range.matches(&feature));

        let choice = Filter::or(vec![Filter::equals("x", 1.0), Filter::equals("x", 5.0)]);
        assert!(choice.matches(&feature));
        assert!(!Filter::or(vec![Filter::equals("x", 1.0)]).matches(&feature));
    }

    #[test]
    fn null_handling() {
        let feature = Feature::new().with_null("x");
        assert!(Filter::is_null("x").matches(&feature));
        assert!(Filter::is_null("missing").matches(&feature));
        assert!(!Filter::equals("x", 5.0).matches(&feature));

        let present = Feature::new().with("x", 5.0);
        assert!(!Filter::is_null("x").matches(&present));
    }
}
