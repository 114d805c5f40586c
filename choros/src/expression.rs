//! The style-expression codec.
//!
//! Converts between the compact textual notation for class boundaries
//! and filter predicate trees, in both directions:
//!
//! - ranged: `"min..max"`, either side empty for unbounded;
//! - explicit: `"v1, v2, ..."`, comma separated.
//!
//! Both directions have strict shape expectations; anything else is a
//! local validation failure, not a system fault.

use crate::error::{ExpressionError, ExpressionResult};
use crate::filter::{CompareOp, Expr, Filter, Value};
use crate::style::Rule;

/// Which side of a range a comparison pins down.
#[derive(Debug, PartialEq)]
enum Bound<'a> {
    Lower(&'a Value),
    Upper(&'a Value),
}

/// Interprets one comparison as a range bound, based on which side the
/// attribute sits on and the comparison direction.
fn bound_of(filter: &Filter) -> ExpressionResult<Bound<'_>> {
    let Filter::Compare { op, left, right } = filter else {
        return Err(ExpressionError::UnexpectedComparison);
    };
    match (op, left, right) {
        // attr < max / attr <= max
        (CompareOp::Less | CompareOp::LessOrEq, Expr::Property(_), Expr::Literal(v)) => {
            Ok(Bound::Upper(v))
        }
        // min < attr / min <= attr
        (CompareOp::Less | CompareOp::LessOrEq, Expr::Literal(v), Expr::Property(_)) => {
            Ok(Bound::Lower(v))
        }
        // attr > min / attr >= min
        (CompareOp::Greater | CompareOp::GreaterOrEq, Expr::Property(_), Expr::Literal(v)) => {
            Ok(Bound::Lower(v))
        }
        // max > attr / max >= attr
        (CompareOp::Greater | CompareOp::GreaterOrEq, Expr::Literal(v), Expr::Property(_)) => {
            Ok(Bound::Upper(v))
        }
        _ => Err(ExpressionError::UnexpectedComparison),
    }
}

/// Collects the literal text fragments of an explicit filter,
/// recursively flattening disjunctions.
fn collect_explicit(filter: &Filter, out: &mut Vec<String>) -> ExpressionResult<()> {
    match filter {
        Filter::Or(children) => {
            for child in children {
                collect_explicit(child, out)?;
            }
            Ok(())
        }
        Filter::Compare {
            op: CompareOp::Eq,
            left,
            right,
        } => {
            let literal = match (left, right) {
                (Expr::Literal(v), _) | (_, Expr::Literal(v)) => v,
                _ => return Err(ExpressionError::UnexpectedComparison),
            };
            out.push(literal.to_string());
            Ok(())
        }
        Filter::IsNull(_) => {
            out.push("NULL".to_string());
            Ok(())
        }
        Filter::Compare { .. } => Err(ExpressionError::UnsupportedFilter("comparison")),
        Filter::And(_) => Err(ExpressionError::UnsupportedFilter("conjunction")),
    }
}

/// Renders a filter back into its compact textual form.
///
/// A conjunction of exactly two comparisons reads as a range; a
/// disjunction, single equality or null check reads as an explicit
/// value list.
pub fn style_expression(filter: &Filter) -> ExpressionResult<String> {
    match filter {
        Filter::And(children) => {
            if children.len() != 2 {
                return Err(ExpressionError::WrongChildCount(children.len()));
            }
            match (bound_of(&children[0])?, bound_of(&children[1])?) {
                (Bound::Lower(min), Bound::Upper(max))
                | (Bound::Upper(max), Bound::Lower(min)) => Ok(format!("{min}..{max}")),
                _ => Err(ExpressionError::UnchainedBounds),
            }
        }
        Filter::Or(_) | Filter::Compare { op: CompareOp::Eq, .. } | Filter::IsNull(_) => {
            let mut fragments = Vec::new();
            collect_explicit(filter, &mut fragments)?;
            Ok(fragments.join(", "))
        }
        Filter::Compare { .. } => Err(ExpressionError::UnsupportedFilter("comparison")),
    }
}

/// Parses ranged text into an interval filter over `attr`.
///
/// The upper bound is exclusive unless `upper_bound_closed`; closing it
/// is used for a class whose maximum is not shared with a neighbouring
/// class's lower bound.
pub fn ranged_filter(
    text: &str,
    attr: &str,
    upper_bound_closed: bool,
) -> ExpressionResult<Filter> {
    let parts: Vec<&str> = text.split("..").collect();
    let [min, max] = parts.as_slice() else {
        return Err(ExpressionError::MalformedRange(text.to_string()));
    };

    let lower = (!min.is_empty()).then(|| Filter::greater_or_equal(attr, Value::parse(min)));
    let upper = (!max.is_empty()).then(|| {
        if upper_bound_closed {
            Filter::less_or_equal(attr, Value::parse(max))
        } else {
            Filter::less(attr, Value::parse(max))
        }
    });

    match (lower, upper) {
        (Some(lower), Some(upper)) => Ok(Filter::and(lower, upper)),
        (Some(single), None) | (None, Some(single)) => Ok(single),
        (None, None) => Err(ExpressionError::MalformedRange(text.to_string())),
    }
}

/// Parses explicit text into a membership filter over `attr`: one
/// equality per comma-separated token, disjoined when there are
/// several. One leading space is trimmed per separator.
pub fn explicit_filter(text: &str, attr: &str) -> ExpressionResult<Filter> {
    let mut predicates: Vec<Filter> = text
        .split(',')
        .enumerate()
        .map(|(i, token)| {
            let token = if i > 0 {
                token.strip_prefix(' ').unwrap_or(token)
            } else {
                token
            };
            Filter::equals(attr, Value::parse(token))
        })
        .collect();

    if predicates.len() == 1 {
        Ok(predicates.remove(0))
    } else {
        Ok(Filter::Or(predicates))
    }
}

/// Builds one filter per expression, over the whole batch at once.
///
/// An expression containing `..` is ranged, anything else explicit. A
/// ranged class's upper bound stays half-open when its maximum is also
/// some class's lower bound in the same batch (so the shared boundary
/// is not double-counted), and is closed otherwise.
pub fn filters<S: AsRef<str>>(expressions: &[S], attr: &str) -> ExpressionResult<Vec<Filter>> {
    let lower_bounds: Vec<Value> = expressions
        .iter()
        .filter_map(|e| {
            let text = e.as_ref();
            let (min, _max) = text.split_once("..")?;
            (!min.is_empty()).then(|| Value::parse(min))
        })
        .collect();

    expressions
        .iter()
        .map(|e| {
            let text = e.as_ref();
            match text.split_once("..") {
                Some((_min, max)) => {
                    let closed = !max.is_empty() && !lower_bounds.contains(&Value::parse(max));
                    ranged_filter(text, attr, closed)
                }
                None => explicit_filter(text, attr),
            }
        })
        .collect()
}

/// Rewrites a rule's filter in place from new expression text,
/// preserving the attribute expression identity.
///
/// The existing filter's shape decides the parse: a conjunction of two
/// comparisons takes ranged text and only its bound literals change; a
/// disjunction or single equality takes explicit text. Mismatched
/// shapes are format errors, never silently coerced.
pub fn modify_rule_filter(rule: &mut Rule, text: &str) -> ExpressionResult<()> {
    match rule.filter.as_mut() {
        Some(Filter::And(children)) => {
            if children.len() != 2 {
                return Err(ExpressionError::WrongChildCount(children.len()));
            }
            let parts: Vec<&str> = text.split("..").collect();
            let [min, max] = parts.as_slice() else {
                return Err(ExpressionError::MalformedRange(text.to_string()));
            };
            if min.is_empty() || max.is_empty() {
                // The existing filter has two bounds; the replacement
                // must too.
                return Err(ExpressionError::MalformedRange(text.to_string()));
            }
            for child in children.iter_mut() {
                let replacement = match bound_of(child)? {
                    Bound::Lower(_) => Value::parse(min),
                    Bound::Upper(_) => Value::parse(max),
                };
                let Filter::Compare { left, right, .. } = child else {
                    return Err(ExpressionError::UnexpectedComparison);
                };
                match (&left, &right) {
                    (Expr::Literal(_), _) => *left = Expr::Literal(replacement),
                    (_, Expr::Literal(_)) => *right = Expr::Literal(replacement),
                    _ => return Err(ExpressionError::UnexpectedComparison),
                }
            }
            Ok(())
        }
        Some(existing @ (Filter::Or(_) | Filter::Compare { op: CompareOp::Eq, .. })) => {
            let attr = explicit_attribute(existing)
                .ok_or(ExpressionError::UnexpectedComparison)?
                .to_string();
            *existing = explicit_filter(text, &attr)?;
            Ok(())
        }
        Some(_) => Err(ExpressionError::UnsupportedFilter("filter shape")),
        None => Err(ExpressionError::UnsupportedFilter("else rule")),
    }
}

/// The attribute name an explicit filter compares against.
fn explicit_attribute(filter: &Filter) -> Option<&str> {
    match filter {
        Filter::Compare { left, right, .. } => {
            left.property_name().or_else(|| right.property_name())
        }
        Filter::IsNull(expr) => expr.property_name(),
        Filter::Or(children) => children.iter().find_map(explicit_attribute),
        Filter::And(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::style::{GeometryKind, Stroke, Symbolizer};

    #[rstest]
    #[case("25..50")]
    #[case("a..b")]
    #[case("-10..10.5")]
    fn ranged_round_trip(#[case] text: &str) {
        let filter = ranged_filter(text, "x", false).expect("two parts");
        assert_eq!(style_expression(&filter).expect("ranged shape"), text);
    }

    #[rstest]
    #[case("LIB, NDP")]
    #[case("4")]
    #[case("1, 2, 3")]
    fn explicit_round_trip(#[case] text: &str) {
        let filter = explicit_filter(text, "party").expect("tokens");
        assert_eq!(style_expression(&filter).expect("explicit shape"), text);
    }

    #[test]
    fn ranged_filter_shapes() {
        assert_eq!(
            ranged_filter("0..5", "x", false).expect("two parts"),
            Filter::and(Filter::greater_or_equal("x", 0.0), Filter::less("x", 5.0))
        );
        assert_eq!(
            ranged_filter("0..5", "x", true).expect("two parts"),
            Filter::and(
                Filter::greater_or_equal("x", 0.0),
                Filter::less_or_equal("x", 5.0)
            )
        );
        // Unbounded sides drop their comparison.
        assert_eq!(
            ranged_filter("..5", "x", false).expect("two parts"),
            Filter::less("x", 5.0)
        );
        assert_eq!(
            ranged_filter("0..", "x", false).expect("two parts"),
            Filter::greater_or_equal("x", 0.0)
        );
    }

    #[rstest]
    #[case("5")]
    #[case("1..2..3")]
    #[case("..")]
    fn malformed_ranged_text(#[case] text: &str) {
        assert!(matches!(
            ranged_filter(text, "x", false),
            Err(ExpressionError::MalformedRange(_))
        ));
    }

    #[test]
    fn expression_accepts_reversed_comparison_sides() {
        // 5 <= x AND 10 > x, attribute on the right of both.
        let filter = Filter::And(vec![
            Filter::Compare {
                op: CompareOp::LessOrEq,
                left: Expr::literal(5.0),
                right: Expr::property("x"),
            },
            Filter::Compare {
                op: CompareOp::Greater,
                left: Expr::literal(10.0),
                right: Expr::property("x"),
            },
        ]);
        assert_eq!(style_expression(&filter).expect("ranged shape"), "5..10");
    }

    #[test]
    fn conjunction_shape_errors() {
        let triple = Filter::And(vec![
            Filter::greater_or_equal("x", 0.0),
            Filter::less("x", 5.0),
            Filter::less("x", 6.0),
        ]);
        assert!(matches!(
            style_expression(&triple),
            Err(ExpressionError::WrongChildCount(3))
        ));

        let two_lowers = Filter::and(
            Filter::greater_or_equal("x", 0.0),
            Filter::greater_or_equal("x", 5.0),
        );
        assert!(matches!(
            style_expression(&two_lowers),
            Err(ExpressionError::UnchainedBounds)
        ));

        let with_null = Filter::and(Filter::is_null("x"), Filter::less("x", 5.0));
        assert!(matches!(
            style_expression(&with_null),
            Err(ExpressionError::UnexpectedComparison)
        ));
    }

    #[test]
    fn nested_disjunctions_flatten() {
        let filter = Filter::or(vec![
            Filter::equals("party", "LIB"),
            Filter::or(vec![
                Filter::equals("party", "NDP"),
                Filter::is_null("party"),
            ]),
        ]);
        assert_eq!(
            style_expression(&filter).expect("explicit shape"),
            "LIB, NDP, NULL"
        );
    }

    #[test]
    fn batch_closes_only_unshared_upper_bounds() {
        let batch = filters(&["0..5", "5..10", "LIB, NDP"], "x").expect("well formed");
        assert_eq!(batch.len(), 3);
        // 5 is 5..10's lower bound, so 0..5 stays half-open.
        assert_eq!(
            batch[0],
            Filter::and(Filter::greater_or_equal("x", 0.0), Filter::less("x", 5.0))
        );
        // Nothing starts at 10, so 5..10 closes.
        assert_eq!(
            batch[1],
            Filter::and(
                Filter::greater_or_equal("x", 5.0),
                Filter::less_or_equal("x", 10.0)
            )
        );
        assert_eq!(
            batch[2],
            Filter::Or(vec![
                Filter::equals("x", "LIB"),
                Filter::equals("x", "NDP"),
            ])
        );
    }

    fn rule_with(filter: Filter) -> Rule {
        Rule {
            name: "rule01".to_string(),
            title: String::new(),
            filter: Some(filter),
            symbolizer: Symbolizer::for_geometry(
                GeometryKind::Polygon,
                rgb::RGB8::new(0, 0, 0),
                1.0,
                &Stroke::default(),
            ),
            is_else: false,
        }
    }

    #[test]
    fn modify_rewrites_ranged_bounds_in_place() {
        let mut rule = rule_with(Filter::and(
            Filter::greater_or_equal("depth", 0.0),
            Filter::less("depth", 5.0),
        ));
        modify_rule_filter(&mut rule, "2..8").expect("matching shape");
        assert_eq!(
            rule.filter,
            Some(Filter::and(
                Filter::greater_or_equal("depth", 2.0),
                // The exclusive operator is preserved.
                Filter::less("depth", 8.0)
            ))
        );
    }

    #[test]
    fn modify_rewrites_explicit_values_preserving_attribute() {
        let mut rule = rule_with(Filter::or(vec![
            Filter::equals("party", "LIB"),
            Filter::equals("party", "NDP"),
        ]));
        modify_rule_filter(&mut rule, "GRN, BQ, IND").expect("matching shape");
        assert_eq!(
            rule.filter,
            Some(Filter::Or(vec![
                Filter::equals("party", "GRN"),
                Filter::equals("party", "BQ"),
                Filter::equals("party", "IND"),
            ]))
        );

        let mut single = rule_with(Filter::equals("party", "LIB"));
        modify_rule_filter(&mut single, "GRN").expect("matching shape");
        assert_eq!(single.filter, Some(Filter::equals("party", "GRN")));
    }

    #[test]
    fn modify_rejects_mismatched_shapes() {
        let mut ranged = rule_with(Filter::and(
            Filter::greater_or_equal("x", 0.0),
            Filter::less("x", 5.0),
        ));
        assert!(matches!(
            modify_rule_filter(&mut ranged, "no-dots"),
            Err(ExpressionError::MalformedRange(_))
        ));

        let mut else_rule = rule_with(Filter::equals("x", 1.0));
        else_rule.filter = None;
        assert!(matches!(
            modify_rule_filter(&mut else_rule, "0..5"),
            Err(ExpressionError::UnsupportedFilter(_))
        ));
    }
}
