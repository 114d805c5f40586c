//! Classification-driven style generation.
//!
//! Turns a [`Classifier`] plus a color sequence into an ordered rule
//! list. Ranged classes become half-open interval filters (the last
//! class closed above, so adjacent classes partition the value space);
//! explicit classes become equality/null disjunctions. An optional
//! catch-all rule picks up features no class matches.

use log::debug;
use rgb::RGB8;

use crate::classifier::{Classifier, ExplicitClass, RangedClass};
use crate::error::{StyleError, StyleResult};
use crate::filter::{Filter, Value};
use crate::style::{FeatureTypeStyle, GeometryKind, Rule, Stroke, Symbolizer};

/// Whether and how a catch-all rule is added.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ElseMode {
    /// No else rule; one color per class.
    #[default]
    Ignore,
    /// Else rule first: it takes `colors[0]`, classes shift up by one.
    IncludeAsMin,
    /// Else rule last: it takes the final color, classes keep their
    /// indices.
    IncludeAsMax,
}

/// Generates classified styles for one geometry kind.
#[derive(Clone, Debug)]
pub struct StyleGenerator {
    geometry: GeometryKind,
    else_mode: ElseMode,
    opacity: f64,
    stroke: Stroke,
}

impl StyleGenerator {
    /// A generator with full opacity, a default black stroke, and no
    /// else rule.
    #[must_use]
    pub fn new(geometry: GeometryKind) -> Self {
        Self {
            geometry,
            else_mode: ElseMode::Ignore,
            opacity: 1.0,
            stroke: Stroke::default(),
        }
    }

    /// Sets the else-rule mode.
    #[must_use]
    pub fn with_else_mode(mut self, else_mode: ElseMode) -> Self {
        self.else_mode = else_mode;
        self
    }

    /// Sets the fill opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the default stroke used by every generated symbolizer.
    #[must_use]
    pub fn with_stroke(mut self, stroke: Stroke) -> Self {
        self.stroke = stroke;
        self
    }

    /// Generates the rule list for `classifier` over attribute
    /// `property`, using one color per class from `colors`.
    ///
    /// With an else mode other than [`ElseMode::Ignore`], `colors` must
    /// carry one extra entry for the catch-all rule, and the result has
    /// `classifier.len() + 1` rules with the last one flagged
    /// `is_else`. The style is tagged `"colorbrewer:" + type_id`.
    pub fn generate(
        &self,
        classifier: &Classifier,
        property: &str,
        colors: &[RGB8],
        type_id: &str,
    ) -> StyleResult<FeatureTypeStyle> {
        let size = classifier.len();
        let required = if self.else_mode == ElseMode::Ignore {
            size
        } else {
            size + 1
        };
        if colors.len() < required {
            return Err(StyleError::NotEnoughColors {
                required,
                got: colors.len(),
            });
        }

        let mut rules = Vec::with_capacity(required);
        for i in 0..size {
            let filter = match classifier {
                Classifier::Ranged(ranged) => {
                    ranged_filter(property, &ranged.classes()[i], i + 1 == size)
                }
                Classifier::Explicit(explicit) => {
                    Some(explicit_filter(property, &explicit.classes()[i]))
                }
            };
            rules.push(Rule {
                name: format!("rule{:02}", i + 1),
                title: classifier.title(i).unwrap_or_default().to_string(),
                filter,
                symbolizer: Symbolizer::for_geometry(
                    self.geometry,
                    self.class_color(colors, i),
                    self.opacity,
                    &self.stroke,
                ),
                is_else: false,
            });
        }

        if let Some(color) = self.else_color(colors) {
            rules.push(Rule {
                name: "else".to_string(),
                title: "Else".to_string(),
                filter: None,
                symbolizer: Symbolizer::for_geometry(
                    self.geometry,
                    color,
                    self.opacity,
                    &self.stroke,
                ),
                is_else: true,
            });
        }

        debug!("Generated {} rules for {type_id} over {property}", rules.len());
        Ok(FeatureTypeStyle {
            name: type_id.to_string(),
            rules,
            semantic_type_identifiers: vec![
                "generic:geometry".to_string(),
                format!("colorbrewer:{type_id}"),
            ],
        })
    }

    fn class_color(&self, colors: &[RGB8], i: usize) -> RGB8 {
        match self.else_mode {
            // Index 0 is reserved for the else rule.
            ElseMode::IncludeAsMin => colors[i + 1],
            ElseMode::Ignore | ElseMode::IncludeAsMax => colors[i],
        }
    }

    fn else_color(&self, colors: &[RGB8]) -> Option<RGB8> {
        match self.else_mode {
            ElseMode::Ignore => None,
            ElseMode::IncludeAsMin => Some(colors[0]),
            ElseMode::IncludeAsMax => colors.last().copied(),
        }
    }
}

/// Builds the interval filter for one ranged class. Returns `None` when
/// both bounds are absent (the class matches everything).
fn ranged_filter(property: &str, class: &RangedClass, last: bool) -> Option<Filter> {
    if let (Some(min), Some(max)) = (&class.min, &class.max)
        && min == max
    {
        return Some(Filter::equals(property, max.clone()));
    }

    let lower = class
        .min
        .as_ref()
        .map(|min| Filter::greater_or_equal(property, min.clone()));
    let upper = class.max.as_ref().map(|max| {
        if last {
            // Closing the last class guarantees the classes partition
            // the value space with no gap at the global maximum.
            Filter::less_or_equal(property, max.clone())
        } else {
            Filter::less(property, max.clone())
        }
    });

    match (lower, upper) {
        (Some(lower), Some(upper)) => Some(Filter::and(lower, upper)),
        (Some(single), None) | (None, Some(single)) => Some(single),
        (None, None) => None,
    }
}

/// Builds the membership filter for one explicit class. Values are
/// sorted and deduplicated first so the produced expression is
/// deterministic; null becomes an is-null predicate.
fn explicit_filter(property: &str, class: &ExplicitClass) -> Filter {
    let mut values: Vec<Option<Value>> = class.values.clone();
    values.sort();
    values.dedup();

    let mut predicates: Vec<Filter> = values
        .into_iter()
        .map(|value| match value {
            Some(value) => Filter::equals(property, value),
            None => Filter::is_null(property),
        })
        .collect();

    if predicates.len() == 1 {
        predicates.remove(0)
    } else {
        Filter::or(predicates)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::classifier::{ExplicitClassifier, RangedClassifier};
    use crate::filter::Feature;

    fn colors(n: u8) -> Vec<RGB8> {
        (0..n).map(|i| RGB8::new(i * 10, 0, 0)).collect()
    }

    fn ranged(bounds: &[(f64, f64)]) -> Classifier {
        Classifier::Ranged(RangedClassifier::new(
            bounds
                .iter()
                .map(|&(min, max)| RangedClass::numeric(min, max, format!("{min} to {max}")))
                .collect(),
        ))
    }

    #[test]
    fn ignore_mode_yields_one_rule_per_class() {
        let style = StyleGenerator::new(GeometryKind::Polygon)
            .generate(&ranged(&[(0.0, 5.0), (5.0, 10.0)]), "x", &colors(2), "t")
            .expect("enough colors");
        assert_eq!(style.rules.len(), 2);
        assert_eq!(style.rules[0].name, "rule01");
        assert_eq!(style.rules[1].name, "rule02");
        assert!(style.rules.iter().all(|r| !r.is_else));
        assert_eq!(
            style.semantic_type_identifiers,
            vec!["generic:geometry".to_string(), "colorbrewer:t".to_string()]
        );
    }

    #[rstest]
    #[case(ElseMode::IncludeAsMin)]
    #[case(ElseMode::IncludeAsMax)]
    fn else_modes_append_flagged_rule(#[case] mode: ElseMode) {
        let style = StyleGenerator::new(GeometryKind::Polygon)
            .with_else_mode(mode)
            .generate(&ranged(&[(0.0, 5.0), (5.0, 10.0)]), "x", &colors(3), "t")
            .expect("enough colors");
        assert_eq!(style.rules.len(), 3);
        let else_rule = &style.rules[2];
        assert!(else_rule.is_else);
        assert_eq!(else_rule.name, "else");
        assert_eq!(else_rule.title, "Else");
        assert_eq!(else_rule.filter, None);
    }

    #[test]
    fn else_mode_color_offsets() {
        let palette = colors(3);
        let classifier = ranged(&[(0.0, 5.0), (5.0, 10.0)]);

        let as_min = StyleGenerator::new(GeometryKind::Polygon)
            .with_else_mode(ElseMode::IncludeAsMin)
            .generate(&classifier, "x", &palette, "t")
            .expect("enough colors");
        // Index 0 goes to the else rule; classes shift up.
        assert_eq!(as_min.rules[0].symbolizer.color(), palette[1]);
        assert_eq!(as_min.rules[1].symbolizer.color(), palette[2]);
        assert_eq!(as_min.rules[2].symbolizer.color(), palette[0]);

        let as_max = StyleGenerator::new(GeometryKind::Polygon)
            .with_else_mode(ElseMode::IncludeAsMax)
            .generate(&classifier, "x", &palette, "t")
            .expect("enough colors");
        assert_eq!(as_max.rules[0].symbolizer.color(), palette[0]);
        assert_eq!(as_max.rules[1].symbolizer.color(), palette[1]);
        assert_eq!(as_max.rules[2].symbolizer.color(), palette[2]);
    }

    #[test]
    fn too_few_colors_is_an_error() {
        let err = StyleGenerator::new(GeometryKind::Polygon)
            .with_else_mode(ElseMode::IncludeAsMax)
            .generate(&ranged(&[(0.0, 5.0), (5.0, 10.0)]), "x", &colors(2), "t")
            .unwrap_err();
        assert!(matches!(
            err,
            StyleError::NotEnoughColors { required: 3, got: 2 }
        ));
    }

    #[test]
    fn boundary_closure_partitions_the_value_space() {
        let style = StyleGenerator::new(GeometryKind::Polygon)
            .generate(&ranged(&[(0.0, 5.0), (5.0, 10.0)]), "x", &colors(2), "t")
            .expect("enough colors");
        let first = style.rules[0].filter.as_ref().expect("has filter");
        let second = style.rules[1].filter.as_ref().expect("has filter");

        // Every value in [0, 10] matches exactly one class.
        for x in [0.0, 2.5, 4.999, 5.0, 9.999, 10.0] {
            let feature = Feature::new().with("x", x);
            let hits =
                usize::from(first.matches(&feature)) + usize::from(second.matches(&feature));
            assert_eq!(hits, 1, "x = {x}");
        }
        assert!(!first.matches(&Feature::new().with("x", 5.0)));
        assert!(second.matches(&Feature::new().with("x", 10.0)));
        assert!(!second.matches(&Feature::new().with("x", 10.001)));
    }

    #[test]
    fn degenerate_class_becomes_equality() {
        let style = StyleGenerator::new(GeometryKind::Polygon)
            .generate(&ranged(&[(5.0, 5.0)]), "x", &colors(1), "t")
            .expect("enough colors");
        assert_eq!(
            style.rules[0].filter,
            Some(Filter::equals("x", Value::Number(5.0)))
        );
    }

    #[test]
    fn integral_bounds_render_without_decimal_point() {
        let classifier = ranged(&[(0.0, 5.0)]);
        let style = StyleGenerator::new(GeometryKind::Polygon)
            .generate(&classifier, "x", &colors(1), "t")
            .expect("enough colors");
        let text = crate::expression::style_expression(
            style.rules[0].filter.as_ref().expect("has filter"),
        )
        .expect("ranged shape");
        insta::assert_snapshot!(text, @"0..5");
    }

    #[test]
    fn explicit_classes_produce_membership_filters() {
        let classifier = Classifier::Explicit(ExplicitClassifier::new(vec![
            ExplicitClass::new(vec![
                Some(Value::from("NDP")),
                Some(Value::from("LIB")),
                None,
            ]),
            ExplicitClass::new(vec![Some(Value::from("GRN"))]),
        ]));
        let style = StyleGenerator::new(GeometryKind::Point)
            .generate(&classifier, "party", &colors(2), "t")
            .expect("enough colors");

        // Values are sorted before filter construction; null sorts
        // first.
        assert_eq!(
            style.rules[0].filter,
            Some(Filter::or(vec![
                Filter::is_null("party"),
                Filter::equals("party", "LIB"),
                Filter::equals("party", "NDP"),
            ]))
        );
        // A single value needs no disjunction.
        assert_eq!(
            style.rules[1].filter,
            Some(Filter::equals("party", "GRN"))
        );
    }

    #[rstest]
    #[case(GeometryKind::Polygon)]
    #[case(GeometryKind::Line)]
    #[case(GeometryKind::Point)]
    fn symbolizer_matches_geometry(#[case] geometry: GeometryKind) {
        let style = StyleGenerator::new(geometry)
            .generate(&ranged(&[(0.0, 1.0)]), "x", &colors(1), "t")
            .expect("enough colors");
        match (&style.rules[0].symbolizer, geometry) {
            (Symbolizer::Polygon { .. }, GeometryKind::Polygon)
            | (Symbolizer::Line { .. }, GeometryKind::Line)
            | (Symbolizer::Point { .. }, GeometryKind::Point) => {}
            (symbolizer, _) => panic!("unexpected symbolizer {symbolizer:?}"),
        }
    }
}
