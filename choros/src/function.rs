//! Per-feature palette color lookup.
//!
//! A [`PaletteFunction`] pairs a classifier with a palette name; for
//! each feature it resolves the class the feature falls into and
//! yields that class's color as a hex string, ready for embedding in a
//! rendered style.

use choros_palette::PaletteCatalog;

use crate::classifier::Classifier;
use crate::error::{FunctionError, FunctionResult};
use crate::filter::Feature;

/// Maps a feature attribute to a palette color through a classifier.
#[derive(Debug, Clone)]
pub struct PaletteFunction {
    classifier: Classifier,
    property: String,
    palette_name: String,
}

impl PaletteFunction {
    /// A function classifying `property` and coloring from the named
    /// palette.
    pub fn new(
        classifier: Classifier,
        property: impl Into<String>,
        palette_name: impl Into<String>,
    ) -> Self {
        Self {
            classifier,
            property: property.into(),
            palette_name: palette_name.into(),
        }
    }

    /// The attribute the classifier reads.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    /// The palette colors are drawn from.
    #[must_use]
    pub fn palette_name(&self) -> &str {
        &self.palette_name
    }

    /// Resolves the feature's class color as a `#rrggbb` hex string.
    ///
    /// The palette is sampled at exactly as many colors as the
    /// classifier has classes, so class index `i` always lands on
    /// color `i`.
    pub fn evaluate(&self, catalog: &PaletteCatalog, feature: &Feature) -> FunctionResult<String> {
        let palette = catalog
            .get_palette(&self.palette_name)
            .ok_or_else(|| FunctionError::PaletteNotFound(self.palette_name.clone()))?;

        let index = self.classify(feature)?;
        let colors = palette.colors(self.classifier.len())?;
        let color = colors.get(index).ok_or(FunctionError::ClassOutOfRange {
            index,
            classes: colors.len(),
        })?;
        Ok(choros_palette::to_hex(*color))
    }

    fn classify(&self, feature: &Feature) -> FunctionResult<usize> {
        let value = feature.get(&self.property);
        let index = match &self.classifier {
            Classifier::Ranged(ranged) => value.and_then(|v| ranged.classify(v)),
            Classifier::Explicit(explicit) => explicit.classify(value),
        };
        index.ok_or_else(|| {
            let rendered = match value {
                Some(v) => v.to_string(),
                None => "NULL".to_string(),
            };
            FunctionError::NoMatchingClass(self.property.clone(), rendered)
        })
    }
}

#[cfg(test)]
mod tests {
    use choros_palette::PaletteCatalog;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::classifier::{ExplicitClass, ExplicitClassifier, RangedClass, RangedClassifier};
    use crate::filter::Value;

    #[fixture]
    fn catalog() -> PaletteCatalog {
        let mut catalog = PaletteCatalog::new();
        catalog.load_all();
        catalog
    }

    fn depth_function(palette: &str) -> PaletteFunction {
        let classifier = Classifier::Ranged(RangedClassifier::new(vec![
            RangedClass::numeric(0.0, 10.0, "shallow"),
            RangedClass::numeric(10.0, 100.0, "mid"),
            RangedClass::numeric(100.0, 1000.0, "deep"),
        ]));
        PaletteFunction::new(classifier, "depth", palette)
    }

    #[rstest]
    fn evaluates_ranged_classes_to_hex(catalog: PaletteCatalog) {
        let function = depth_function("Blues");
        let palette = catalog.get_palette("Blues").expect("bundled");
        let expected: Vec<String> = palette
            .colors(3)
            .expect("3 classes supported")
            .into_iter()
            .map(choros_palette::to_hex)
            .collect();

        for (depth, hex) in [(3.0, &expected[0]), (10.0, &expected[1]), (500.0, &expected[2])] {
            let feature = Feature::new().with("depth", depth);
            assert_eq!(&function.evaluate(&catalog, &feature).expect("in range"), hex);
        }
    }

    #[rstest]
    fn evaluates_explicit_classes(catalog: PaletteCatalog) {
        let classifier = Classifier::Explicit(ExplicitClassifier::new(vec![
            ExplicitClass::new(vec![Some(Value::from("LIB"))]),
            ExplicitClass::new(vec![Some(Value::from("NDP")), None]),
        ]));
        let function = PaletteFunction::new(classifier, "party", "Set1");

        let lib = Feature::new().with("party", "LIB");
        let null = Feature::new().with_null("party");
        assert_ne!(
            function.evaluate(&catalog, &lib).expect("class 0"),
            function.evaluate(&catalog, &null).expect("class 1")
        );
    }

    #[rstest]
    fn unmatched_value_is_an_error(catalog: PaletteCatalog) {
        let function = depth_function("Blues");
        let feature = Feature::new().with("depth", -4.0);
        assert!(matches!(
            function.evaluate(&catalog, &feature),
            Err(FunctionError::NoMatchingClass(attr, value))
                if attr == "depth" && value == "-4"
        ));
    }

    #[rstest]
    fn missing_attribute_is_an_error(catalog: PaletteCatalog) {
        let function = depth_function("Blues");
        let feature = Feature::new();
        assert!(matches!(
            function.evaluate(&catalog, &feature),
            Err(FunctionError::NoMatchingClass(_, value)) if value == "NULL"
        ));
    }

    #[rstest]
    fn unknown_palette_is_an_error(catalog: PaletteCatalog) {
        let function = depth_function("NoSuchPalette");
        let feature = Feature::new().with("depth", 3.0);
        assert!(matches!(
            function.evaluate(&catalog, &feature),
            Err(FunctionError::PaletteNotFound(name)) if name == "NoSuchPalette"
        ));
    }
}
