//! Palette type descriptors.
//!
//! A [`PaletteType`] is both a tag carried by every registered palette
//! (sequential, diverging, qualitative) and a filter handed to the
//! catalog's lookup methods. The well-known values are plain constants;
//! there is no shared registry behind them.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Palette classification and lookup filter.
///
/// Equality is structural over `(name, suitable_ranged, suitable_unique)`;
/// the wildcard flag only affects [`PaletteType::matches`].
#[derive(Clone, Debug, Serialize)]
pub struct PaletteType {
    name: Option<Cow<'static, str>>,
    suitable_ranged: bool,
    suitable_unique: bool,
    wildcard: bool,
}

impl PaletteType {
    /// Matches every palette type.
    pub const ALL: Self = Self::named("ALL", true, true);

    /// Sequential schemes: ordered data progressing from low to high.
    pub const SEQUENTIAL: Self = Self::named("SEQUENTIAL", true, false);

    /// Diverging schemes: equal emphasis on mid-range critical values
    /// and extremes at both ends.
    pub const DIVERGING: Self = Self::named("DIVERGING", true, false);

    /// Qualitative schemes: categorical data with no implied magnitude.
    pub const QUALITATIVE: Self = Self::named("QUALITATIVE", false, true);

    /// Filter selecting any palette usable for ranged classifications.
    pub const SUITABLE_RANGED: Self = Self::new(true, false);

    /// Filter selecting any palette usable for unique-value
    /// classifications.
    pub const SUITABLE_UNIQUE: Self = Self::new(false, true);

    /// An unnamed type with the given suitability flags.
    #[must_use]
    pub const fn new(suitable_ranged: bool, suitable_unique: bool) -> Self {
        Self {
            name: None,
            suitable_ranged,
            suitable_unique,
            wildcard: false,
        }
    }

    /// A named type with the given suitability flags.
    #[must_use]
    pub const fn named(
        name: &'static str,
        suitable_ranged: bool,
        suitable_unique: bool,
    ) -> Self {
        Self {
            name: Some(Cow::Borrowed(name)),
            suitable_ranged,
            suitable_unique,
            wildcard: false,
        }
    }

    /// The zero-argument form: matches everything, equals nothing named.
    #[must_use]
    pub const fn wildcard() -> Self {
        Self {
            name: None,
            suitable_ranged: false,
            suitable_unique: false,
            wildcard: true,
        }
    }

    /// The type's name, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether palettes of this type suit ranged classifications.
    #[must_use]
    pub fn is_suitable_ranged(&self) -> bool {
        self.suitable_ranged
    }

    /// Whether palettes of this type suit unique-value classifications.
    #[must_use]
    pub fn is_suitable_unique(&self) -> bool {
        self.suitable_unique
    }

    /// Tests a candidate palette type against `self` used as a filter.
    ///
    /// The wildcard form and [`PaletteType::ALL`] match everything.
    /// Otherwise the name must match when the filter has one, and both
    /// suitability flags must match exactly.
    #[must_use]
    pub fn matches(&self, candidate: &Self) -> bool {
        if self.wildcard || *self == Self::ALL {
            return true;
        }
        if let Some(name) = self.name()
            && candidate.name() != Some(name)
        {
            return false;
        }
        self.suitable_ranged == candidate.suitable_ranged
            && self.suitable_unique == candidate.suitable_unique
    }
}

impl Default for PaletteType {
    fn default() -> Self {
        Self::wildcard()
    }
}

impl PartialEq for PaletteType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.suitable_ranged == other.suitable_ranged
            && self.suitable_unique == other.suitable_unique
    }
}

impl Eq for PaletteType {}

impl fmt::Display for PaletteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(
                f,
                "(ranged={}, unique={})",
                self.suitable_ranged, self.suitable_unique
            ),
        }
    }
}
