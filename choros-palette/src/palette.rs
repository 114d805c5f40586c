//! Palette value types.

use rgb::RGB8;
use serde::Serialize;

use crate::error::{PaletteError, PaletteResult};
use crate::sampler::SampleScheme;
use crate::suitability::PaletteSuitability;
use crate::types::PaletteType;

/// Formats a color as a lowercase `#rrggbb` hex string.
#[must_use]
pub fn to_hex(color: RGB8) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Parses a `#RRGGBB` hex string (leading `#` optional, case
/// insensitive).
#[must_use]
pub fn parse_hex(text: &str) -> Option<RGB8> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range| u8::from_str_radix(&hex[range], 16).ok();
    Some(RGB8 {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// A plain named sequence of colors.
///
/// Requesting `n` colors indexes the sequence directly; there is no
/// curated sub-sampling here (see [`BrewerPalette`] for that).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ColorPalette {
    name: String,
    description: String,
    colors: Vec<RGB8>,
}

impl ColorPalette {
    /// Creates a palette from a name, description and color sequence.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        colors: Vec<RGB8>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            colors,
        }
    }

    /// The palette's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The palette's free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The full color sequence in insertion order.
    #[must_use]
    pub fn all_colors(&self) -> &[RGB8] {
        &self.colors
    }

    /// The number of colors in the palette.
    #[must_use]
    pub fn color_count(&self) -> usize {
        self.colors.len()
    }

    /// Returns exactly `max(n, 2)` colors by direct index.
    ///
    /// Requests below 2 are clamped to 2; requests beyond the palette's
    /// color count are a typed error.
    pub fn colors(&self, n: usize) -> PaletteResult<Vec<RGB8>> {
        let n = n.max(2);
        if n > self.colors.len() {
            return Err(PaletteError::UnsupportedClassCount {
                palette: self.name.clone(),
                requested: n,
            });
        }
        Ok(self.colors[..n].to_vec())
    }
}

/// A ColorBrewer scheme: a fixed ramp of up to 15 colors plus the
/// curated sampling tables and viewer-suitability ratings.
///
/// Unlike [`ColorPalette::colors`], [`BrewerPalette::colors`] projects
/// the ramp through the scheme's index-lookup table for the requested
/// class count.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BrewerPalette {
    palette: ColorPalette,
    kind: PaletteType,
    sampler: SampleScheme,
    suitability: PaletteSuitability,
}

impl BrewerPalette {
    /// Assembles a Brewer palette from its parts.
    #[must_use]
    pub fn new(
        palette: ColorPalette,
        kind: PaletteType,
        sampler: SampleScheme,
        suitability: PaletteSuitability,
    ) -> Self {
        Self {
            palette,
            kind,
            sampler,
            suitability,
        }
    }

    /// The palette's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.palette.name()
    }

    /// The palette's free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.palette.description()
    }

    /// The full ramp in insertion order.
    #[must_use]
    pub fn all_colors(&self) -> &[RGB8] {
        self.palette.all_colors()
    }

    /// The number of colors in the ramp.
    #[must_use]
    pub fn color_count(&self) -> usize {
        self.palette.color_count()
    }

    /// The palette's type tag (sequential, diverging or qualitative).
    #[must_use]
    pub fn kind(&self) -> &PaletteType {
        &self.kind
    }

    /// The viewer-suitability ratings.
    #[must_use]
    pub fn suitability(&self) -> &PaletteSuitability {
        &self.suitability
    }

    /// The sampling scheme.
    #[must_use]
    pub fn sampler(&self) -> &SampleScheme {
        &self.sampler
    }

    /// The largest supported class count: the sampling scheme's maximum
    /// capped by the ramp length.
    #[must_use]
    pub fn max_colors(&self) -> usize {
        self.sampler.max_count().min(self.palette.color_count())
    }

    /// The smallest supported class count.
    #[must_use]
    pub fn min_colors(&self) -> usize {
        self.sampler.min_count()
    }

    /// Returns exactly `max(n, 2)` colors chosen through the sampling
    /// table for that class count.
    ///
    /// Requests below 2 are clamped to 2; a class count without a
    /// sampling table, or a table indexing past the ramp, is a typed
    /// error.
    pub fn colors(&self, n: usize) -> PaletteResult<Vec<RGB8>> {
        let n = n.max(2);
        let lookup =
            self.sampler
                .sample(n)
                .ok_or_else(|| PaletteError::UnsupportedClassCount {
                    palette: self.name().to_string(),
                    requested: n,
                })?;
        let ramp = self.palette.all_colors();
        lookup
            .iter()
            .map(|&index| {
                ramp.get(index)
                    .copied()
                    .ok_or_else(|| PaletteError::ColorIndexOutOfRange {
                        index,
                        palette: self.name().to_string(),
                        count: ramp.len(),
                    })
            })
            .collect()
    }
}
