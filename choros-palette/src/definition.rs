//! Palette definition documents.
//!
//! A document describes one family of schemes: a name, a description,
//! the family-wide sampling tables, and the palettes themselves. The
//! document is YAML; the color ramps, sampling tables and suitability
//! rows keep their compact textual micro-formats as body strings:
//!
//! ```yaml
//! name: sequential
//! description: Lightness-ordered schemes for low-to-high data.
//! samples:
//!   - size: 2
//!     indices: "1,5"
//! palettes:
//!   - name: Blues
//!     description: Light blue to dark blue
//!     colors: "239,243,255:189,215,231:107,174,214:49,130,189:8,81,156"
//!     suitability:
//!       - size: 3
//!         codes: "G,G,G,G,G,G"
//! ```
//!
//! A ramp is up to 15 colon-separated `R,G,B` groups, read left to
//! right; groups past the fifteenth are ignored. A suitability row is
//! exactly six comma-separated codes in viewer column order.

use rgb::RGB8;
use serde::Deserialize;

use crate::error::{PaletteError, PaletteResult};
use crate::palette::{BrewerPalette, ColorPalette};
use crate::sampler::SampleScheme;
use crate::suitability::PaletteSuitability;
use crate::types::PaletteType;

/// The most colors a single ramp may carry.
const MAX_RAMP_COLORS: usize = 15;

/// A whole definition document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Definition {
    /// Family name, e.g. `sequential`.
    pub name: String,
    /// Free-text family description.
    pub description: String,
    /// Family-wide sampling tables.
    #[serde(default)]
    pub samples: Vec<SampleRow>,
    /// The palettes of this family.
    #[serde(default)]
    pub palettes: Vec<PaletteEntry>,
}

/// One sampling table: `size` ramp indices for `size` classes.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleRow {
    /// Class count this table serves.
    pub size: usize,
    /// Comma-separated ramp indices, `size` of them.
    pub indices: String,
}

/// One palette within a document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteEntry {
    /// Palette name, e.g. `Blues`.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Colon-separated `R,G,B` groups, at most 15 used.
    pub colors: String,
    /// Per-class-count suitability rows.
    #[serde(default)]
    pub suitability: Vec<SuitabilityRow>,
}

/// One suitability row: six viewer codes for `size` classes.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuitabilityRow {
    /// Class count this row rates.
    pub size: usize,
    /// Exactly six comma-separated codes (`G`/`D`/`B`/`?`).
    pub codes: String,
}

impl Definition {
    /// Parses a YAML definition document.
    pub fn from_yaml(text: &str) -> PaletteResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Builds the palettes this document defines, tagging each with
    /// `kind`.
    pub fn build(&self, kind: &PaletteType) -> PaletteResult<Vec<BrewerPalette>> {
        let mut sampler = SampleScheme::new();
        for row in &self.samples {
            sampler.set_sample(row.size, parse_indices(&row.indices)?)?;
        }

        self.palettes
            .iter()
            .map(|entry| {
                let colors = parse_colors(&entry.colors, &entry.name)?;
                let mut suitability = PaletteSuitability::new();
                for row in &entry.suitability {
                    let codes: Vec<&str> = row.codes.split(',').collect();
                    suitability.set_row(row.size, &codes)?;
                }
                Ok(BrewerPalette::new(
                    ColorPalette::new(entry.name.clone(), entry.description.clone(), colors),
                    kind.clone(),
                    sampler.clone(),
                    suitability,
                ))
            })
            .collect()
    }
}

fn parse_indices(text: &str) -> PaletteResult<Vec<usize>> {
    text.split(',')
        .map(|token| {
            token
                .trim()
                .parse::<usize>()
                .map_err(|_| PaletteError::InvalidIndex(token.to_string()))
        })
        .collect()
}

fn parse_colors(text: &str, palette: &str) -> PaletteResult<Vec<RGB8>> {
    text.split(':')
        .take(MAX_RAMP_COLORS)
        .map(|group| parse_color(group, palette))
        .collect()
}

fn parse_color(group: &str, palette: &str) -> PaletteResult<RGB8> {
    let invalid = || PaletteError::InvalidColor {
        value: group.to_string(),
        palette: palette.to_string(),
    };
    let mut components = group.split(',').map(|c| c.trim().parse::<u8>());
    let mut next = || components.next().ok_or_else(invalid)?.map_err(|_| invalid());
    let color = RGB8 {
        r: next()?,
        g: next()?,
        b: next()?,
    };
    if components.next().is_some() {
        return Err(invalid());
    }
    Ok(color)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    const DOC: &str = indoc! {"
        name: test
        description: A family used by the unit tests.
        samples:
          - size: 2
            indices: \"0,3\"
          - size: 3
            indices: \"0,2,4\"
        palettes:
          - name: Grays
            description: Five grays
            colors: \"0,0,0:60,60,60:120,120,120:180,180,180:240,240,240\"
            suitability:
              - size: 2
                codes: \"G,G,G,G,G,G\"
              - size: 3
                codes: \"G,D,?,B,G,G\"
    "};

    #[test]
    fn document_builds_palettes() {
        let definition = Definition::from_yaml(DOC).expect("valid document");
        let palettes = definition
            .build(&PaletteType::SEQUENTIAL)
            .expect("well-formed rows");
        assert_eq!(palettes.len(), 1);

        let grays = &palettes[0];
        assert_eq!(grays.name(), "Grays");
        assert_eq!(grays.color_count(), 5);
        assert_eq!(grays.kind(), &PaletteType::SEQUENTIAL);
        assert_eq!(grays.min_colors(), 2);
        assert_eq!(grays.max_colors(), 3);

        let colors = grays.colors(3).expect("sampling table for 3");
        assert_eq!(
            colors.iter().map(|c| c.r).collect::<Vec<_>>(),
            vec![0, 120, 240]
        );
    }

    #[test]
    fn ramps_are_capped_at_fifteen_colors() {
        let long_ramp = (0..20).map(|i| format!("{i},{i},{i}")).collect::<Vec<_>>();
        let yaml = format!(
            "name: test\ndescription: d\npalettes:\n  - name: Long\n    colors: \"{}\"\n",
            long_ramp.join(":")
        );
        let definition = Definition::from_yaml(&yaml).expect("valid document");
        let palettes = definition.build(&PaletteType::SEQUENTIAL).expect("built");
        assert_eq!(palettes[0].color_count(), 15);
    }

    #[test]
    fn malformed_color_group_is_a_format_error() {
        let yaml = indoc! {"
            name: test
            description: d
            palettes:
              - name: Broken
                colors: \"0,0:1,1,1\"
        "};
        let definition = Definition::from_yaml(yaml).expect("valid yaml");
        let err = definition.build(&PaletteType::SEQUENTIAL).unwrap_err();
        assert!(matches!(err, PaletteError::InvalidColor { .. }));
    }

    #[test]
    fn component_above_255_is_a_format_error() {
        let yaml = indoc! {"
            name: test
            description: d
            palettes:
              - name: Broken
                colors: \"0,0,256\"
        "};
        let definition = Definition::from_yaml(yaml).expect("valid yaml");
        assert!(definition.build(&PaletteType::SEQUENTIAL).is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let yaml = indoc! {"
            name: test
            description: d
            palete: typo
        "};
        assert!(Definition::from_yaml(yaml).is_err());
    }
}
