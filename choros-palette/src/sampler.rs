//! Curated sub-sampling of color ramps.
//!
//! A ColorBrewer scheme stores one fixed ramp of up to 15 colors; asking
//! for fewer classes must not take a naive prefix slice. A
//! [`SampleScheme`] holds, per requested class count, the indices of the
//! ramp colors to use so that smaller classifications keep good
//! perceptual spacing.

use serde::Serialize;

use crate::error::{PaletteError, PaletteResult};

/// Smallest class count a sample scheme can describe.
pub const MIN_SAMPLE_CLASSES: usize = 2;
/// Largest class count a sample scheme can describe.
pub const MAX_SAMPLE_CLASSES: usize = 15;

const ROW_COUNT: usize = MAX_SAMPLE_CLASSES - MIN_SAMPLE_CLASSES + 1;

/// Index-lookup tables mapping a 0-based class index to a ramp index,
/// one table per supported class count in `2..=15`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SampleScheme {
    rows: [Option<Vec<usize>>; ROW_COUNT],
}

impl SampleScheme {
    /// An empty scheme with no lookup tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the lookup table for `classes` classes.
    ///
    /// The table must hold exactly `classes` ramp indices.
    pub fn set_sample(&mut self, classes: usize, indices: Vec<usize>) -> PaletteResult<()> {
        if !(MIN_SAMPLE_CLASSES..=MAX_SAMPLE_CLASSES).contains(&classes) {
            return Err(PaletteError::ClassCountOutOfRange(
                classes,
                MIN_SAMPLE_CLASSES,
                MAX_SAMPLE_CLASSES,
            ));
        }
        if indices.len() != classes {
            return Err(PaletteError::BadSampleRow {
                classes,
                got: indices.len(),
            });
        }
        self.rows[classes - MIN_SAMPLE_CLASSES] = Some(indices);
        Ok(())
    }

    /// The lookup table for `classes` classes, if one was registered.
    #[must_use]
    pub fn sample(&self, classes: usize) -> Option<&[usize]> {
        if !(MIN_SAMPLE_CLASSES..=MAX_SAMPLE_CLASSES).contains(&classes) {
            return None;
        }
        self.rows[classes - MIN_SAMPLE_CLASSES].as_deref()
    }

    /// The smallest registered class count, or 0 when empty.
    #[must_use]
    pub fn min_count(&self) -> usize {
        self.rows
            .iter()
            .position(Option::is_some)
            .map_or(0, |i| i + MIN_SAMPLE_CLASSES)
    }

    /// The largest registered class count, or 0 when empty.
    #[must_use]
    pub fn max_count(&self) -> usize {
        self.rows
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |i| i + MIN_SAMPLE_CLASSES)
    }
}
