//! Per-viewer suitability ratings for palettes.
//!
//! ColorBrewer rates each scheme, per class count, against six viewing
//! conditions. The fixed column order everywhere (definition documents,
//! storage, constants) is: colorblind, photocopy, projector, LCD, CRT,
//! print.

use bitflags::bitflags;
use serde::Serialize;

use crate::error::{PaletteError, PaletteResult};

/// Smallest class count a suitability table can describe.
pub const MIN_SUITABILITY_CLASSES: usize = 2;
/// Largest class count a suitability table can describe.
pub const MAX_SUITABILITY_CLASSES: usize = 12;

const VIEWER_COUNT: usize = 6;
const ROW_COUNT: usize = MAX_SUITABILITY_CLASSES - MIN_SUITABILITY_CLASSES + 1;

/// Quality rating of a palette under one viewing condition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Suitability {
    /// Works well.
    Good,
    /// No rating available.
    #[default]
    Unknown,
    /// May work.
    Doubtful,
    /// Does not work.
    Bad,
}

impl Suitability {
    /// Parses a single-character rating code.
    ///
    /// `G`, `D` and `B` map to their ratings; anything else is
    /// [`Suitability::Unknown`].
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "G" => Self::Good,
            "D" => Self::Doubtful,
            "B" => Self::Bad,
            _ => Self::Unknown,
        }
    }
}

/// One of the six viewing conditions a palette is rated against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Viewer {
    /// Colorblind-safe viewing.
    Colorblind = 0,
    /// Black-and-white photocopying.
    Photocopy = 1,
    /// Overhead projection.
    Projector = 2,
    /// LCD displays.
    Lcd = 3,
    /// CRT displays.
    Crt = 4,
    /// Color printing.
    Print = 5,
}

impl Viewer {
    /// All viewers in column order.
    pub const ALL: [Self; VIEWER_COUNT] = [
        Self::Colorblind,
        Self::Photocopy,
        Self::Projector,
        Self::Lcd,
        Self::Crt,
        Self::Print,
    ];

    /// The viewer's bit in a [`ViewerSet`].
    #[must_use]
    pub fn bit(self) -> ViewerSet {
        ViewerSet::from_bits_truncate(1 << (self as u8))
    }
}

bitflags! {
    /// A set of viewing conditions, used to require `Good` ratings for
    /// several viewers at once when filtering the catalog.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ViewerSet: u8 {
        /// Colorblind-safe viewing.
        const COLORBLIND = 0b00_0001;
        /// Black-and-white photocopying.
        const PHOTOCOPY = 0b00_0010;
        /// Overhead projection.
        const PROJECTOR = 0b00_0100;
        /// LCD displays.
        const LCD = 0b00_1000;
        /// CRT displays.
        const CRT = 0b01_0000;
        /// Color printing.
        const PRINT = 0b10_0000;
    }
}

impl ViewerSet {
    /// The viewers named by this set, in column order.
    pub fn viewers(self) -> impl Iterator<Item = Viewer> {
        Viewer::ALL.into_iter().filter(move |v| self.contains(v.bit()))
    }
}

/// Suitability ratings for one palette: a row per class count in
/// `2..=12`, each holding six per-viewer ratings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PaletteSuitability {
    rows: [Option<[Suitability; VIEWER_COUNT]>; ROW_COUNT],
}

impl PaletteSuitability {
    /// An empty table with no ratings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ratings row for `classes` from six rating codes in
    /// column order.
    ///
    /// Unrecognized codes become [`Suitability::Unknown`]; a row with
    /// anything other than exactly six codes is a format error.
    pub fn set_row(&mut self, classes: usize, codes: &[&str]) -> PaletteResult<()> {
        if codes.len() != VIEWER_COUNT {
            return Err(PaletteError::BadSuitabilityRow {
                classes,
                got: codes.len(),
            });
        }
        if !(MIN_SUITABILITY_CLASSES..=MAX_SUITABILITY_CLASSES).contains(&classes) {
            return Err(PaletteError::ClassCountOutOfRange(
                classes,
                MIN_SUITABILITY_CLASSES,
                MAX_SUITABILITY_CLASSES,
            ));
        }
        let mut row = [Suitability::Unknown; VIEWER_COUNT];
        for (slot, code) in row.iter_mut().zip(codes) {
            *slot = Suitability::from_code(code);
        }
        self.rows[classes - MIN_SUITABILITY_CLASSES] = Some(row);
        Ok(())
    }

    /// The rating for one viewer at the given class count, if a row was
    /// ever set for that count.
    #[must_use]
    pub fn get(&self, classes: usize, viewer: Viewer) -> Option<Suitability> {
        if !(MIN_SUITABILITY_CLASSES..=MAX_SUITABILITY_CLASSES).contains(&classes) {
            return None;
        }
        self.rows[classes - MIN_SUITABILITY_CLASSES].map(|row| row[viewer as usize])
    }

    /// Whether every viewer in `required` is rated `Good` at the given
    /// class count.
    #[must_use]
    pub fn is_good_for(&self, classes: usize, required: ViewerSet) -> bool {
        required
            .viewers()
            .all(|viewer| self.get(classes, viewer) == Some(Suitability::Good))
    }

    /// The largest class count for which a row was ever set.
    #[must_use]
    pub fn max_colors(&self) -> usize {
        self.rows
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |i| i + MIN_SUITABILITY_CLASSES)
    }
}
