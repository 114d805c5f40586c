//! The palette registry.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use itertools::Itertools as _;
use log::{error, info, warn};

use crate::definition::Definition;
use crate::error::{PaletteError, PaletteResult};
use crate::palette::BrewerPalette;
use crate::suitability::ViewerSet;
use crate::types::PaletteType;

const SEQUENTIAL_DOC: &str = include_str!("definitions/sequential.yaml");
const DIVERGING_DOC: &str = include_str!("definitions/diverging.yaml");
const QUALITATIVE_DOC: &str = include_str!("definitions/qualitative.yaml");

/// Registry of named [`BrewerPalette`]s with filtered lookup.
///
/// The catalog is meant to be populated once at startup (usually via
/// [`PaletteCatalog::load_all`]) and shared immutably afterwards.
#[derive(Debug, Default)]
pub struct PaletteCatalog {
    palettes: HashMap<String, BrewerPalette>,
}

impl PaletteCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a palette under its name. Last write wins; overwriting
    /// an existing registration is logged.
    pub fn register(&mut self, palette: BrewerPalette) {
        let name = palette.name().to_string();
        if self.palettes.insert(name.clone(), palette).is_some() {
            warn!("Replacing already registered palette {name}");
        }
    }

    /// Whether a palette with the given name is registered.
    #[must_use]
    pub fn has_palette(&self, name: &str) -> bool {
        self.palettes.contains_key(name)
    }

    /// Looks up a palette by name.
    #[must_use]
    pub fn get_palette(&self, name: &str) -> Option<&BrewerPalette> {
        self.palettes.get(name)
    }

    /// All registered palettes, in unspecified order.
    #[must_use]
    pub fn palettes(&self) -> Vec<&BrewerPalette> {
        self.palettes.values().collect()
    }

    /// The number of registered palettes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    /// Palettes whose type matches the given filter.
    #[must_use]
    pub fn palettes_matching(&self, filter: &PaletteType) -> Vec<&BrewerPalette> {
        self.palettes
            .values()
            .filter(|p| filter.matches(p.kind()))
            .collect()
    }

    /// Palettes matching the filter that can also supply at least
    /// `min_classes` classes. `None` disables the class-count
    /// requirement.
    #[must_use]
    pub fn palettes_with_classes(
        &self,
        filter: &PaletteType,
        min_classes: Option<usize>,
    ) -> Vec<&BrewerPalette> {
        self.palettes
            .values()
            .filter(|p| filter.matches(p.kind()))
            .filter(|p| min_classes.is_none_or(|n| p.max_colors() >= n))
            .collect()
    }

    /// Palettes matching the filter, supplying at least `classes`
    /// classes, and rated `Good` at that class count for every viewer in
    /// `required`.
    #[must_use]
    pub fn palettes_for_viewers(
        &self,
        filter: &PaletteType,
        classes: usize,
        required: ViewerSet,
    ) -> Vec<&BrewerPalette> {
        self.palettes_with_classes(filter, Some(classes))
            .into_iter()
            .filter(|p| p.suitability().is_good_for(classes, required))
            .collect()
    }

    /// Names of palettes whose maximum class count falls within
    /// `[min_classes, max_classes]`, deduplicated and sorted.
    #[must_use]
    pub fn palette_names(&self, min_classes: usize, max_classes: usize) -> Vec<String> {
        self.palettes
            .values()
            .filter(|p| (min_classes..=max_classes).contains(&p.max_colors()))
            .map(|p| p.name().to_string())
            .unique()
            .sorted()
            .collect()
    }

    /// Parses a definition document and registers every palette in it,
    /// tagged with `kind`. Returns the number of palettes registered.
    pub fn load_document(&mut self, text: &str, kind: &PaletteType) -> PaletteResult<usize> {
        let definition = Definition::from_yaml(text)?;
        let palettes = definition.build(kind)?;
        let count = palettes.len();
        for palette in palettes {
            self.register(palette);
        }
        info!("Loaded {count} {kind} palettes from definition {name}", name = definition.name);
        Ok(count)
    }

    /// Loads a definition document from disk, best-effort: a missing or
    /// malformed file is logged and contributes zero palettes.
    pub fn load_file(&mut self, path: &Path, kind: &PaletteType) {
        let loaded = fs::read_to_string(path)
            .map_err(|e| PaletteError::IoError(e, path.to_path_buf()))
            .and_then(|text| self.load_document(&text, kind));
        if let Err(e) = loaded {
            error!("Skipping palette definitions from {}: {e}", path.display());
        }
    }

    /// Loads the bundled definition documents selected by `kind`.
    ///
    /// `ALL` (or any wildcard) loads all three families;
    /// `SUITABLE_RANGED` loads sequential and diverging;
    /// `SUITABLE_UNIQUE` loads qualitative; the leaf types load
    /// themselves.
    pub fn load_for(&mut self, kind: &PaletteType) {
        let mut load = |doc: &str, leaf: &PaletteType| {
            if kind.matches(leaf)
                && let Err(e) = self.load_document(doc, leaf)
            {
                // The bundled documents are expected to be well formed;
                // a failure here is still non-fatal per the load
                // contract.
                error!("Skipping bundled {leaf} palettes: {e}");
            }
        };
        load(SEQUENTIAL_DOC, &PaletteType::SEQUENTIAL);
        load(DIVERGING_DOC, &PaletteType::DIVERGING);
        load(QUALITATIVE_DOC, &PaletteType::QUALITATIVE);
    }

    /// Loads every bundled definition document.
    pub fn load_all(&mut self) {
        self.load_for(&PaletteType::ALL);
    }
}
