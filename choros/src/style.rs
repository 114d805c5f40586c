//! Rule and symbolizer value types.
//!
//! Plain data consumed by a rendering engine; nothing here paints
//! pixels.

use rgb::RGB8;
use serde::Serialize;

use crate::filter::Filter;

/// Geometry shape driving which symbolizer a rule gets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum GeometryKind {
    /// Filled areas.
    Polygon,
    /// Stroked lines.
    Line,
    /// Point marks.
    Point,
}

/// Line stroke parameters.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stroke {
    /// Stroke color.
    pub color: RGB8,
    /// Stroke width in pixels.
    pub width: f64,
    /// Stroke opacity in `[0, 1]`.
    pub opacity: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: RGB8::new(0, 0, 0),
            width: 1.0,
            opacity: 1.0,
        }
    }
}

/// Area fill parameters.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Fill {
    /// Fill color.
    pub color: RGB8,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
}

/// A well-known point mark.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Mark {
    /// Mark shape name, e.g. `circle` or `square`.
    pub well_known_name: String,
    /// Mark fill.
    pub fill: Fill,
    /// Mark outline.
    pub stroke: Stroke,
    /// Mark size in pixels.
    pub size: f64,
}

/// How a matching feature is drawn.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Symbolizer {
    /// Filled polygon with an outline.
    Polygon {
        /// Area fill.
        fill: Fill,
        /// Outline stroke.
        stroke: Stroke,
    },
    /// Stroked line.
    Line {
        /// Line stroke.
        stroke: Stroke,
    },
    /// Point mark.
    Point {
        /// The mark to draw.
        mark: Mark,
    },
}

impl Symbolizer {
    /// Synthesizes the symbolizer for a geometry kind: a filled mark
    /// for points and polygons, stroke-only for lines.
    #[must_use]
    pub fn for_geometry(
        geometry: GeometryKind,
        color: RGB8,
        opacity: f64,
        stroke: &Stroke,
    ) -> Self {
        let fill = Fill { color, opacity };
        match geometry {
            GeometryKind::Polygon => Self::Polygon {
                fill,
                stroke: stroke.clone(),
            },
            GeometryKind::Line => Self::Line {
                stroke: Stroke {
                    color,
                    opacity,
                    ..stroke.clone()
                },
            },
            GeometryKind::Point => Self::Point {
                mark: Mark {
                    well_known_name: "circle".to_string(),
                    fill,
                    stroke: stroke.clone(),
                    size: 8.0,
                },
            },
        }
    }

    /// The symbolizer's principal color: fill color for polygons and
    /// points, stroke color for lines.
    #[must_use]
    pub fn color(&self) -> RGB8 {
        match self {
            Self::Polygon { fill, .. } => fill.color,
            Self::Line { stroke } => stroke.color,
            Self::Point { mark } => mark.fill.color,
        }
    }
}

/// One styling rule: an optional filter, a symbolizer, and naming.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Rule {
    /// Machine name, e.g. `rule01`.
    pub name: String,
    /// Human-readable title.
    pub title: String,
    /// The predicate selecting features; `None` matches everything.
    pub filter: Option<Filter>,
    /// How matching features are drawn.
    pub symbolizer: Symbolizer,
    /// Whether this is the catch-all rule for otherwise unmatched
    /// features.
    pub is_else: bool,
}

/// An ordered rule list plus provenance tags.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeatureTypeStyle {
    /// Style name.
    pub name: String,
    /// Rules in evaluation order.
    pub rules: Vec<Rule>,
    /// Opaque provenance markers for downstream consumers.
    pub semantic_type_identifiers: Vec<String>,
}
