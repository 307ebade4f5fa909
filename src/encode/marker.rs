use std::f64::consts::TAU;

use crate::data::dataset::{Category, Dataset};
use crate::foundation::core::{DateIndex, Point, Raster, Rgb};
use crate::foundation::error::{SceneError, SceneResult};
use crate::geo::projection::project_location;

/// Tessellation used to approximate marker circles.
pub const DEFAULT_POLYGON_SIDES: u32 = 50;

/// Radius of the location holding the date's maximum count, in raster pixels.
pub const DEFAULT_MAX_RADIUS: f64 = 40.0;

/// Logarithm used by the radius encoding.
///
/// The radius is a ratio of two logarithms, so the base does not change the shape of the
/// scale; it is recorded so a configured `max_radius` can be traced to the variant it
/// was tuned for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogBase {
    /// `log2`.
    #[default]
    Two,
    /// Natural logarithm.
    E,
}

impl LogBase {
    /// Logarithm of `v` in this base.
    pub fn log(self, v: f64) -> f64 {
        match self {
            Self::Two => v.log2(),
            Self::E => v.ln(),
        }
    }
}

/// Logarithmic count to radius mapping.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RadiusScale {
    /// Logarithm base.
    pub base: LogBase,
    /// Radius given to a count equal to the maximum.
    pub max_radius: f64,
}

impl Default for RadiusScale {
    fn default() -> Self {
        Self {
            base: LogBase::Two,
            max_radius: DEFAULT_MAX_RADIUS,
        }
    }
}

impl RadiusScale {
    /// Validate that `max_radius` is positive and finite.
    pub fn validate(&self) -> SceneResult<()> {
        if !(self.max_radius.is_finite() && self.max_radius > 0.0) {
            return Err(SceneError::validation("max_radius must be finite and > 0"));
        }
        Ok(())
    }

    /// `log(count) / log(max_count) * max_radius`, or `None` when the count should not be
    /// drawn.
    ///
    /// Counts `<= 0` are skipped. A `max_count <= 1` leaves the denominator at zero (or
    /// undefined), so nothing is drawn for that date either.
    pub fn radius(&self, count: f64, max_count: f64) -> Option<f64> {
        if count <= 0.0 || max_count <= 1.0 || count.is_nan() || max_count.is_nan() {
            return None;
        }
        let r = self.base.log(count) / self.base.log(max_count) * self.max_radius;
        Some(r.max(0.0))
    }
}

/// Integer form of [`RadiusScale::radius`] with the default base.
pub fn encode(count: i64, max_count: i64, max_radius: f64) -> Option<f64> {
    RadiusScale {
        base: LogBase::default(),
        max_radius,
    }
    .radius(count as f64, max_count as f64)
}

/// Fill style shared by every marker of one category.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerStyle {
    /// Fill color.
    pub color: Rgb,
    /// Fill opacity in `[0, 1]`.
    pub opacity: f64,
    /// Polygon sides used to draw the circle.
    pub sides: u32,
}

/// A filled circle for one location of one category.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Marker {
    /// Category the count belongs to.
    pub category: Category,
    /// Index of the series within its category.
    pub location: usize,
    /// Location name, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    /// Raw count at the scene's date.
    pub count: i64,
    /// Projected centre in raster pixels.
    pub position: Point,
    /// Radius in raster pixels, `>= 0`.
    pub radius: f64,
    /// Fill color.
    pub color: Rgb,
    /// Fill opacity.
    pub opacity: f64,
    /// Polygon sides used to draw the circle.
    pub sides: u32,
}

impl Marker {
    /// Vertices of the marker polygon.
    pub fn polygon(&self) -> Vec<Point> {
        regular_polygon(self.position, self.radius, self.sides)
    }
}

/// Inputs shared by every marker built for one date.
#[derive(Clone, Copy, Debug)]
pub struct MarkerCtx<'a> {
    /// Source counts.
    pub dataset: &'a Dataset,
    /// Date being drawn.
    pub date: DateIndex,
    /// Global maximum at `date`.
    pub max_count: i64,
    /// Projection target.
    pub raster: Raster,
    /// Count to radius mapping.
    pub scale: RadiusScale,
}

/// Markers for every drawable location of `category` at `ctx.date`, in series order.
///
/// Locations with no coordinates or a non-positive count are skipped.
pub fn build_markers(
    ctx: &MarkerCtx<'_>,
    category: Category,
    style: &MarkerStyle,
) -> Vec<Marker> {
    let max_count = ctx.max_count as f64;
    ctx.dataset
        .series(category)
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.location.is_no_data())
        .filter_map(|(i, s)| {
            let count = s.count_at(ctx.date)?;
            let radius = ctx.scale.radius(count as f64, max_count)?;
            Some(Marker {
                category,
                location: i,
                location_id: s.location.id.clone(),
                count,
                position: project_location(&s.location, ctx.raster),
                radius,
                color: style.color,
                opacity: style.opacity,
                sides: style.sides,
            })
        })
        .collect()
}

/// Vertices of a regular polygon centred on `center`, starting at angle 0 and winding
/// counter-clockwise.
pub fn regular_polygon(center: Point, radius: f64, sides: u32) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let theta = TAU * f64::from(i) / f64::from(sides);
            Point::new(
                center.x + radius * theta.cos(),
                center.y + radius * theta.sin(),
            )
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/encode/marker.rs"]
mod tests;
