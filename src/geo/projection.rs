use crate::foundation::core::{Location, Point, Raster};

/// Project `(lat, lon)` degrees onto an equirectangular raster.
///
/// The raster's left edge is longitude -180 and its bottom edge latitude -90, so
/// `y` grows northwards. Out-of-range input is not clamped and lands outside the raster.
pub fn project(lat: f64, lon: f64, raster: Raster) -> Point {
    let w = f64::from(raster.width);
    let h = f64::from(raster.height);
    Point::new((w / 360.0) * (180.0 + lon), (h / 180.0) * (90.0 + lat))
}

/// [`project`] for a [`Location`].
pub fn project_location(location: &Location, raster: Raster) -> Point {
    project(location.lat, location.lon, raster)
}

#[cfg(test)]
#[path = "../../tests/unit/geo/projection.rs"]
mod tests;
