//! Irish Grid.
//!
//! Transverse Mercator on TM65: origin 8°W 53°30'N, scale 1.000035, false
//! origin (200 km, 250 km). A single letter names the 100 km square.

use super::{check_offsets, letter_square, square_corner, GridReference, SQUARE};
use crate::datum::TM65;
use crate::error::GeoError;
use crate::point::{GeodeticPoint, ProjectedPoint};
use crate::proj::{Crs, Projection, ProjectionKind, ProjectionParameters};

/// The Irish Grid CRS (EPSG:29900).
pub fn crs() -> Crs<'static> {
    Crs::new(
        &TM65,
        ProjectionKind::TransverseMercator,
        ProjectionParameters::default()
            .with_origin((-8.0_f64).to_radians(), 53.5_f64.to_radians())
            .with_scale_factor(1.000_035)
            .with_false_origin(200_000.0, 250_000.0),
    )
}

/// Letter an Irish Grid position.
pub fn encode(xy: &ProjectedPoint) -> Result<GridReference, GeoError> {
    let (letter, easting, northing) = letter_square(xy.x, xy.y, SQUARE, (0, 0))
        .ok_or_else(|| {
            GeoError::GridReference(format!("({}, {}) is off the Irish Grid", xy.x, xy.y))
        })?;
    Ok(GridReference {
        square: letter.to_string(),
        easting,
        northing,
        altitude: xy.altitude,
    })
}

/// Irish Grid position of a lettered reference.
pub fn decode(grid: &GridReference) -> Result<ProjectedPoint, GeoError> {
    check_offsets(grid.easting, grid.northing)?;
    let mut letters = grid.square.chars();
    let corner = match (letters.next(), letters.next()) {
        (Some(letter), None) => square_corner(letter, SQUARE, (0, 0)),
        _ => None,
    };
    let (x, y) = corner.ok_or_else(|| {
        GeoError::GridReference(format!("'{}' is not an Irish Grid square", grid.square))
    })?;
    Ok(ProjectedPoint::new(
        x + grid.easting,
        y + grid.northing,
        grid.altitude,
    ))
}

/// Grid reference of a position on TM65.
pub fn forward(lla: &GeodeticPoint) -> Result<GridReference, GeoError> {
    encode(&crs().forward(lla)?)
}

/// TM65 position of a grid reference.
pub fn inverse(grid: &GridReference) -> Result<GeodeticPoint, GeoError> {
    Ok(crs().inverse(&decode(grid)?)?)
}
