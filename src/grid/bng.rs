//! Ordnance Survey National Grid of Great Britain.
//!
//! Transverse Mercator on OSGB36: origin 2°W 49°N, scale 0.9996012717,
//! false origin (400 km, −100 km). A first letter names the 500 km square
//! (S at the false origin of the grid), a second the 100 km square inside
//! it.

use super::{check_offsets, letter_square, square_corner, GridReference, SQUARE};
use crate::datum::OSGB36;
use crate::error::GeoError;
use crate::point::{GeodeticPoint, ProjectedPoint};
use crate::proj::{Crs, Projection, ProjectionKind, ProjectionParameters};

const MAJOR: f64 = 5.0 * SQUARE;
/// Table cell of square S.
const MAJOR_ORIGIN: (usize, usize) = (2, 1);

/// The National Grid CRS (EPSG:27700).
pub fn crs() -> Crs<'static> {
    Crs::new(
        &OSGB36,
        ProjectionKind::TransverseMercator,
        ProjectionParameters::default()
            .with_origin((-2.0_f64).to_radians(), 49.0_f64.to_radians())
            .with_scale_factor(0.999_601_271_7)
            .with_false_origin(400_000.0, -100_000.0),
    )
}

/// Letter a National Grid position.
pub fn encode(xy: &ProjectedPoint) -> Result<GridReference, GeoError> {
    let outside = || {
        GeoError::GridReference(format!("({}, {}) is off the National Grid", xy.x, xy.y))
    };
    let (major, x, y) = letter_square(xy.x, xy.y, MAJOR, MAJOR_ORIGIN).ok_or_else(outside)?;
    let (minor, easting, northing) = letter_square(x, y, SQUARE, (0, 0)).ok_or_else(outside)?;
    Ok(GridReference {
        square: [major, minor].iter().collect(),
        easting,
        northing,
        altitude: xy.altitude,
    })
}

/// National Grid position of a lettered reference.
pub fn decode(grid: &GridReference) -> Result<ProjectedPoint, GeoError> {
    let invalid = || {
        GeoError::GridReference(format!("'{}' is not a National Grid square", grid.square))
    };
    check_offsets(grid.easting, grid.northing)?;
    let mut letters = grid.square.chars();
    let (Some(major), Some(minor), None) = (letters.next(), letters.next(), letters.next()) else {
        return Err(invalid());
    };
    let (x5, y5) = square_corner(major, MAJOR, MAJOR_ORIGIN).ok_or_else(invalid)?;
    let (x1, y1) = square_corner(minor, SQUARE, (0, 0)).ok_or_else(invalid)?;
    Ok(ProjectedPoint::new(
        x5 + x1 + grid.easting,
        y5 + y1 + grid.northing,
        grid.altitude,
    ))
}

/// Grid reference of a position on OSGB36.
pub fn forward(lla: &GeodeticPoint) -> Result<GridReference, GeoError> {
    encode(&crs().forward(lla)?)
}

/// OSGB36 position of a grid reference.
pub fn inverse(grid: &GridReference) -> Result<GeodeticPoint, GeoError> {
    Ok(crs().inverse(&decode(grid)?)?)
}
