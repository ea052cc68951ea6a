//! Universal Transverse Mercator grid references.
//!
//! Zones are 6° wide starting at 180°W, with the Norway (32V) and Svalbard
//! (31X, 33X, 35X, 37X) exceptions. Latitude bands are 8° tall from 80°S,
//! band X stretching to 84°N.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::datum::Datum;
use crate::error::{GeoError, ProjError};
use crate::point::{GeodeticPoint, ProjectedPoint};
use crate::proj::{Crs, Projection};

const BANDS: &[u8; 20] = b"CDEFGHJKLMNPQRSTUVWX";

/// A point on the UTM grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UtmGrid {
    pub zone: u8,
    pub band: char,
    pub easting: f64,
    pub northing: f64,
    pub altitude: f64,
}

impl UtmGrid {
    /// Bands `N` and above lie in the northern hemisphere.
    pub fn is_north(&self) -> bool {
        self.band >= 'N'
    }
}

/// Wrap a longitude in degrees into [-180, 180).
fn wrap_degrees(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// UTM zone number (1..=60) of a position given in radians.
pub fn zone_number(longitude: f64, latitude: f64) -> u8 {
    let lon = wrap_degrees(longitude.to_degrees());
    let lat = latitude.to_degrees();

    if (56.0..64.0).contains(&lat) && (3.0..12.0).contains(&lon) {
        return 32;
    }
    if (72.0..84.0).contains(&lat) {
        match lon {
            l if (0.0..9.0).contains(&l) => return 31,
            l if (9.0..21.0).contains(&l) => return 33,
            l if (21.0..33.0).contains(&l) => return 35,
            l if (33.0..42.0).contains(&l) => return 37,
            _ => {}
        }
    }
    // lon is within [-180, 180) so the floor lies in 0..=59
    ((lon + 180.0) / 6.0).floor() as u8 + 1
}

/// Latitude band letter, `None` outside 80°S..84°N.
pub fn latitude_band(latitude: f64) -> Option<char> {
    let lat = latitude.to_degrees();
    if !(-80.0..84.0).contains(&lat) {
        return None;
    }
    let index = (((lat + 80.0) / 8.0).floor() as usize).min(BANDS.len() - 1);
    Some(char::from(BANDS[index]))
}

/// Southern edge of a latitude band in radians, `None` for letters outside
/// C..X.
pub fn band_latitude(band: char) -> Option<f64> {
    let index = BANDS.iter().position(|&b| char::from(b) == band)?;
    Some((index as f64 * 8.0 - 80.0).to_radians())
}

/// Project a geodetic position onto its UTM zone.
pub fn forward(datum: &Datum, lla: &GeodeticPoint) -> Result<UtmGrid, GeoError> {
    let band = latitude_band(lla.latitude).ok_or_else(|| {
        ProjError::InvalidParameter(format!(
            "latitude {} is outside the UTM coverage",
            lla.latitude.to_degrees()
        ))
    })?;
    let zone = zone_number(lla.longitude, lla.latitude);
    let crs = Crs::utm(datum, zone, lla.latitude >= 0.0)?;
    let xy = crs.forward(lla)?;
    Ok(UtmGrid {
        zone,
        band,
        easting: xy.x,
        northing: xy.y,
        altitude: xy.altitude,
    })
}

/// Geodetic position of a UTM grid reference.
pub fn inverse(datum: &Datum, grid: &UtmGrid) -> Result<GeodeticPoint, GeoError> {
    if band_latitude(grid.band).is_none() {
        return Err(ProjError::InvalidParameter(format!(
            "'{}' is not a UTM latitude band",
            grid.band
        ))
        .into());
    }
    let crs = Crs::utm(datum, grid.zone, grid.is_north())?;
    let xy = ProjectedPoint::new(grid.easting, grid.northing, grid.altitude);
    Ok(crs.inverse(&xy)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::WGS84_DATUM;
    use approx::assert_relative_eq;

    fn deg(lon: f64, lat: f64) -> GeodeticPoint {
        GeodeticPoint::from_degrees(lon, lat, 0.0)
    }

    #[test]
    fn test_zone_number() {
        let cases: &[((f64, f64), u8)] = &[
            ((-180.0, 0.0), 1),
            ((-177.0, 10.0), 1),
            ((3.0, 45.0), 31),
            ((179.9, 0.0), 60),
            ((183.0, 0.0), 1),
            ((151.21, -33.87), 56),
            ((5.32, 60.39), 32), // Bergen, Norway exception
            ((2.0, 60.0), 31),
            ((8.0, 78.0), 31),
            ((10.0, 78.0), 33),
            ((25.0, 78.0), 35),
            ((40.0, 78.0), 37),
            ((45.0, 78.0), 38),
        ];
        for &((lon, lat), zone) in cases {
            let p = deg(lon, lat);
            assert_eq!(zone_number(p.longitude, p.latitude), zone, "({lon}, {lat})");
        }
    }

    #[test]
    fn test_latitude_band() {
        let cases: &[(f64, Option<char>)] = &[
            (-79.9, Some('C')),
            (-33.87, Some('H')),
            (-0.1, Some('M')),
            (0.0, Some('N')),
            (45.0, Some('T')),
            (60.0, Some('V')),
            (83.9, Some('X')),
            (84.5, None),
            (-80.5, None),
        ];
        for &(lat, band) in cases {
            assert_eq!(latitude_band(lat.to_radians()), band, "{lat}");
        }
    }

    #[test]
    fn test_band_latitude() {
        let cases: &[(char, Option<f64>)] = &[
            ('C', Some(-80.0)),
            ('M', Some(-8.0)),
            ('N', Some(0.0)),
            ('X', Some(72.0)),
            ('I', None),
            ('Y', None),
            ('n', None),
        ];
        for &(band, south) in cases {
            assert_eq!(band_latitude(band).map(f64::to_degrees), south, "{band}");
        }
        for lat in [-79.0, -33.87, 0.5, 45.0, 83.0] {
            let band = latitude_band(f64::to_radians(lat)).unwrap();
            let south = band_latitude(band).unwrap().to_degrees();
            assert!(south <= lat && lat - south < 12.0, "{band}");
        }
    }

    #[test]
    fn test_forward_known_point() {
        let grid = forward(&WGS84_DATUM, &deg(3.0, 45.0)).unwrap();
        assert_eq!(grid.zone, 31);
        assert_eq!(grid.band, 'T');
        assert_relative_eq!(grid.easting, 500_000.0, epsilon = 1e-3);
        assert_relative_eq!(grid.northing, 4_982_950.4002, epsilon = 1e-3);
    }

    #[test]
    fn test_roundtrip() {
        for &(lon, lat) in &[(151.21, -33.87), (5.32, 60.39), (-74.0, 40.7), (15.0, 78.0)] {
            let p = deg(lon, lat);
            let grid = forward(&WGS84_DATUM, &p).unwrap();
            assert_eq!(grid.is_north(), lat >= 0.0);
            let back = inverse(&WGS84_DATUM, &grid).unwrap();
            assert_relative_eq!(back.longitude, p.longitude, epsilon = 1e-10);
            assert_relative_eq!(back.latitude, p.latitude, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_out_of_coverage() {
        assert!(forward(&WGS84_DATUM, &deg(0.0, 85.0)).is_err());
        let grid = UtmGrid {
            zone: 31,
            band: 'I',
            easting: 500_000.0,
            northing: 0.0,
            altitude: 0.0,
        };
        assert!(inverse(&WGS84_DATUM, &grid).is_err());
        let grid = UtmGrid { zone: 0, band: 'N', ..grid };
        assert!(matches!(
            inverse(&WGS84_DATUM, &grid),
            Err(GeoError::Projection(ProjError::InvalidParameter(_)))
        ));
    }
}
