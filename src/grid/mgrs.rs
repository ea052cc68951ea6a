//! Military Grid Reference System.
//!
//! A UTM position named by its zone, latitude band and 100 km square.
//! Column letters run A..H, J..R and S..Z in zones congruent to 1, 2 and 0
//! modulo 3. Row letters repeat every 2000 km of northing, starting five
//! letters later in even zones. The polar UPS areas are not covered.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{check_offsets, parse_digits, square_digits, SQUARE};
use crate::datum::Datum;
use crate::error::GeoError;
use crate::point::GeodeticPoint;
use crate::proj::{Crs, Projection};
use crate::utm::{self, UtmGrid};

const COLUMNS: [&[u8; 8]; 3] = [b"STUVWXYZ", b"ABCDEFGH", b"JKLMNPQR"];
const ROWS: &[u8; 20] = b"ABCDEFGHJKLMNPQRSTUV";
const ROW_CYCLE: f64 = 2_000_000.0;

/// A point on the MGRS grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MgrsGrid {
    pub zone: u8,
    pub band: char,
    /// Column and row letters of the 100 km square.
    pub square: [char; 2],
    /// Easting inside the square.
    pub easting: f64,
    /// Northing inside the square.
    pub northing: f64,
    pub altitude: f64,
}

impl MgrsGrid {
    /// Compact reference with `digits` (0..=5) per axis, truncated.
    pub fn reference(&self, digits: usize) -> Result<String, GeoError> {
        Ok(format!(
            "{}{}{}{}{}",
            self.zone,
            self.band,
            self.square[0],
            self.square[1],
            square_digits(self.easting, self.northing, digits)?
        ))
    }
}

impl fmt::Display for MgrsGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {}{} {:05} {:05}",
            self.zone,
            self.band,
            self.square[0],
            self.square[1],
            self.easting.floor() as u32,
            self.northing.floor() as u32
        )
    }
}

impl FromStr for MgrsGrid {
    type Err = GeoError;

    /// Parse `18SUJ2348606483`, spaces and letter case ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GeoError::GridReference(format!("'{s}' is not an MGRS reference"));
        let compact: Vec<u8> = s
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .map(|b| b.to_ascii_uppercase())
            .collect();

        let zone_len = compact.iter().take_while(|b| b.is_ascii_digit()).count();
        if !(1..=2).contains(&zone_len) || compact.len() < zone_len + 3 {
            return Err(invalid());
        }
        let zone = compact[..zone_len]
            .iter()
            .fold(0u8, |acc, &b| acc * 10 + (b - b'0'));
        let [band, column, row] = [0, 1, 2].map(|i| char::from(compact[zone_len + i]));
        if !(1..=60).contains(&zone) || utm::band_latitude(band).is_none() {
            return Err(invalid());
        }
        let (easting, northing) = parse_digits(&compact[zone_len + 3..]).ok_or_else(invalid)?;
        let grid = MgrsGrid {
            zone,
            band,
            square: [column, row],
            easting,
            northing,
            altitude: 0.0,
        };
        square_indices(&grid)?;
        Ok(grid)
    }
}

fn columns(zone: u8) -> &'static [u8; 8] {
    COLUMNS[usize::from(zone % 3)]
}

fn row_shift(zone: u8) -> usize {
    if zone % 2 == 0 {
        5
    } else {
        0
    }
}

/// Column (1..=8) and row (0..20 within the cycle) of the square letters.
fn square_indices(grid: &MgrsGrid) -> Result<(usize, usize), GeoError> {
    let invalid = || {
        GeoError::GridReference(format!(
            "{}{} is not a square of zone {}",
            grid.square[0], grid.square[1], grid.zone
        ))
    };
    let position = |letters: &[u8], c: char| {
        letters
            .iter()
            .position(|&l| char::from(l) == c.to_ascii_uppercase())
    };
    let column = position(columns(grid.zone), grid.square[0]).ok_or_else(invalid)? + 1;
    let row = position(ROWS, grid.square[1]).ok_or_else(invalid)?;
    Ok((column, (row + ROWS.len() - row_shift(grid.zone)) % ROWS.len()))
}

/// Name the 100 km square of a UTM position.
pub fn from_utm(grid: &UtmGrid) -> Result<MgrsGrid, GeoError> {
    let column = (grid.easting / SQUARE).floor();
    let row = (grid.northing / SQUARE).floor();
    if !(1..=60).contains(&grid.zone) || !(1.0..=8.0).contains(&column) || !row.is_finite() {
        return Err(GeoError::GridReference(format!(
            "({}, {}) in zone {} has no MGRS square",
            grid.easting, grid.northing, grid.zone
        )));
    }
    let row_index = (row.rem_euclid(20.0) as usize + row_shift(grid.zone)) % ROWS.len();
    Ok(MgrsGrid {
        zone: grid.zone,
        band: grid.band,
        square: [
            char::from(columns(grid.zone)[column as usize - 1]),
            char::from(ROWS[row_index]),
        ],
        easting: grid.easting - column * SQUARE,
        northing: grid.northing - row * SQUARE,
        altitude: grid.altitude,
    })
}

/// Full UTM coordinates of an MGRS position.
///
/// The row letter fixes the northing modulo 2000 km; the band picks the
/// cycle, starting one square below the band's southern edge on the
/// central meridian.
pub fn to_utm(datum: &Datum, grid: &MgrsGrid) -> Result<UtmGrid, GeoError> {
    check_offsets(grid.easting, grid.northing)?;
    let (column, row) = square_indices(grid)?;
    let south = utm::band_latitude(grid.band).ok_or_else(|| {
        GeoError::GridReference(format!("'{}' is not a UTM latitude band", grid.band))
    })?;
    let north = grid.band >= 'N';
    let crs = Crs::utm(datum, grid.zone, north)?;
    let edge = crs.forward(&GeodeticPoint::new(crs.params.lambda0, south, 0.0))?;
    let floor = edge.y - SQUARE;

    let mut northing = row as f64 * SQUARE + grid.northing;
    northing += ((floor - northing) / ROW_CYCLE).ceil().max(0.0) * ROW_CYCLE;
    Ok(UtmGrid {
        zone: grid.zone,
        band: grid.band,
        easting: column as f64 * SQUARE + grid.easting,
        northing,
        altitude: grid.altitude,
    })
}

/// Project a geodetic position onto the MGRS grid.
pub fn forward(datum: &Datum, lla: &GeodeticPoint) -> Result<MgrsGrid, GeoError> {
    from_utm(&utm::forward(datum, lla)?)
}

/// Geodetic position of an MGRS point.
pub fn inverse(datum: &Datum, grid: &MgrsGrid) -> Result<GeodeticPoint, GeoError> {
    utm::inverse(datum, &to_utm(datum, grid)?)
}
