//! Geohash, Maidenhead, Georef and GARS locators.
//!
//! Every system subdivides the longitude/latitude rectangle. Geohash halves
//! it alternately along longitude and latitude five bits per character.
//! Maidenhead splits a field of 20°×10° into 10×10 squares and 24×24
//! subsquares alternately. Georef uses 15° tiles, 1° tiles, then minutes;
//! GARS uses 30' cells, 15' quadrants and 5' keypads. Decoding returns the
//! cell edges, centre and half extent.

use crate::error::GeoError;
use crate::point::GeodeticPoint;

const GEOHASH_BASE32: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";
const GEOHASH_MAX_PRECISION: usize = 12;

/// Letters used by Georef and GARS (no I or O).
const MILITARY_LETTERS: &[u8; 24] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";

/// Slack on the cell edges, in degrees (about 0.1 mm).
const EDGE_TOLERANCE: f64 = 1e-9;

/// A decoded locator cell, in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocatorCell {
    pub centre: GeodeticPoint,
    /// Half-width of the cell in longitude.
    pub longitude_error: f64,
    /// Half-height of the cell in latitude.
    pub latitude_error: f64,
    /// West, south, east and north edges in degrees.
    edges: [f64; 4],
}

impl LocatorCell {
    fn from_edges(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            centre: GeodeticPoint::from_degrees((west + east) / 2.0, (south + north) / 2.0, 0.0),
            longitude_error: ((east - west) / 2.0).to_radians(),
            latitude_error: ((north - south) / 2.0).to_radians(),
            edges: [west, south, east, north],
        }
    }

    /// West, south, east and north edges in radians.
    pub fn bounds(&self) -> [f64; 4] {
        self.edges.map(f64::to_radians)
    }

    /// Whether the cell holds `lla`, edges included.
    pub fn contains(&self, lla: &GeodeticPoint) -> bool {
        let Ok((lon, lat)) = checked_degrees(lla.longitude, lla.latitude) else {
            return false;
        };
        let [west, south, east, north] = self.edges;
        (west - EDGE_TOLERANCE..=east + EDGE_TOLERANCE).contains(&lon)
            && (south - EDGE_TOLERANCE..=north + EDGE_TOLERANCE).contains(&lat)
    }
}

/// Validate a position in radians and return it in degrees, longitude
/// wrapped into [-180, 180).
fn checked_degrees(longitude: f64, latitude: f64) -> Result<(f64, f64), GeoError> {
    let lat = latitude.to_degrees();
    if !longitude.is_finite() || !(-90.0..=90.0).contains(&lat) {
        return Err(GeoError::Locator(format!(
            "cannot encode ({longitude}, {latitude})"
        )));
    }
    let lon = (longitude.to_degrees() + 180.0).rem_euclid(360.0) - 180.0;
    Ok((lon, lat))
}

/// Position as fractions of the whole longitude and latitude ranges.
fn fractions(longitude: f64, latitude: f64) -> Result<(f64, f64), GeoError> {
    let (lon, lat) = checked_degrees(longitude, latitude)?;
    Ok(((lon + 180.0) / 360.0, (lat + 90.0) / 180.0))
}

/// Index of `f` among `n` equal divisions of [0, 1]; `f` becomes the
/// fraction left inside that division.
fn split(f: &mut f64, n: usize) -> usize {
    let v = *f * n as f64;
    let i = (v.floor() as usize).min(n - 1);
    *f = v - i as f64;
    i
}

fn letter(index: usize) -> char {
    char::from(MILITARY_LETTERS[index])
}

/// Index of a Georef/GARS letter, either case, if below `limit`.
fn letter_index(b: u8, limit: usize) -> Option<usize> {
    MILITARY_LETTERS
        .iter()
        .position(|&l| l == b.to_ascii_uppercase())
        .filter(|&i| i < limit)
}

/// Value of an ASCII decimal field, if every byte is a digit.
fn decimal(bytes: &[u8]) -> Option<usize> {
    bytes.iter().try_fold(0usize, |acc, &b| {
        b.is_ascii_digit().then(|| acc * 10 + usize::from(b - b'0'))
    })
}

pub mod geohash {
    use super::*;

    /// Geohash of a position with `precision` characters (1..=12).
    pub fn encode(longitude: f64, latitude: f64, precision: usize) -> Result<String, GeoError> {
        if !(1..=GEOHASH_MAX_PRECISION).contains(&precision) {
            return Err(GeoError::Locator(format!(
                "geohash precision must be in 1..={GEOHASH_MAX_PRECISION}, got {precision}"
            )));
        }
        let (lon, lat) = checked_degrees(longitude, latitude)?;

        let mut lon_range = (-180.0, 180.0);
        let mut lat_range = (-90.0, 90.0);
        let mut even = true;
        let mut hash = String::with_capacity(precision);

        for _ in 0..precision {
            let mut index = 0usize;
            for _ in 0..5 {
                let (value, range) = if even {
                    (lon, &mut lon_range)
                } else {
                    (lat, &mut lat_range)
                };
                let mid = (range.0 + range.1) / 2.0;
                index <<= 1;
                if value >= mid {
                    index |= 1;
                    range.0 = mid;
                } else {
                    range.1 = mid;
                }
                even = !even;
            }
            hash.push(char::from(GEOHASH_BASE32[index]));
        }
        Ok(hash)
    }

    /// Cell of a geohash string.
    pub fn decode(hash: &str) -> Result<LocatorCell, GeoError> {
        if hash.is_empty() {
            return Err(GeoError::Locator("empty geohash".into()));
        }
        let mut lon_range = (-180.0_f64, 180.0_f64);
        let mut lat_range = (-90.0_f64, 90.0_f64);
        let mut even = true;

        for c in hash.chars() {
            let index = GEOHASH_BASE32
                .iter()
                .position(|&b| char::from(b) == c.to_ascii_lowercase())
                .ok_or_else(|| GeoError::Locator(format!("'{c}' is not a geohash digit")))?;
            for bit in (0..5).rev() {
                let range = if even { &mut lon_range } else { &mut lat_range };
                let mid = (range.0 + range.1) / 2.0;
                if (index >> bit) & 1 == 1 {
                    range.0 = mid;
                } else {
                    range.1 = mid;
                }
                even = !even;
            }
        }

        Ok(LocatorCell::from_edges(
            lon_range.0,
            lat_range.0,
            lon_range.1,
            lat_range.1,
        ))
    }
}

pub mod maidenhead {
    use super::*;

    const FIELD: u8 = b'A';
    const SUBSQUARE: u8 = b'a';

    /// Number of divisions of the `level`-th pair after the field.
    fn divisions(level: usize) -> usize {
        if level % 2 == 0 {
            10
        } else {
            24
        }
    }

    fn digit(index: usize, level: usize) -> char {
        let base = if divisions(level) == 10 { b'0' } else { SUBSQUARE };
        char::from(base + index as u8)
    }

    /// Maidenhead locator with a field pair followed by `level` pairs.
    pub fn encode(longitude: f64, latitude: f64, level: usize) -> Result<String, GeoError> {
        let (mut fx, mut fy) = fractions(longitude, latitude)?;
        let mut pair = |n: usize| (split(&mut fx, n), split(&mut fy, n));

        let mut locator = String::with_capacity(2 * (level + 1));
        let (i, j) = pair(18);
        locator.push(char::from(FIELD + i as u8));
        locator.push(char::from(FIELD + j as u8));
        for k in 0..level {
            let (i, j) = pair(divisions(k));
            locator.push(digit(i, k));
            locator.push(digit(j, k));
        }
        Ok(locator)
    }

    /// Cell of a Maidenhead locator, letters in either case.
    pub fn decode(locator: &str) -> Result<LocatorCell, GeoError> {
        let bytes = locator.as_bytes();
        if bytes.len() < 2 || bytes.len() % 2 != 0 {
            return Err(GeoError::Locator(format!(
                "'{locator}' does not hold whole character pairs"
            )));
        }
        let invalid = || GeoError::Locator(format!("'{locator}' is not a Maidenhead locator"));

        let field = |b: u8| {
            let i = b.to_ascii_uppercase().wrapping_sub(FIELD) as usize;
            (i < 18).then_some(i)
        };
        let mut lon = field(bytes[0]).ok_or_else(invalid)? as f64 * 20.0;
        let mut lat = field(bytes[1]).ok_or_else(invalid)? as f64 * 10.0;
        let (mut width, mut height) = (20.0, 10.0);

        for (k, pair) in bytes[2..].chunks_exact(2).enumerate() {
            let n = divisions(k);
            let index = |b: u8| {
                let i = if n == 10 {
                    b.wrapping_sub(b'0')
                } else {
                    b.to_ascii_lowercase().wrapping_sub(SUBSQUARE)
                };
                (usize::from(i) < n).then_some(usize::from(i))
            };
            width /= n as f64;
            height /= n as f64;
            lon += index(pair[0]).ok_or_else(invalid)? as f64 * width;
            lat += index(pair[1]).ok_or_else(invalid)? as f64 * height;
        }

        Ok(LocatorCell::from_edges(
            lon - 180.0,
            lat - 90.0,
            lon + width - 180.0,
            lat + height - 90.0,
        ))
    }
}

/// World Geographic Reference System.
///
/// Two letters pick a 15° tile (24 in longitude, 12 in latitude), two more
/// a 1° tile inside it, then each axis carries the same number of minute
/// digits: 2 for whole minutes, 3 for tenths, 4 for hundredths.
pub mod georef {
    use super::*;

    /// Minute divisions of a 1° tile for `digits` per axis.
    fn minute_divisions(digits: usize) -> Option<usize> {
        match digits {
            0 => Some(1),
            2 => Some(60),
            3 => Some(600),
            4 => Some(6_000),
            _ => None,
        }
    }

    /// Georef of a position with `digits` minute digits per axis (0, 2, 3
    /// or 4).
    pub fn encode(longitude: f64, latitude: f64, digits: usize) -> Result<String, GeoError> {
        let n = minute_divisions(digits).ok_or_else(|| {
            GeoError::Locator(format!("georef digits must be 0, 2, 3 or 4, got {digits}"))
        })?;
        let (mut fx, mut fy) = fractions(longitude, latitude)?;

        let mut georef = String::with_capacity(4 + 2 * digits);
        georef.push(letter(split(&mut fx, 24)));
        georef.push(letter(split(&mut fy, 12)));
        georef.push(letter(split(&mut fx, 15)));
        georef.push(letter(split(&mut fy, 15)));
        if digits > 0 {
            let (x, y) = (split(&mut fx, n), split(&mut fy, n));
            georef.push_str(&format!("{x:0digits$}{y:0digits$}"));
        }
        Ok(georef)
    }

    /// Cell of a Georef string, letters in either case.
    pub fn decode(georef: &str) -> Result<LocatorCell, GeoError> {
        let invalid = || GeoError::Locator(format!("'{georef}' is not a georef"));
        let bytes = georef.as_bytes();
        if bytes.len() < 4 || bytes.len() % 2 != 0 {
            return Err(invalid());
        }
        let digits = (bytes.len() - 4) / 2;
        let n = minute_divisions(digits).ok_or_else(invalid)?;

        let lon_tile = letter_index(bytes[0], 24).ok_or_else(invalid)?;
        let lat_tile = letter_index(bytes[1], 12).ok_or_else(invalid)?;
        let lon_degree = letter_index(bytes[2], 15).ok_or_else(invalid)?;
        let lat_degree = letter_index(bytes[3], 15).ok_or_else(invalid)?;
        let (x, y) = if digits > 0 {
            let x = decimal(&bytes[4..4 + digits]).filter(|&x| x < n);
            let y = decimal(&bytes[4 + digits..]).filter(|&y| y < n);
            (x.ok_or_else(invalid)?, y.ok_or_else(invalid)?)
        } else {
            (0, 0)
        };

        let size = 1.0 / n as f64;
        let west = (lon_tile * 15 + lon_degree) as f64 + x as f64 * size - 180.0;
        let south = (lat_tile * 15 + lat_degree) as f64 + y as f64 * size - 90.0;
        Ok(LocatorCell::from_edges(west, south, west + size, south + size))
    }
}

/// Global Area Reference System.
///
/// A 30' cell is named by a longitude band `001`..=`720` and two latitude
/// letters. Level 1 adds a 15' quadrant (1 to 4, NW, NE, SW, SE) and level
/// 2 a 5' keypad digit (1 to 9, read like a phone keypad from the north
/// west).
pub mod gars {
    use super::*;

    const CELL: f64 = 0.5;
    const QUADRANT: f64 = 0.25;
    const KEYPAD: f64 = 5.0 / 60.0;

    /// GARS of a position down to `level` (0..=2).
    pub fn encode(longitude: f64, latitude: f64, level: usize) -> Result<String, GeoError> {
        if level > 2 {
            return Err(GeoError::Locator(format!(
                "GARS level must be in 0..=2, got {level}"
            )));
        }
        let (mut fx, mut fy) = fractions(longitude, latitude)?;

        let band = split(&mut fx, 720);
        let row = split(&mut fy, 360);
        let mut gars = format!("{:03}{}{}", band + 1, letter(row / 24), letter(row % 24));
        if level >= 1 {
            let (j, i) = (split(&mut fx, 2), 1 - split(&mut fy, 2));
            gars.push_str(&(2 * i + j + 1).to_string());
        }
        if level == 2 {
            let (j, i) = (split(&mut fx, 3), 2 - split(&mut fy, 3));
            gars.push_str(&(3 * i + j + 1).to_string());
        }
        Ok(gars)
    }

    /// Cell of a GARS string, letters in either case.
    pub fn decode(gars: &str) -> Result<LocatorCell, GeoError> {
        let invalid = || GeoError::Locator(format!("'{gars}' is not a GARS area"));
        let bytes = gars.as_bytes();
        if !(5..=7).contains(&bytes.len()) {
            return Err(invalid());
        }
        let band = decimal(&bytes[..3])
            .filter(|b| (1..=720).contains(b))
            .ok_or_else(invalid)?;
        let row = letter_index(bytes[3], 15).ok_or_else(invalid)? * 24
            + letter_index(bytes[4], 24).ok_or_else(invalid)?;
        if row >= 360 {
            return Err(invalid());
        }

        let mut west = (band - 1) as f64 * CELL - 180.0;
        let mut south = row as f64 * CELL - 90.0;
        let mut size = CELL;
        if let Some(&q) = bytes.get(5) {
            let q = decimal(&[q]).filter(|q| (1..=4).contains(q)).ok_or_else(invalid)? - 1;
            west += (q % 2) as f64 * QUADRANT;
            south += (1 - q / 2) as f64 * QUADRANT;
            size = QUADRANT;
        }
        if let Some(&k) = bytes.get(6) {
            let k = decimal(&[k]).filter(|k| (1..=9).contains(k)).ok_or_else(invalid)? - 1;
            west += (k % 3) as f64 * KEYPAD;
            south += (2 - k / 3) as f64 * KEYPAD;
            size = KEYPAD;
        }
        Ok(LocatorCell::from_edges(west, south, west + size, south + size))
    }
}
