//! Lettered grid references on top of Transverse Mercator grids.
//!
//! `mgrs` names 100 km squares of the UTM zones. `bng` and `ing` name the
//! squares of the British and Irish national grids, both drawn from a 5×5
//! letter table (no I) read from the north west corner:
//!
//!   A B C D E
//!   F G H J K
//!   L M N O P
//!   Q R S T U
//!   V W X Y Z

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GeoError;

pub mod bng;
pub mod ing;
pub mod mgrs;

const LETTERS: &[u8; 25] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// Side of the squares the numeric part is measured in.
pub const SQUARE: f64 = 100_000.0;

/// Highest number of digits per axis in a written reference (metres).
pub const MAX_DIGITS: usize = 5;

/// A position on a national grid: the square letters and the offset inside
/// the 100 km square.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridReference {
    pub square: String,
    pub easting: f64,
    pub northing: f64,
    pub altitude: f64,
}

impl GridReference {
    /// Compact reference with `digits` (0..=5) per axis, truncated.
    pub fn reference(&self, digits: usize) -> Result<String, GeoError> {
        Ok(format!(
            "{}{}",
            self.square,
            square_digits(self.easting, self.northing, digits)?
        ))
    }
}

impl fmt::Display for GridReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:05} {:05}",
            self.square,
            self.easting.floor() as u32,
            self.northing.floor() as u32
        )
    }
}

impl FromStr for GridReference {
    type Err = GeoError;

    /// Parse letters followed by an even run of digits, spaces ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: Vec<u8> = s.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
        let split = compact
            .iter()
            .position(|b| !b.is_ascii_alphabetic())
            .unwrap_or(compact.len());
        if split == 0 {
            return Err(GeoError::GridReference(format!("'{s}' has no square letters")));
        }
        let (easting, northing) = parse_digits(&compact[split..])
            .ok_or_else(|| GeoError::GridReference(format!("'{s}' has unbalanced digits")))?;
        Ok(GridReference {
            square: String::from_utf8_lossy(&compact[..split]).to_ascii_uppercase(),
            easting,
            northing,
            altitude: 0.0,
        })
    }
}

/// Letter of the square of side `size` holding (`x`, `y`), with the offset
/// left inside it. `origin` is the table column and row (counted from the
/// bottom) of the square at the grid origin.
pub(crate) fn letter_square(
    x: f64,
    y: f64,
    size: f64,
    origin: (usize, usize),
) -> Option<(char, f64, f64)> {
    let (col, row) = ((x / size).floor(), (y / size).floor());
    let c = col + origin.0 as f64;
    let r = row + origin.1 as f64;
    // false for NaN too
    if !((0.0..5.0).contains(&c) && (0.0..5.0).contains(&r)) {
        return None;
    }
    let index = (4 - r as usize) * 5 + c as usize;
    Some((char::from(LETTERS[index]), x - col * size, y - row * size))
}

/// South west corner of a lettered square, the inverse of [`letter_square`].
pub(crate) fn square_corner(letter: char, size: f64, origin: (usize, usize)) -> Option<(f64, f64)> {
    let k = LETTERS
        .iter()
        .position(|&l| char::from(l) == letter.to_ascii_uppercase())?;
    let (c, r) = ((k % 5) as f64, (4 - k / 5) as f64);
    Some(((c - origin.0 as f64) * size, (r - origin.1 as f64) * size))
}

/// Both offsets truncated to `digits` each, easting first.
pub(crate) fn square_digits(easting: f64, northing: f64, digits: usize) -> Result<String, GeoError> {
    if digits > MAX_DIGITS {
        return Err(GeoError::GridReference(format!(
            "at most {MAX_DIGITS} digits per axis, got {digits}"
        )));
    }
    check_offsets(easting, northing)?;
    if digits == 0 {
        return Ok(String::new());
    }
    let unit = 10f64.powi((MAX_DIGITS - digits) as i32);
    let e = (easting / unit).floor() as u32;
    let n = (northing / unit).floor() as u32;
    Ok(format!("{e:0digits$}{n:0digits$}"))
}

/// Offsets of an even run of up to ten digits, in metres.
pub(crate) fn parse_digits(bytes: &[u8]) -> Option<(f64, f64)> {
    if bytes.len() % 2 != 0 || bytes.len() > 2 * MAX_DIGITS {
        return None;
    }
    let half = bytes.len() / 2;
    let value = |part: &[u8]| {
        part.iter().try_fold(0u32, |acc, &b| {
            b.is_ascii_digit().then(|| acc * 10 + u32::from(b - b'0'))
        })
    };
    let unit = 10f64.powi((MAX_DIGITS - half) as i32);
    let e = value(&bytes[..half])?;
    let n = value(&bytes[half..])?;
    Some((f64::from(e) * unit, f64::from(n) * unit))
}

/// Offsets inside the square, checked to lie in [0, 100 km).
pub(crate) fn check_offsets(easting: f64, northing: f64) -> Result<(), GeoError> {
    if (0.0..SQUARE).contains(&easting) && (0.0..SQUARE).contains(&northing) {
        Ok(())
    } else {
        Err(GeoError::GridReference(format!(
            "({easting}, {northing}) lies outside its 100 km square"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_table() {
        let cases: &[((f64, f64), (usize, usize), char)] = &[
            ((0.0, 0.0), (0, 0), 'V'),
            ((450_000.0, 0.0), (0, 0), 'Z'),
            ((0.0, 499_999.0), (0, 0), 'A'),
            ((310_000.0, 250_000.0), (0, 0), 'O'),
            ((0.0, 0.0), (2, 1), 'S'),
            ((-1.0, 0.0), (2, 1), 'R'),
        ];
        for &((x, y), origin, letter) in cases {
            let size = if origin == (0, 0) { SQUARE } else { 5.0 * SQUARE };
            let (found, ..) = letter_square(x, y, size, origin).unwrap();
            assert_eq!(found, letter, "({x}, {y})");
            let (cx, cy) = square_corner(letter, size, origin).unwrap();
            assert!(cx <= x && x < cx + size && cy <= y && y < cy + size);
        }
        assert!(letter_square(500_000.0, 0.0, SQUARE, (0, 0)).is_none());
        assert!(letter_square(f64::NAN, 0.0, SQUARE, (0, 0)).is_none());
        assert!(square_corner('I', SQUARE, (0, 0)).is_none());
    }

    #[test]
    fn test_digits() {
        assert_eq!(square_digits(30_052.7, 81_627.2, 5).unwrap(), "3005281627");
        assert_eq!(square_digits(30_052.7, 81_627.2, 3).unwrap(), "300816");
        assert_eq!(square_digits(30_052.7, 81_627.2, 0).unwrap(), "");
        assert!(square_digits(30_052.7, 81_627.2, 6).is_err());
        assert!(square_digits(100_000.0, 0.0, 5).is_err());

        assert_eq!(parse_digits(b"3005281627"), Some((30_052.0, 81_627.0)));
        assert_eq!(parse_digits(b"300816"), Some((30_000.0, 81_600.0)));
        assert_eq!(parse_digits(b""), Some((0.0, 0.0)));
        assert_eq!(parse_digits(b"30052816"), Some((30_050.0, 81_620.0)));
        assert!(parse_digits(b"300").is_none());
        assert!(parse_digits(b"30x816").is_none());
        assert!(parse_digits(b"300528162700").is_none());
    }

    #[test]
    fn test_parse_reference() {
        let grid: GridReference = "tq 30052 81627".parse().unwrap();
        assert_eq!(grid.square, "TQ");
        assert_eq!((grid.easting, grid.northing), (30_052.0, 81_627.0));
        assert_eq!(grid.to_string(), "TQ 30052 81627");
        assert_eq!(grid.reference(2).unwrap(), "TQ3081");

        for bad in ["", "30052 81627", "TQ 3005 816", "TQ 30052 8162x"] {
            assert!(bad.parse::<GridReference>().is_err(), "{bad}");
        }
    }
}
