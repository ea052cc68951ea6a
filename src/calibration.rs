//! Raster map calibration.
//!
//! Pixel positions (column `px`, row `py`, top-left origin) are tied to
//! geodetic positions; each axis is interpolated on its own with a
//! Lagrange polynomial through the calibration points:
//!
//!   X(px) = L(px; pxᵢ → Xᵢ),  Y(py) = L(py; pyᵢ → Yᵢ)

use crate::error::GeoError;
use crate::interpolate::lagrange;
use crate::point::{GeodeticPoint, ProjectedPoint};
use crate::proj::{Crs, Projection};

/// A pixel tied to its geodetic and projected positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CalibrationPoint {
    pub px: f64,
    pub py: f64,
    pub geodetic: GeodeticPoint,
    pub projected: ProjectedPoint,
}

/// Calibration of a raster image drawn in `crs`.
#[derive(Clone, Debug)]
pub struct MapCalibration<'d> {
    crs: Crs<'d>,
    points: Vec<CalibrationPoint>,
}

impl<'d> MapCalibration<'d> {
    pub fn new(crs: &Crs<'d>) -> Self {
        Self {
            crs: *crs,
            points: Vec::new(),
        }
    }

    pub fn crs(&self) -> &Crs<'d> {
        &self.crs
    }

    pub fn points(&self) -> &[CalibrationPoint] {
        &self.points
    }

    /// Tie pixel (`px`, `py`) to a geodetic position.
    pub fn add_point(&mut self, px: f64, py: f64, lla: &GeodeticPoint) -> Result<(), GeoError> {
        let projected = self.crs.forward(lla)?;
        self.insert(px, py, *lla, projected)
    }

    /// Tie pixel (`px`, `py`) to a position in the CRS plane.
    pub fn add_projected_point(
        &mut self,
        px: f64,
        py: f64,
        xya: &ProjectedPoint,
    ) -> Result<(), GeoError> {
        let geodetic = self.crs.inverse(xya)?;
        self.insert(px, py, geodetic, *xya)
    }

    fn insert(
        &mut self,
        px: f64,
        py: f64,
        geodetic: GeodeticPoint,
        projected: ProjectedPoint,
    ) -> Result<(), GeoError> {
        if self.points.iter().any(|p| p.px == px || p.py == py) {
            return Err(GeoError::Calibration(format!(
                "pixel row or column of ({px}, {py}) already referenced"
            )));
        }
        self.points.push(CalibrationPoint {
            px,
            py,
            geodetic,
            projected,
        });
        Ok(())
    }

    /// Remove and return the calibration point at `index`.
    pub fn remove_point(&mut self, index: usize) -> Option<CalibrationPoint> {
        (index < self.points.len()).then(|| self.points.remove(index))
    }

    fn ensure_calibrated(&self) -> Result<(), GeoError> {
        if self.points.len() < 2 {
            return Err(GeoError::Calibration(format!(
                "at least two calibration points are needed, got {}",
                self.points.len()
            )));
        }
        Ok(())
    }

    fn axes(&self) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        let pxs = self.points.iter().map(|p| p.px).collect();
        let pys = self.points.iter().map(|p| p.py).collect();
        let xs = self.points.iter().map(|p| p.projected.x).collect();
        let ys = self.points.iter().map(|p| p.projected.y).collect();
        (pxs, pys, xs, ys)
    }

    /// Interpolated CRS position of pixel (`px`, `py`).
    pub fn map_to_crs(&self, px: f64, py: f64) -> Result<ProjectedPoint, GeoError> {
        self.ensure_calibrated()?;
        let (pxs, pys, xs, ys) = self.axes();
        Ok(ProjectedPoint::new(
            lagrange(px, &pxs, &xs)?,
            lagrange(py, &pys, &ys)?,
            0.0,
        ))
    }

    /// Interpolated geodetic position of pixel (`px`, `py`).
    pub fn map_to_geodetic(&self, px: f64, py: f64) -> Result<GeodeticPoint, GeoError> {
        let xya = self.map_to_crs(px, py)?;
        Ok(self.crs.inverse(&xya)?)
    }

    /// Interpolated pixel position of a geodetic point.
    pub fn crs_to_map(&self, lla: &GeodeticPoint) -> Result<(f64, f64), GeoError> {
        self.ensure_calibrated()?;
        let xya = self.crs.forward(lla)?;
        let (pxs, pys, xs, ys) = self.axes();
        Ok((lagrange(xya.x, &xs, &pxs)?, lagrange(xya.y, &ys, &pys)?))
    }
}
