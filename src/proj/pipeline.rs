//! CRS-to-CRS transform chain: inverse projection in the
//! source CRS, datum shift, forward projection in the destination CRS.

use crate::error::ProjError;
use crate::point::{GeodeticPoint, ProjectedPoint};
use crate::proj::{Crs, Projection};

/// A CRS-to-CRS transform pipeline.
///
/// The datum shift is skipped when both CRS share a datum.
#[derive(Clone, Copy, Debug)]
pub struct Pipeline<'d> {
    src: Crs<'d>,
    dst: Crs<'d>,
    shift_datum: bool,
}

impl<'d> Pipeline<'d> {
    pub fn new(src: Crs<'d>, dst: Crs<'d>) -> Self {
        let shift_datum = !src.shares_datum(&dst);
        Self {
            src,
            dst,
            shift_datum,
        }
    }

    pub fn src(&self) -> &Crs<'d> {
        &self.src
    }

    pub fn dst(&self) -> &Crs<'d> {
        &self.dst
    }

    /// The pipeline running the other way.
    pub fn reversed(&self) -> Self {
        Self::new(self.dst, self.src)
    }

    /// Move a geodetic position from the source datum onto the destination datum.
    fn shift(&self, lla: &GeodeticPoint) -> GeodeticPoint {
        if !self.shift_datum {
            log::trace!("pipeline: shared datum, skipping datum shift");
            return *lla;
        }
        self.src
            .datum
            .transform_geodetic(self.dst.datum, lla)
            .into_value()
    }

    /// Transform a single point from source CRS to destination CRS.
    ///
    /// Coordinates are in the unit of their respective CRS.
    pub fn transform(&self, point: &ProjectedPoint) -> Result<ProjectedPoint, ProjError> {
        let lla = self.src.inverse(point)?;
        self.dst.forward(&self.shift(&lla))
    }

    /// Batch transform from source CRS to destination CRS.
    pub fn transform_batch(
        &self,
        points: &[ProjectedPoint],
    ) -> Result<Vec<ProjectedPoint>, ProjError> {
        points.iter().map(|p| self.transform(p)).collect()
    }
}
