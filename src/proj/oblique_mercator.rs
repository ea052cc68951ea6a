//! Hotine oblique Mercator (rectified skew orthomorphic without the final
//! rectification).
//!
//! The ellipsoid is mapped conformally onto an aposphere of constant total
//! curvature, on which the central line through the projection centre
//! (λc, φc) with azimuth αc becomes the oblique equator:
//!
//!   B = √(1 + e²·cos⁴φc / (1 − e²)),  A = a·B·k₀·√(1 − e²) / (1 − e²·sin²φc)
//!   D = B·√(1 − e²) / (cos φc·√(1 − e²·sin²φc)),  F = D ± √(D² − 1)
//!   H = F·t₀^B,  G = (F − 1/F)/2,  γ₀ = asin(sin αc / D)
//!   λ₀ = λc − asin(G·tan γ₀)/B
//!
//! with t = exp(−ψ). Skew coordinates (u, v) are not rotated back onto the
//! grid: x = u − uc + x₀, y = v + y₀, where uc is u at the centre.

use std::f64::consts::FRAC_PI_2;

use crate::common::{isometric_latitude, latitude_from_isometric};
use crate::convergence::{Convergence, EPS};
use crate::error::ProjError;
use crate::point::{GeodeticPoint, ProjectedPoint};
use crate::proj::{check_not_polar, check_scale_factor, Crs};

/// Constants of the aposphere and its oblique equator.
#[derive(Clone, Copy, Debug)]
struct Aposphere {
    a: f64,
    b: f64,
    h: f64,
    sin_g0: f64,
    cos_g0: f64,
    /// Longitude where the central line crosses the aposphere equator.
    lon0: f64,
    /// u of the projection centre.
    uc: f64,
}

impl Aposphere {
    fn new(crs: &Crs) -> Result<Self, ProjError> {
        let p = &crs.params;
        check_scale_factor(p.k0)?;
        check_not_polar("phi0", p.phi0)?;

        let e2 = crs.datum.ellipsoid.e2();
        let e = crs.datum.ellipsoid.e();
        let (sin_phic, cos_phic) = p.phi0.sin_cos();
        let w2 = 1.0 - e2 * sin_phic * sin_phic;

        let b = (1.0 + e2 * cos_phic.powi(4) / (1.0 - e2)).sqrt();
        let a = crs.datum.ellipsoid.a() * b * p.k0 * (1.0 - e2).sqrt() / w2;
        let t0 = (-isometric_latitude(e, p.phi0)).exp();
        let d = b * (1.0 - e2).sqrt() / (cos_phic * w2.sqrt());
        let d2 = (d * d).max(1.0);
        let f = d + (d2 - 1.0).sqrt().copysign(p.phi0);
        let h = f * t0.powf(b);
        let g = (f - 1.0 / f) / 2.0;

        let sin_g0 = p.azimuth.sin() / d;
        if !p.azimuth.is_finite() || sin_g0.abs() > 1.0 {
            return Err(ProjError::InvalidParameter(format!(
                "azimuth {} is not reachable from latitude {}",
                p.azimuth, p.phi0
            )));
        }
        let g0 = sin_g0.asin();
        if (FRAC_PI_2 - g0.abs()) < EPS {
            return Err(ProjError::InvalidParameter(format!(
                "central line with azimuth {} never crosses the aposphere equator",
                p.azimuth
            )));
        }
        let lon0 = p.lambda0 - (g * g0.tan()).asin() / b;

        let mut aposphere = Self {
            a,
            b,
            h,
            sin_g0,
            cos_g0: g0.cos(),
            lon0,
            uc: 0.0,
        };
        aposphere.uc = aposphere.skew(e, p.lambda0, p.phi0)?.0;
        Ok(aposphere)
    }

    /// Raw skew coordinates (u, v) of a geodetic position.
    fn skew(&self, e: f64, lon: f64, lat: f64) -> Result<(f64, f64), ProjError> {
        let t = (-isometric_latitude(e, lat)).exp();
        let q = self.h / t.powf(self.b);
        let s = (q - 1.0 / q) / 2.0;
        let tq = (q + 1.0 / q) / 2.0;
        let dl = self.b * (lon - self.lon0);
        let sin_dl = dl.sin();
        let w = (-sin_dl * self.cos_g0 + s * self.sin_g0) / tq;
        if !w.is_finite() || 1.0 - w.abs() < EPS {
            return Err(ProjError::TransformFailed(format!(
                "({lon}, {lat}) lies on a pole of the oblique sphere"
            )));
        }

        let v = self.a * ((1.0 - w) / (1.0 + w)).ln() / (2.0 * self.b);
        let u = self.a * (s * self.cos_g0 + sin_dl * self.sin_g0).atan2(dl.cos()) / self.b;
        Ok((u, v))
    }
}

pub fn forward(crs: &Crs, lla: &GeodeticPoint) -> Result<ProjectedPoint, ProjError> {
    let aposphere = Aposphere::new(crs)?;
    let (u, v) = aposphere.skew(crs.datum.ellipsoid.e(), lla.longitude, lla.latitude)?;
    Ok(ProjectedPoint {
        x: u - aposphere.uc + crs.params.x0,
        y: v + crs.params.y0,
        altitude: lla.altitude,
    })
}

pub fn inverse(crs: &Crs, xya: &ProjectedPoint) -> Result<Convergence<GeodeticPoint>, ProjError> {
    let ap = Aposphere::new(crs)?;
    let u = xya.x - crs.params.x0 + ap.uc;
    let v = xya.y - crs.params.y0;

    let q = (-ap.b * v / ap.a).exp();
    let s = (q - 1.0 / q) / 2.0;
    let tq = (q + 1.0 / q) / 2.0;
    let bu = ap.b * u / ap.a;
    let vs = bu.sin();
    let us = (vs * ap.cos_g0 + s * ap.sin_g0) / tq;
    if !us.is_finite() || 1.0 - us.abs() < EPS {
        return Err(ProjError::TransformFailed(format!(
            "({}, {}) maps onto a pole of the oblique sphere",
            xya.x, xya.y
        )));
    }

    let t = (ap.h / ((1.0 + us) / (1.0 - us)).sqrt()).powf(1.0 / ap.b);
    let longitude = ap.lon0 - (s * ap.cos_g0 - vs * ap.sin_g0).atan2(bu.cos()) / ap.b;
    Ok(
        latitude_from_isometric(crs.datum.ellipsoid.e(), -t.ln()).map(|latitude| GeodeticPoint {
            longitude,
            latitude,
            altitude: xya.altitude,
        }),
    )
}
