//! Vincenty's direct and inverse solutions of the geodesic problem on an
//! ellipsoid of revolution, and equal-step path interpolation.
//!
//! Both problems work on the auxiliary sphere with reduced latitudes
//! U = atan((1 − f)·tan φ). The distance series uses
//!
//!   u² = cos²α·e'²,  k₁ = (√(1 + u²) − 1)/(√(1 + u²) + 1)
//!   A = (1 + k₁²/4)/(1 − k₁),  B = k₁·(1 − 3k₁²/8)
//!   Δσ = B·sinσ·(cos2σm + B/4·(cosσ·(−1 + 2cos²2σm)
//!        − B/6·cos2σm·(−3 + 4sin²σ)·(−3 + 4cos²2σm)))
//!   s = b·A·(σ − Δσ)

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::convergence::{fixed_point, Convergence, EPS, MAX_ITER};
use crate::ellipsoid::Ellipsoid;
use crate::point::GeodeticPoint;

/// Solution of the inverse problem.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeodesicSegment {
    /// Metres along the ellipsoid surface.
    pub distance: f64,
    /// Azimuth at the start point, clockwise from north (radians).
    pub initial_bearing: f64,
    /// Azimuth at the end point.
    pub final_bearing: f64,
}

/// Solution of the direct problem.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeodesicTarget {
    pub longitude: f64,
    pub latitude: f64,
    /// Forward azimuth of the geodesic at the destination.
    pub bearing: f64,
}

impl GeodesicTarget {
    /// The destination as a point on the ellipsoid surface.
    pub fn point(&self) -> GeodeticPoint {
        GeodeticPoint::new(self.longitude, self.latitude, 0.0)
    }
}

struct SeriesCoefficients {
    a: f64,
    b: f64,
}

impl SeriesCoefficients {
    fn new(ellipsoid: &Ellipsoid, cos2_alpha: f64) -> Self {
        let b = ellipsoid.b();
        let u2 = cos2_alpha * (ellipsoid.a() * ellipsoid.a() - b * b) / (b * b);
        let root = (1.0 + u2).sqrt();
        let k1 = (root - 1.0) / (root + 1.0);
        Self {
            a: (1.0 + k1 * k1 / 4.0) / (1.0 - k1),
            b: k1 * (1.0 - 3.0 * k1 * k1 / 8.0),
        }
    }

    fn delta_sigma(&self, sin_sigma: f64, cos_sigma: f64, cos_2sm: f64) -> f64 {
        let b = self.b;
        let c2 = cos_2sm * cos_2sm;
        b * sin_sigma
            * (cos_2sm
                + b / 4.0
                    * (cos_sigma * (-1.0 + 2.0 * c2)
                        - b / 6.0
                            * cos_2sm
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * c2)))
    }
}

/// Longitude correction term shared by both problems:
/// (1 − C)·f·sinα·(σ + C·sinσ·(cos2σm + C·cosσ·(−1 + 2cos²2σm))).
fn lambda_correction(
    f: f64,
    sin_alpha: f64,
    cos2_alpha: f64,
    sigma: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    cos_2sm: f64,
) -> f64 {
    let c = f / 16.0 * cos2_alpha * (4.0 + f * (4.0 - 3.0 * cos2_alpha));
    (1.0 - c)
        * f
        * sin_alpha
        * (sigma + c * sin_sigma * (cos_2sm + c * cos_sigma * (-1.0 + 2.0 * cos_2sm * cos_2sm)))
}

fn reduced_latitude(ellipsoid: &Ellipsoid, phi: f64) -> (f64, f64) {
    ((1.0 - ellipsoid.f()) * phi.tan()).atan().sin_cos()
}

/// Distance and bearings between two points.
///
/// Coincident points short-circuit to a zero segment with no iteration.
/// Nearly antipodal points may stop on the iteration cap, in which case
/// the returned segment is the last estimate.
pub fn solve_inverse(
    ellipsoid: &Ellipsoid,
    start: &GeodeticPoint,
    end: &GeodeticPoint,
) -> Convergence<GeodesicSegment> {
    let f = ellipsoid.f();
    let big_l = end.longitude - start.longitude;
    let (sin_u1, cos_u1) = reduced_latitude(ellipsoid, start.latitude);
    let (sin_u2, cos_u2) = reduced_latitude(ellipsoid, end.latitude);

    let mut lambda = big_l;
    let mut iterations = 0;
    let (sigma, sin_sigma, cos_sigma, cos2_alpha, cos_2sm, converged) = loop {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma =
            (cos_u2 * sin_lambda).hypot(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
        if sin_sigma < EPS {
            log::trace!("solve_inverse: degenerate geometry, sin(sigma) = {sin_sigma:e}");
            return Convergence::exact(GeodesicSegment::default());
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos2_alpha = 1.0 - sin_alpha * sin_alpha;
        // Equatorial lines have cos²α = 0
        let cos_2sm = if cos2_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos2_alpha
        } else {
            0.0
        };

        let next = big_l
            + lambda_correction(f, sin_alpha, cos2_alpha, sigma, sin_sigma, cos_sigma, cos_2sm);
        iterations += 1;
        let delta = (next - lambda).abs();
        lambda = next;
        if delta <= EPS || iterations >= MAX_ITER {
            let converged = delta <= EPS;
            if !converged {
                log::debug!(
                    "solve_inverse: stopped after {iterations} iterations, |delta| = {delta:e}"
                );
            }
            break (sigma, sin_sigma, cos_sigma, cos2_alpha, cos_2sm, converged);
        }
    };

    let series = SeriesCoefficients::new(ellipsoid, cos2_alpha);
    let distance =
        ellipsoid.b() * series.a * (sigma - series.delta_sigma(sin_sigma, cos_sigma, cos_2sm));

    let (sin_lambda, cos_lambda) = lambda.sin_cos();
    let initial_bearing =
        (cos_u2 * sin_lambda).atan2(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda);
    let final_bearing =
        (cos_u1 * sin_lambda).atan2(-sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda);

    Convergence::new(
        GeodesicSegment {
            distance,
            initial_bearing,
            final_bearing,
        },
        converged,
        iterations,
    )
}

/// Destination reached from `start` along `segment.initial_bearing` after
/// `segment.distance` metres. `segment.final_bearing` is ignored.
pub fn solve_direct(
    ellipsoid: &Ellipsoid,
    start: &GeodeticPoint,
    segment: &GeodesicSegment,
) -> Convergence<GeodesicTarget> {
    let f = ellipsoid.f();
    let (sin_u1, cos_u1) = reduced_latitude(ellipsoid, start.latitude);
    let (sin_alpha1, cos_alpha1) = segment.initial_bearing.sin_cos();

    let sigma1 = (sin_u1 / cos_u1).atan2(cos_alpha1);
    let sin_alpha = cos_u1 * sin_alpha1;
    let cos2_alpha = 1.0 - sin_alpha * sin_alpha;
    let series = SeriesCoefficients::new(ellipsoid, cos2_alpha);
    let sigma0 = segment.distance / (ellipsoid.b() * series.a);

    let sigma = fixed_point("solve_direct", sigma0, |sigma| {
        let cos_2sm = (2.0 * sigma1 + sigma).cos();
        sigma0 + series.delta_sigma(sigma.sin(), sigma.cos(), cos_2sm)
    });

    sigma.map(|sigma| {
        let (sin_sigma, cos_sigma) = sigma.sin_cos();
        let cos_2sm = (2.0 * sigma1 + sigma).cos();
        let tmp = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;

        let latitude = (sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1)
            .atan2((1.0 - f) * sin_alpha.hypot(tmp));
        let lambda =
            (sin_sigma * sin_alpha1).atan2(cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1);
        let big_l = lambda
            - lambda_correction(f, sin_alpha, cos2_alpha, sigma, sin_sigma, cos_sigma, cos_2sm);

        GeodesicTarget {
            longitude: start.longitude + big_l,
            latitude,
            bearing: sin_alpha.atan2(-tmp),
        }
    })
}

/// `n` intermediate points on the geodesic from `start` to `end`, plus
/// both endpoints (`n + 2` targets in all).
///
/// Each step of total/(n + 1) metres starts from the previous target along
/// its destination bearing. The result converged only if every solve did.
pub fn interpolate(
    ellipsoid: &Ellipsoid,
    start: &GeodeticPoint,
    end: &GeodeticPoint,
    n: usize,
) -> Convergence<Vec<GeodesicTarget>> {
    let inverse = solve_inverse(ellipsoid, start, end);
    let mut converged = inverse.converged;
    let mut iterations = inverse.iterations;
    let step = inverse.value.distance / (n + 1) as f64;

    let mut targets = Vec::with_capacity(n + 2);
    let mut current = GeodesicTarget {
        longitude: start.longitude,
        latitude: start.latitude,
        bearing: inverse.value.initial_bearing,
    };
    targets.push(current);

    for _ in 0..=n {
        let leg = GeodesicSegment {
            distance: step,
            initial_bearing: current.bearing,
            final_bearing: 0.0,
        };
        let next = solve_direct(ellipsoid, &current.point(), &leg);
        converged &= next.converged;
        iterations += next.iterations;
        current = next.value;
        targets.push(current);
    }

    Convergence::new(targets, converged, iterations)
}
