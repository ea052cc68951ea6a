//! Lagrange polynomial evaluation.
//!
//!   L(x) = Σⱼ yⱼ · Πᵢ≠ⱼ (x − xᵢ)/(xⱼ − xᵢ)
//!
//! Factors whose abscissae coincide are skipped, so duplicated nodes do not
//! divide by zero.

use crate::error::GeoError;

/// Evaluate at `x` the polynomial through the nodes `(xs[i], ys[i])`.
pub fn lagrange(x: f64, xs: &[f64], ys: &[f64]) -> Result<f64, GeoError> {
    if xs.len() != ys.len() {
        return Err(GeoError::Interpolation(format!(
            "{} abscissae for {} ordinates",
            xs.len(),
            ys.len()
        )));
    }
    if xs.is_empty() {
        return Err(GeoError::Interpolation("no nodes".into()));
    }

    let result = xs
        .iter()
        .zip(ys)
        .map(|(&xj, &yj)| {
            let basis: f64 = xs
                .iter()
                .filter(|&&xi| xi != xj)
                .map(|&xi| (x - xi) / (xj - xi))
                .product();
            yj * basis
        })
        .sum();
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_reproduces_nodes() {
        let xs = [0.0, 1.0, 3.0, 4.5];
        let ys = [2.0, -1.0, 7.0, 0.5];
        for (&x, &y) in xs.iter().zip(&ys) {
            assert_relative_eq!(lagrange(x, &xs, &ys).unwrap(), y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_exact_for_polynomials() {
        // Three nodes determine a quadratic exactly
        let f = |x: f64| 3.0 * x * x - 2.0 * x + 1.0;
        let xs = [-1.0, 0.5, 2.0];
        let ys = xs.map(f);
        for x in [-3.0, 0.0, 1.0, 10.0] {
            assert_relative_eq!(lagrange(x, &xs, &ys).unwrap(), f(x), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_linear_two_points() {
        let v = lagrange(256.0, &[0.0, 512.0], &[-100.0, 100.0]).unwrap();
        assert_relative_eq!(v, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_node_is_constant() {
        assert_relative_eq!(lagrange(42.0, &[1.0], &[5.0]).unwrap(), 5.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(lagrange(0.0, &[], &[]).is_err());
        assert!(lagrange(0.0, &[1.0, 2.0], &[1.0]).is_err());
    }
}
