//! Convergence bookkeeping shared by every iterative routine.
//!
//! All solvers iterate until two successive estimates differ by less than
//! [`EPS`] or until [`MAX_ITER`] steps have been taken. Hitting the cap is
//! not an error: the last estimate is returned with `converged == false`.

/// Absolute convergence tolerance (radians for angular estimates).
pub const EPS: f64 = 1e-10;

/// Hard iteration cap for every iterative solver.
pub const MAX_ITER: usize = 100;

/// Result of an iterative computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Convergence<T> {
    /// Last estimate.
    pub value: T,
    /// Whether the tolerance was met before the cap.
    pub converged: bool,
    /// Number of refinement steps evaluated.
    pub iterations: usize,
}

impl<T> Convergence<T> {
    pub fn new(value: T, converged: bool, iterations: usize) -> Self {
        Self {
            value,
            converged,
            iterations,
        }
    }

    /// A value obtained without any iteration.
    pub fn exact(value: T) -> Self {
        Self::new(value, true, 0)
    }

    pub fn into_value(self) -> T {
        self.value
    }

    /// Transform the value, keeping the convergence record.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Convergence<U> {
        Convergence {
            value: f(self.value),
            converged: self.converged,
            iterations: self.iterations,
        }
    }
}

/// Fixed-point iteration `x_{i+1} = step(x_i)` starting from `seed`.
///
/// The first refinement is always evaluated, so `iterations >= 1`.
pub(crate) fn fixed_point(
    routine: &str,
    seed: f64,
    mut step: impl FnMut(f64) -> f64,
) -> Convergence<f64> {
    let mut current = seed;
    let mut next = step(current);
    let mut iterations = 1;

    while (current - next).abs() > EPS && iterations < MAX_ITER {
        current = next;
        next = step(current);
        iterations += 1;
    }

    let delta = (current - next).abs();
    let converged = delta <= EPS;
    if !converged {
        log::debug!("{routine}: stopped after {iterations} iterations, |delta| = {delta:e}");
    }
    Convergence::new(next, converged, iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_point_converges() {
        // x = cos(x) has a unique fixed point near 0.739085
        let result = fixed_point("cos", 1.0, f64::cos);
        assert!(result.converged);
        assert!(result.iterations < MAX_ITER);
        assert_relative_eq!(result.value, 0.739_085_133_215_160_6, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_point_hits_cap() {
        // Alternates between 1 and -1 forever
        let result = fixed_point("flip", 1.0, |x| -x);
        assert!(!result.converged);
        assert_eq!(result.iterations, MAX_ITER);
        assert_relative_eq!(result.value.abs(), 1.0);
    }

    #[test]
    fn test_map_keeps_record() {
        let c = Convergence::new(2.0, false, 7).map(|v| v * 3.0);
        assert_relative_eq!(c.value, 6.0);
        assert!(!c.converged);
        assert_eq!(c.iterations, 7);
    }
}
