use crate::TxyError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, TxyError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(TxyError::NonFinite { what, value: v })
    }
}

/// `num_points` evenly spaced values from `start` to `end`, both inclusive.
///
/// A single point yields `[start]`; zero points yield an empty vector.
pub fn linspace(start: Real, end: Real, num_points: usize) -> Vec<Real> {
    match num_points {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let delta = (end - start) / (n - 1) as Real;
            let mut points: Vec<Real> = (0..n).map(|i| start + i as Real * delta).collect();
            // Ensure exact endpoint
            points[n - 1] = end;
            points
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn linspace_includes_both_ends() {
        let points = linspace(0.995, 0.005, 5);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0], 0.995);
        assert_eq!(points[4], 0.005);
        assert!((points[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn linspace_degenerate_counts() {
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }
}
