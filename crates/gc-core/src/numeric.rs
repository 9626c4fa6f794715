/// Floating point type used throughout the system
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

/// Parse a table cell as a finite float. Empty cells, stray units, and
/// placeholder text all come back as `None` rather than an error.
pub fn parse_finite(cell: &str) -> Option<Real> {
    let v: Real = cell.trim().parse().ok()?;
    v.is_finite().then_some(v)
}
