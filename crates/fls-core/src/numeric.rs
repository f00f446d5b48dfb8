use crate::{CoreError, CoreResult};

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
            abs: 1e-9,
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

pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Snap `v` onto a grid of `1 / steps_per_unit`.
///
/// Values further than `tol` from the nearest grid point are rejected. The
/// returned value is computed by division so that e.g. 2.4 on a 0.1 grid
/// comes back as the literal `2.4`, not `24 * 0.1`.
pub fn snap_to_step(
    v: Real,
    steps_per_unit: Real,
    tol: Tolerances,
    what: &'static str,
) -> CoreResult<Real> {
    let v = ensure_finite(v, what)?;
    let snapped = (v * steps_per_unit).round() / steps_per_unit;
    if nearly_equal(v, snapped, tol) {
        Ok(snapped)
    } else {
        Err(CoreError::OffStep {
            what,
            value: v,
            step: 1.0 / steps_per_unit,
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn snapped_tenths_are_stable(k in 0_i32..1000) {
            let v = k as f64 / 10.0;
            let snapped = snap_to_step(v, 10.0, Tolerances::default(), "v").unwrap();
            prop_assert_eq!(snapped, v);
        }
    }
}
