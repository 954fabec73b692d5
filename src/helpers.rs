/// Returns `SolveError::DimensionMismatch` from the enclosing function when the
/// two lengths differ.
#[macro_export]
macro_rules! ensure_eq {
    ($found: expr, $expected: expr, $what: expr) => {{
        let (found, expected): (usize, usize) = ($found, $expected);
        if found != expected {
            log::warn!(
                "{0} != {1}\n{0} = {2:?}\n{1} = {3:?}",
                stringify!($found),
                stringify!($expected),
                found,
                expected
            );
            return Err($crate::simplex::SolveError::DimensionMismatch {
                what: $what,
                expected,
                found,
            });
        }
    }};
}

#[macro_export]
macro_rules! dbg_display {
    ($e: expr) => {{
        let val = $e;
        log::debug!(
            "[{}/{}:{}] {} = {}",
            file!(),
            line!(),
            column!(),
            stringify!($e),
            val
        );
        val
    }};
}

/// Beyond this many decimals an `f64` carries no more information.
const MAX_PRECISION: usize = 15;

/// Number of decimal places that resolves differences of size `tolerance`.
///
/// `1e-6` gives 6, `2e-4` gives 4, anything `>= 1` gives 0.
pub fn precision_from_tolerance(tolerance: f64) -> usize {
    let digits = -tolerance.log10();
    // log10 of an exact power of ten may land a hair above the integer
    let digits = (digits - 1e-9).ceil();
    if digits.is_nan() || digits <= 0. {
        return 0;
    }
    (digits as usize).min(MAX_PRECISION)
}

pub fn f64_rounded(val: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let scaled = val * factor;
    if !scaled.is_finite() {
        return val;
    }
    let rounded = scaled.round() / factor;
    // no negative zero in results
    if rounded == 0. {
        0.
    } else {
        rounded
    }
}
