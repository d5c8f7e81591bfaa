use crate::{error::RuntimeError, interpreter::lexer::Position};

/// Largest integer magnitude exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;
/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_U64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use jet::util::num::{MAX_SAFE_I64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42, "too big!"), Ok(42.0));
/// assert!(i64_to_f64_checked(MAX_SAFE_I64_INT + 1, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return Err(error);
    }
    Ok(value as f64)
}

/// Promotes an integer operand to `f64` for mixed integer/float arithmetic.
///
/// ## Errors
/// Returns `RuntimeError::PrecisionLoss` if the integer is outside the range
/// that `f64` represents exactly.
pub fn promote_integer(value: i64, position: Position) -> Result<f64, RuntimeError> {
    i64_to_f64_checked(value, RuntimeError::PrecisionLoss { value, position })
}

/// Converts a float to an integer if and only if it holds an integral value
/// inside the `i64` range. `NaN` and the infinities have no integer value.
///
/// ## Example
/// ```
/// use jet::util::num::f64_to_i64_exact;
///
/// assert_eq!(f64_to_i64_exact(3.0), Some(3));
/// assert_eq!(f64_to_i64_exact(-0.0), Some(0));
/// assert_eq!(f64_to_i64_exact(2.5), None);
/// assert_eq!(f64_to_i64_exact(1e19), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i64_exact(value: f64) -> Option<i64> {
    // 2^63, the first float past `i64::MAX`.
    const BOUND: f64 = 9_223_372_036_854_775_808.0;

    (value.fract() == 0.0 && (-BOUND..BOUND).contains(&value)).then(|| value as i64)
}

/// Converts a collection length into a language integer.
///
/// ## Errors
/// Returns `RuntimeError::Overflow` if the length does not fit in an `i64`.
///
/// ## Example
/// ```
/// use jet::{interpreter::lexer::Position, util::num::usize_to_i64_checked};
///
/// assert_eq!(usize_to_i64_checked(3, Position::default()).unwrap(), 3);
/// ```
pub fn usize_to_i64_checked(value: usize, position: Position) -> Result<i64, RuntimeError> {
    i64::try_from(value).map_err(|_| RuntimeError::Overflow { position })
}

/// Converts a language integer into a collection index.
///
/// Negative indices have no element, so they map to `None` just like any other
/// index past the end of the collection.
///
/// ## Example
/// ```
/// use jet::util::num::i64_to_index;
///
/// assert_eq!(i64_to_index(2), Some(2));
/// assert_eq!(i64_to_index(-1), None);
/// ```
#[must_use]
pub fn i64_to_index(value: i64) -> Option<usize> {
    usize::try_from(value).ok()
}
