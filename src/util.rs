use std::ops::{Bound, RangeBounds};

use crate::error::{Error, Result};

/// Checks that a numerical value is in the provided interval and returns an
/// [`Error::InvalidHyperparameter`] naming the offending expression if not
///
/// ### Example
/// ```ignore
/// let gamma = 2.0;
/// ensure_interval!(gamma, 0.0..=1.0)?;
/// ```
/// This fails with the message "Invalid value for \`gamma\`: 2. Must be in the interval \[0, 1\]."
#[macro_export]
macro_rules! ensure_interval {
    ($var:expr, $range:expr) => {
        $crate::util::check_interval(stringify!($var), $var, $range)
    };
}

#[doc(hidden)]
pub fn check_interval<R: RangeBounds<f32>>(name: &'static str, value: f32, range: R) -> Result<()> {
    if range.contains(&value) {
        return Ok(());
    }

    let low = match range.start_bound() {
        Bound::Included(x) => format!("[{x}"),
        Bound::Excluded(x) => format!("({x}"),
        Bound::Unbounded => String::from("(-inf"),
    };
    let high = match range.end_bound() {
        Bound::Included(x) => format!("{x}]"),
        Bound::Excluded(x) => format!("{x})"),
        Bound::Unbounded => String::from("inf)"),
    };

    Err(Error::InvalidHyperparameter {
        name,
        value,
        range: format!("{low}, {high}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_interval_functional() {
        assert!(check_interval("x", 0.5, 0.0..=1.0).is_ok());
        assert!(check_interval("x", 1.0, 0.0..=1.0).is_ok());
        assert!(check_interval("x", 0.0, (Bound::Excluded(0.0), Bound::Included(1.0))).is_err());
        assert!(check_interval("x", f32::NAN, 0.0..=1.0).is_err(), "NaN is rejected");
    }

    #[test]
    fn check_interval_message() {
        let gamma = 2.0;
        let err = ensure_interval!(gamma, 0.0..=1.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for `gamma`: 2. Must be in the interval [0, 1].",
            "Message names the expression and the interval"
        );

        let err = check_interval("alpha", 0.0, (Bound::Excluded(0.0), Bound::Included(1.0)))
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidHyperparameter {
                name: "alpha",
                value: 0.0,
                range: String::from("(0, 1]"),
            }
        );
    }
}
