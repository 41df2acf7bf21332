//! Assertion macros for duty-cycle and calibration tests.

/// Assert that a duty-cycle width lies between two bracket widths.
///
/// The bracket may be given in either order.
///
/// # Example
///
/// ```rust
/// use thruster_pwm_test_helpers::assert_duty_between;
///
/// assert_duty_between!(1620, 1900, 1500);
/// ```
#[macro_export]
macro_rules! assert_duty_between {
    ($value:expr, $a:expr, $b:expr $(,)?) => {
        $crate::assert_duty_between!($value, $a, $b, "")
    };
    ($value:expr, $a:expr, $b:expr, $($arg:tt)+) => {{
        let value: u32 = $value;
        let (a, b): (u32, u32) = ($a, $b);
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        if value < low || value > high {
            panic!(
                "assertion failed: duty cycle out of bracket\n  value: `{}`,\n  bracket: `[{}, {}]` {}",
                value, low, high, format_args!($($arg)+)
            );
        }
    }};
}

/// Assert that a sequence never decreases.
///
/// # Example
///
/// ```rust
/// use thruster_pwm_test_helpers::assert_non_decreasing;
///
/// assert_non_decreasing!(&[1100, 1500, 1500, 1900]);
/// ```
#[macro_export]
macro_rules! assert_non_decreasing {
    ($collection:expr $(,)?) => {{
        let collection = $collection;
        let mut iter = collection.iter();
        if let Some(mut prev) = iter.next() {
            for (i, curr) in iter.enumerate() {
                if prev > curr {
                    panic!(
                        "assertion failed: sequence decreases\n  at index {}: {:?} > {:?}",
                        i + 1,
                        prev,
                        curr
                    );
                }
                prev = curr;
            }
        }
    }};
}

/// Assert that a sequence is strictly increasing.
///
/// # Example
///
/// ```rust
/// use thruster_pwm_test_helpers::assert_monotonic;
///
/// assert_monotonic!(&[-1.0, 0.0, 2.5]);
/// ```
#[macro_export]
macro_rules! assert_monotonic {
    ($collection:expr $(,)?) => {{
        let collection = $collection;
        let mut iter = collection.iter();
        if let Some(mut prev) = iter.next() {
            for (i, curr) in iter.enumerate() {
                if prev >= curr {
                    panic!(
                        "assertion failed: sequence is not strictly monotonic\n  at index {}: {:?} >= {:?}",
                        i + 1,
                        prev,
                        curr
                    );
                }
                prev = curr;
            }
        }
    }};
}
