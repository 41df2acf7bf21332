//! Property-based tests for table interpolation.
//!
//! These tests verify the bracketing, saturation and override properties that
//! hold for every valid table.

use quickcheck_macros::quickcheck;
use thruster_pwm_table::{DeadZone, DutyCycleMapper, PwmTable, compute_duty_cycle};
use thruster_pwm_test_helpers::{assert_duty_between, must, must_some};

mod proptest_interpolation {
    use super::*;
    use proptest::prelude::*;

    /// Strictly increasing commands in `[-20, 20]` with arbitrary widths.
    fn strictly_increasing_table() -> impl Strategy<Value = PwmTable> {
        (2usize..64)
            .prop_flat_map(|n| {
                (
                    -20.0f64..-10.0,
                    prop::collection::vec(0.001f64..1.0, n - 1),
                    prop::collection::vec(800u32..2200, n),
                )
            })
            .prop_map(|(start, steps, duty)| {
                let mut cmd = Vec::with_capacity(duty.len());
                let mut current = start;
                cmd.push(current);
                for step in steps {
                    current += step;
                    cmd.push(current);
                }
                must(PwmTable::new(cmd, duty))
            })
    }

    /// Non-decreasing commands, with repeated values likely.
    fn non_decreasing_table() -> impl Strategy<Value = PwmTable> {
        prop::collection::vec((-50i32..50, 0u32..4000), 1..40).prop_map(|mut rows| {
            rows.sort_by_key(|&(command, _)| command);
            let cmd = rows.iter().map(|&(c, _)| f64::from(c) / 10.0).collect();
            let duty = rows.iter().map(|&(_, d)| d).collect();
            must(PwmTable::new(cmd, duty))
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        // --- Bracketing: interior commands stay between the bracket widths ---

        #[test]
        fn interior_output_within_bracket(
            table in strictly_increasing_table(),
            fraction in 0.0f64..1.0,
        ) {
            let (low, high) = table.command_range();
            let command = low + (high - low) * fraction;
            prop_assume!(command > low && command < high);

            let (lower, upper) = must_some(table.bracket(command), "interior command");
            prop_assert!(lower.command < command && command <= upper.command);

            let out = must_some(table.interpolate(command), "finite command");
            assert_duty_between!(out, lower.duty_cycle, upper.duty_cycle, "command {}", command);
        }

        #[test]
        fn duplicates_never_escape_bracket(
            table in non_decreasing_table(),
            command in -6.0f64..6.0,
        ) {
            let out = must_some(table.interpolate(command), "finite command");
            match table.bracket(command) {
                Some((lower, upper)) => {
                    prop_assert!(lower.command < command && command <= upper.command);
                    assert_duty_between!(out, lower.duty_cycle, upper.duty_cycle);
                }
                None => {
                    let first = table.first();
                    let last = table.last();
                    prop_assert!(out == first.duty_cycle || out == last.duty_cycle);
                }
            }
        }

        // --- Saturation: out-of-domain commands clamp to the end widths ---

        #[test]
        fn saturates_below_and_above(
            table in strictly_increasing_table(),
            margin in 0.0f64..1e6,
        ) {
            let (low, high) = table.command_range();
            prop_assert_eq!(table.interpolate(low - margin), Some(table.first().duty_cycle));
            prop_assert_eq!(table.interpolate(high + margin), Some(table.last().duty_cycle));
        }

        // --- Calibration points are reproduced exactly ---

        #[test]
        fn calibration_points_are_exact(
            table in strictly_increasing_table(),
            no_actuation in any::<u32>(),
        ) {
            for point in table.points().filter(|p| p.command != 0.0) {
                prop_assert_eq!(
                    compute_duty_cycle(&table, no_actuation, point.command),
                    point.duty_cycle
                );
            }
        }

        // --- Dead zone: every command inside maps to no-actuation ---

        #[test]
        fn dead_zone_maps_to_no_actuation(
            table in strictly_increasing_table(),
            half_width in 0.0f64..2.0,
            fraction in -1.0f64..=1.0,
            no_actuation in any::<u32>(),
        ) {
            let zone = must(DeadZone::symmetric(half_width));
            let mapper = DutyCycleMapper::new(table, no_actuation).with_dead_zone(zone);
            prop_assert_eq!(mapper.duty_cycle(half_width * fraction), no_actuation);
        }
    }
}

/// Zero short-circuits for every table and every no-actuation width.
#[quickcheck]
fn prop_zero_returns_no_actuation(widths: Vec<u32>, no_actuation: u32) -> bool {
    if widths.is_empty() {
        return true;
    }
    let cmd = (0..widths.len()).map(|i| i as f64 - 1.0).collect();
    let table = must(PwmTable::new(cmd, widths));
    compute_duty_cycle(&table, no_actuation, 0.0) == no_actuation
        && compute_duty_cycle(&table, no_actuation, -0.0) == no_actuation
}

/// A single-row table answers every non-zero command with its only width.
#[quickcheck]
fn prop_single_row_is_constant(at: i16, width: u32, command: f64) -> bool {
    let table = must(PwmTable::new(vec![f64::from(at) / 100.0], vec![width]));
    if command == 0.0 || command.is_nan() {
        return true;
    }
    compute_duty_cycle(&table, width.wrapping_add(1), command) == width
}

/// Widths from an increasing table never decrease as the command grows.
#[quickcheck]
fn prop_monotone_table_gives_monotone_output(a: i16, b: i16) -> bool {
    let table = must(PwmTable::new(
        vec![-4.0, -1.0, 0.5, 3.0],
        vec![1100, 1400, 1600, 1900],
    ));
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let (lo, hi) = (f64::from(lo) / 1000.0, f64::from(hi) / 1000.0);
    if lo == 0.0 || hi == 0.0 {
        return true;
    }
    compute_duty_cycle(&table, 0, lo) <= compute_duty_cycle(&table, 0, hi)
}
