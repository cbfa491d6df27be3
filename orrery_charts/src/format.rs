// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.

extern crate alloc;

use alloc::string::String;
use alloc::format;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a tick value using the tick step to pick a decimal count.
///
/// The step is the spacing between adjacent ticks (best-effort); a step of
/// `0.25` formats with two decimals, a step of `10` formats as an integer.
/// Trailing zeros are kept so labels along one axis line up.
pub(crate) fn format_tick_with_step(v: f64, step: f64) -> String {
    let decimals = step_decimals(step);
    if decimals == 0 {
        // Avoid "-0".
        let v = if v == 0.0 { 0.0 } else { v };
        format!("{v:.0}")
    } else {
        format!("{v:.decimals$}")
    }
}

fn step_decimals(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    let d = (-step.log10()).ceil();
    if d.is_finite() && d > 0.0 {
        (d as u64).min(9) as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn integer_steps_format_without_decimals() {
        assert_eq!(format_tick_with_step(20.0, 10.0), "20");
        assert_eq!(format_tick_with_step(-0.0, 1.0), "0");
    }

    #[test]
    fn fractional_steps_format_with_matching_decimals() {
        assert_eq!(format_tick_with_step(0.5, 0.25), "0.50");
        assert_eq!(format_tick_with_step(1.2, 0.2), "1.2");
    }

    #[test]
    fn zero_step_falls_back_to_integer_formatting() {
        assert_eq!(format_tick_with_step(100.0, 0.0), "100");
    }
}
