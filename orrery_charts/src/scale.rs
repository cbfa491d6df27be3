// Copyright 2025 the Orrery Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scale utilities.
//!
//! Scales come in two halves: a `*Spec` (domain + options, no range yet)
//! and the instantiated scale (a pure mapping closed over domain and
//! range). A spec is rebuilt from the current dataset whenever the dataset
//! or the field selection changes; instantiation happens once the plot
//! rectangle is known. A scale is never updated in place — a stale scale
//! drawn against a fresh dataset is a correctness bug, and rebuilding from
//! data is the only supported path.
//!
//! The data-driven constructors validate their domains up front:
//! [`ScaleLogSpec::from_values`] rejects non-positive values with
//! [`ScaleDomainError`] instead of letting a log scale emit `NaN`
//! coordinates downstream.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use orrery_core::{Dataset, Record, Value};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Returns a record's category label for a field.
///
/// String fields are used as-is; numeric fields are coerced to their
/// display form (`1960.0` → `"1960"`), so a numeric metric can still drive
/// a band axis.
pub fn category_label(record: &Record, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::Str(s) => Some(s.clone()),
        Value::Num(v) => Some(format!("{v}")),
    }
}

/// Errors for degenerate or invalid scale domains.
///
/// These are raised while building a spec from data, before any scale
/// exists; a chart that hits one renders an explicit no-data state instead
/// of mis-rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleDomainError {
    /// No usable (finite) values were present.
    Empty,
    /// A log domain included a zero or negative value.
    NonPositiveLog(f64),
}

/// A scale specification (domain + options, no range yet).
#[derive(Clone, Debug)]
pub enum ScaleSpec {
    /// Continuous linear scale.
    Linear(ScaleLinearSpec),
    /// Continuous log scale.
    Log(ScaleLogSpec),
    /// Discrete band scale.
    Band(ScaleBandSpec),
}

impl From<ScaleLinearSpec> for ScaleSpec {
    fn from(value: ScaleLinearSpec) -> Self {
        Self::Linear(value)
    }
}

impl From<ScaleLogSpec> for ScaleSpec {
    fn from(value: ScaleLogSpec) -> Self {
        Self::Log(value)
    }
}

impl From<ScaleBandSpec> for ScaleSpec {
    fn from(value: ScaleBandSpec) -> Self {
        Self::Band(value)
    }
}

/// A continuous scale instance.
#[derive(Clone, Copy, Debug)]
pub enum ScaleContinuous {
    /// Linear scale.
    Linear(ScaleLinear),
    /// Log scale.
    Log(ScaleLog),
}

impl ScaleContinuous {
    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(x),
            Self::Log(s) => s.map(x),
        }
    }

    /// Returns tick values.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Log(s) => s.ticks(count),
        }
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        match self {
            Self::Linear(s) => s.domain_min(),
            Self::Log(s) => s.domain_min(),
        }
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        match self {
            Self::Linear(s) => s.domain_max(),
            Self::Log(s) => s.domain_max(),
        }
    }
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

/// Specification for a linear scale (domain + options, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinearSpec {
    /// Domain in data units.
    pub domain: (f64, f64),
    /// Whether to "nice" the domain based on tick generation.
    pub nice: bool,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }

    /// Returns "nice-ish" tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

impl ScaleLinearSpec {
    /// Creates a new linear scale spec.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            nice: false,
        }
    }

    /// Builds a spec covering the extent of `values`.
    ///
    /// Non-finite values are skipped; fails with [`ScaleDomainError::Empty`]
    /// if nothing usable remains.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Result<Self, ScaleDomainError> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            if !v.is_finite() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }
        if min.is_finite() && max.is_finite() {
            Ok(Self::new((min, max)))
        } else {
            Err(ScaleDomainError::Empty)
        }
    }

    /// Enables or disables nice-domain behavior.
    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }

    /// Pins the domain minimum (e.g. a zero baseline for bar values).
    pub fn with_min(mut self, min: f64) -> Self {
        self.domain.0 = min;
        self
    }

    /// Returns the effective domain after applying `nice` (if enabled).
    pub fn resolved_domain(&self, tick_count: usize) -> (f64, f64) {
        if !self.nice {
            return self.domain;
        }
        let ticks = nice_ticks(self.domain.0, self.domain.1, tick_count);
        if ticks.len() >= 2 {
            (*ticks.first().unwrap(), *ticks.last().unwrap())
        } else {
            self.domain
        }
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLinear {
        ScaleLinear::new(self.domain, range)
    }

    /// Instantiates a concrete scale using the `resolved_domain`
    /// (respecting `nice`).
    pub fn instantiate_resolved(&self, range: (f64, f64), tick_count: usize) -> ScaleLinear {
        ScaleLinear::new(self.resolved_domain(tick_count), range)
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let span = max - min;
    let step0 = span / count.max(1) as f64;
    let step = nice_step(step0);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;

    let n_f = ((stop - start) / step + 0.5).floor();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// A log-scale mapping from a positive domain to a range.
#[derive(Clone, Copy, Debug)]
pub struct ScaleLog {
    domain: (f64, f64),
    range: (f64, f64),
    base: f64,
}

/// Specification for a log scale (domain + base, no range yet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLogSpec {
    /// Domain in data units (must be positive).
    pub domain: (f64, f64),
    /// Log base (default 10).
    pub base: f64,
}

impl ScaleLog {
    /// Creates a new log scale.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            base: 10.0,
        }
    }

    /// Sets the log base.
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = if base.is_finite() && base > 0.0 && base != 1.0 {
            base
        } else {
            10.0
        };
        self
    }

    fn log_base(&self, x: f64) -> f64 {
        let denom = self.base.ln();
        if denom == 0.0 { x.ln() } else { x.ln() / denom }
    }

    /// Maps a value from domain space into range space.
    ///
    /// Inputs at or below zero clamp to the range start rather than
    /// producing `NaN`; domains are validated against such values at spec
    /// construction ([`ScaleLogSpec::from_values`]).
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if x <= 0.0 || d0 <= 0.0 || d1 <= 0.0 {
            return r0;
        }
        let ld0 = self.log_base(d0);
        let ld1 = self.log_base(d1);
        let denom = ld1 - ld0;
        if denom == 0.0 {
            return r0;
        }
        let t = (self.log_base(x) - ld0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns powers of `base` that fall within the domain, capped by
    /// `count`.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut min, mut max) = self.domain;
        if min > max {
            core::mem::swap(&mut min, &mut max);
        }
        if min <= 0.0 || !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        let min_e = {
            let e = self
                .log_base(min)
                .floor()
                .clamp(i32::MIN as f64, i32::MAX as f64);
            #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
            {
                e as i32
            }
        };
        let max_e = {
            let e = self
                .log_base(max)
                .ceil()
                .clamp(i32::MIN as f64, i32::MAX as f64);
            #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
            {
                e as i32
            }
        };
        let mut out = Vec::new();
        for e in min_e..=max_e {
            out.push(self.base.powi(e));
            if count != 0 && out.len() >= count {
                break;
            }
        }
        out
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }
}

impl ScaleLogSpec {
    /// Creates a new log scale spec without validating the domain.
    pub fn new(domain: (f64, f64)) -> Self {
        Self { domain, base: 10.0 }
    }

    /// Builds a spec covering the extent of `values`, validating that a
    /// log scale is defined over them.
    ///
    /// Non-finite values are skipped (missing data); any finite value at or
    /// below zero fails with [`ScaleDomainError::NonPositiveLog`], and an
    /// empty sequence fails with [`ScaleDomainError::Empty`].
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Result<Self, ScaleDomainError> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            if !v.is_finite() {
                continue;
            }
            if v <= 0.0 {
                return Err(ScaleDomainError::NonPositiveLog(v));
            }
            min = min.min(v);
            max = max.max(v);
        }
        if min.is_finite() && max.is_finite() {
            Ok(Self::new((min, max)))
        } else {
            Err(ScaleDomainError::Empty)
        }
    }

    /// Sets the log base.
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleLog {
        ScaleLog::new(self.domain, range).with_base(self.base)
    }
}

/// A discrete band scale over category labels.
///
/// The range is subdivided evenly with padding expressed as a fraction of
/// the band width (0.1 inner and outer by default).
#[derive(Clone, Debug)]
pub struct ScaleBand {
    range: (f64, f64),
    domain: Vec<String>,
    padding_inner: f64,
    padding_outer: f64,
}

/// Specification for a band scale (category domain + padding, no range yet).
#[derive(Clone, Debug)]
pub struct ScaleBandSpec {
    /// Category labels in first-seen order.
    pub domain: Vec<String>,
    /// Inner padding in band units.
    pub padding_inner: f64,
    /// Outer padding in band units.
    pub padding_outer: f64,
}

impl ScaleBand {
    /// Creates a new band scale covering `domain` over `range`.
    pub fn new(range: (f64, f64), domain: Vec<String>) -> Self {
        Self {
            range,
            domain,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Returns the computed band width.
    pub fn band_width(&self) -> f64 {
        let (r0, r1) = self.range;
        let n = self.domain.len() as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let span = (r1 - r0).abs();
        let denom = n + self.padding_inner * (n - 1.0) + 2.0 * self.padding_outer;
        if denom == 0.0 { 0.0 } else { span / denom }
    }

    /// Returns the number of bands.
    pub fn count(&self) -> usize {
        self.domain.len()
    }

    /// Returns the category label at `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.domain.get(index).map(String::as_str)
    }

    /// Returns the index of a category label, if present in the domain.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.domain.iter().position(|l| l == label)
    }

    /// Returns the x-position for a band at `index`.
    pub fn x(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let bw = self.band_width();
        let step = bw * (1.0 + self.padding_inner);
        let start = if r1 >= r0 { r0 } else { r1 };
        start + bw * self.padding_outer + step * index as f64
    }

    /// Returns the x-position for a category label, if in the domain.
    pub fn position(&self, label: &str) -> Option<f64> {
        self.index_of(label).map(|i| self.x(i))
    }
}

impl ScaleBandSpec {
    /// Creates a band scale spec from labels, keeping the distinct values
    /// in first-seen order.
    pub fn from_labels(labels: impl IntoIterator<Item = String>) -> Self {
        let mut domain: Vec<String> = Vec::new();
        for label in labels {
            if !domain.iter().any(|seen| *seen == label) {
                domain.push(label);
            }
        }
        Self {
            domain,
            padding_inner: 0.1,
            padding_outer: 0.1,
        }
    }

    /// Creates a band scale spec from a dataset field.
    ///
    /// The domain is the distinct [`category_label`]s of the field in
    /// first-seen order; rows without the field contribute nothing.
    pub fn from_field(data: &Dataset, field: &str) -> Self {
        Self::from_labels(
            data.rows()
                .filter_map(|(_key, record)| category_label(record, field)),
        )
    }

    /// Sets inner and outer padding in band units.
    pub fn with_padding(mut self, inner: f64, outer: f64) -> Self {
        self.padding_inner = inner.max(0.0);
        self.padding_outer = outer.max(0.0);
        self
    }

    /// Instantiates a concrete scale for a given output range.
    pub fn instantiate(&self, range: (f64, f64)) -> ScaleBand {
        ScaleBand::new(range, self.domain.clone())
            .with_padding(self.padding_inner, self.padding_outer)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    #[test]
    fn linear_scale_maps_endpoints_to_range() {
        let s = ScaleLinear::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(s.map(0.0), 0.0);
        assert_eq!(s.map(10.0), 100.0);
        assert_eq!(s.map(5.0), 50.0);
    }

    #[test]
    fn linear_scale_handles_inverted_ranges() {
        // Screen-space y grows downward; scales are routinely inverted.
        let s = ScaleLinear::new((0.0, 10.0), (100.0, 0.0));
        assert_eq!(s.map(0.0), 100.0);
        assert_eq!(s.map(10.0), 0.0);
    }

    #[test]
    fn log_scale_maps_endpoints_to_range() {
        let s = ScaleLog::new((1.0, 100.0), (0.0, 10.0));
        assert!((s.map(1.0) - 0.0).abs() < 1e-9);
        assert!((s.map(100.0) - 10.0).abs() < 1e-9);
        assert!((s.map(10.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn log_spec_rejects_zero_and_negative_values() {
        let err = ScaleLogSpec::from_values(vec![1.0, 0.0, 10.0]).unwrap_err();
        assert_eq!(err, ScaleDomainError::NonPositiveLog(0.0));

        let err = ScaleLogSpec::from_values(vec![-3.0]).unwrap_err();
        assert_eq!(err, ScaleDomainError::NonPositiveLog(-3.0));
    }

    #[test]
    fn log_spec_skips_non_finite_but_rejects_empty() {
        let spec = ScaleLogSpec::from_values(vec![f64::NAN, 2.0, 8.0]).unwrap();
        assert_eq!(spec.domain, (2.0, 8.0));

        assert_eq!(
            ScaleLogSpec::from_values(vec![f64::NAN]),
            Err(ScaleDomainError::Empty)
        );
        assert_eq!(
            ScaleLogSpec::from_values(Vec::new()),
            Err(ScaleDomainError::Empty)
        );
    }

    #[test]
    fn linear_spec_from_values_skips_non_finite() {
        let spec = ScaleLinearSpec::from_values(vec![3.0, f64::INFINITY, -1.0]).unwrap();
        assert_eq!(spec.domain, (-1.0, 3.0));
        assert_eq!(
            ScaleLinearSpec::from_values(Vec::new()),
            Err(ScaleDomainError::Empty)
        );
    }

    #[test]
    fn nice_domain_extends_to_round_numbers() {
        let spec = ScaleLinearSpec::new((0.0, 9.3)).with_nice(true);
        let (d0, d1) = spec.resolved_domain(5);
        assert!(d0 <= 0.0);
        assert!(d1 >= 9.3);
        assert_eq!(d1, 10.0);
    }

    #[test]
    fn log_ticks_are_powers_of_base() {
        let s = ScaleLog::new((1.0, 1000.0), (0.0, 1.0));
        assert_eq!(s.ticks(10), vec![1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn band_domain_keeps_first_seen_order_and_dedups() {
        let spec = ScaleBandSpec::from_labels(
            ["b", "a", "b", "c"].iter().map(|s| s.to_string()),
        );
        assert_eq!(spec.domain, vec!["b", "a", "c"]);
    }

    #[test]
    fn band_subdivides_range_evenly_with_padding() {
        let labels = ["a", "b", "c"].iter().map(|s| s.to_string());
        let band = ScaleBandSpec::from_labels(labels).instantiate((0.0, 100.0));

        // 3 bands + 2 inner pads + 2 outer pads at 0.1 band width each.
        let bw = band.band_width();
        assert!((bw - 100.0 / 3.4).abs() < 1e-9);

        let step = bw * 1.1;
        assert!((band.x(0) - bw * 0.1).abs() < 1e-9);
        assert!((band.x(1) - (bw * 0.1 + step)).abs() < 1e-9);
        assert_eq!(band.position("c"), Some(band.x(2)));
        assert_eq!(band.position("missing"), None);
    }

    #[test]
    fn band_from_field_coerces_numeric_categories() {
        use orrery_core::{DatasetId, Record};

        let data = Dataset::from_records(
            DatasetId(1),
            vec![
                Record::new().with("year", 1960.0),
                Record::new().with("year", 1961.0),
                Record::new().with("year", 1960.0),
                Record::new(),
            ],
        );
        let spec = ScaleBandSpec::from_field(&data, "year");
        assert_eq!(spec.domain, vec!["1960", "1961"]);
    }

    #[test]
    fn band_positions_are_monotonic() {
        let labels = ["a", "b", "c", "d"].iter().map(|s| s.to_string());
        let band = ScaleBandSpec::from_labels(labels).instantiate((0.0, 50.0));
        let mut prev = f64::NEG_INFINITY;
        for i in 0..band.count() {
            let x = band.x(i);
            assert!(x > prev);
            prev = x;
        }
    }
}
