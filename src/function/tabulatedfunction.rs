use std::fmt;
use std::hash::Hasher;

use log::debug;
use serde::{
    Deserialize,
    Serialize
};

use crate::error::TabulatedFunctionError;
use crate::function::evaluable::Evaluable;
use crate::function::sample::{
    EPSILON,
    Sample
};

/// Smallest number of knots a tabulated function may hold.
pub const MIN_POINTS: usize = 2;

/// Which storage strategy backs a tabulated function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    #[default]
    Array,
    LinkedList,
}

/// An ordered set of samples with strictly increasing abscissas, evaluated
/// by piecewise-linear interpolation.
///
/// Every stored abscissa is finite. Equality compares samples within
/// `EPSILON`, while hashing uses the exact bits of every coordinate, so two
/// functions that are equal only within `EPSILON` may hash differently.
///
/// Both storage strategies implement this trait and are observably
/// equivalent through it. Every mutating method either succeeds completely
/// or returns an error and leaves the function untouched.
pub trait TabulatedFunction: Evaluable + fmt::Display + fmt::Debug {
    fn count(&self) -> usize;

    fn point_at(&self, index: usize) -> Result<Sample, TabulatedFunctionError>;

    /// Replaces the sample at `index`. The new abscissa must stay strictly
    /// between its neighbours; an abscissa within `EPSILON` of the current
    /// one only updates the ordinate.
    fn set_point(&mut self, index: usize, point: Sample) -> Result<(), TabulatedFunctionError>;

    fn point_x(&self, index: usize) -> Result<f64, TabulatedFunctionError>;

    fn set_point_x(&mut self, index: usize, x: f64) -> Result<(), TabulatedFunctionError>;

    fn point_y(&self, index: usize) -> Result<f64, TabulatedFunctionError>;

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), TabulatedFunctionError>;

    /// Fails with `InvariantViolation` when only `MIN_POINTS` samples remain.
    fn delete_point(&mut self, index: usize) -> Result<(), TabulatedFunctionError>;

    /// Inserts `point` at its ordered position. Fails with `InvalidPoint` if a
    /// sample with the same abscissa already exists.
    fn add_point(&mut self, point: Sample) -> Result<(), TabulatedFunctionError>;

    fn storage_kind(&self) -> StorageKind;

    fn clone_boxed(&self) -> Box<dyn TabulatedFunction>;

    fn points(&self) -> Vec<Sample> {
        (0..self.count())
            .map_while(|i| self.point_at(i).ok())
            .collect()
    }
}

impl PartialEq for dyn TabulatedFunction + '_ {
    fn eq(&self, other: &Self) -> bool {
        same_samples(self, other)
    }
}

impl Clone for Box<dyn TabulatedFunction> {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

// ─────────────────────────────────────────────
// Helpers shared by both storage strategies
// ─────────────────────────────────────────────

/// Pairwise comparison through the shared contract, usable across strategies.
pub fn same_samples(lhs: &dyn TabulatedFunction, rhs: &dyn TabulatedFunction) -> bool {
    if lhs.count() != rhs.count() {
        return false;
    }
    (0..lhs.count()).all(|i| match (lhs.point_at(i), rhs.point_at(i)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    })
}

/// Feeds the sample count followed by the raw bits of every coordinate, in
/// order. Both strategies hash through here so equal content hashes equally
/// regardless of storage.
pub fn hash_samples<H, I>(count: usize, samples: I, state: &mut H) where
    H: Hasher,
    I: IntoIterator<Item = Sample> {
    state.write_usize(count);
    for sample in samples {
        state.write_u64(sample.x().to_bits());
        state.write_u64(sample.y().to_bits());
    }
}

pub(crate) fn write_samples<I>(f: &mut fmt::Formatter<'_>, samples: I) -> fmt::Result where
    I: IntoIterator<Item = Sample> {
    write!(f, "{{")?;
    for (i, sample) in samples.into_iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", sample)?;
    }
    write!(f, "}}")
}

/// Value of the segment `[lhs, rhs]` at `x`, or `None` when `x` is outside
/// it. Knots within `EPSILON` return their own ordinate.
pub(crate) fn bracket_value(lhs: &Sample, rhs: &Sample, x: f64) -> Option<f64> {
    if x < lhs.x() - EPSILON || x > rhs.x() + EPSILON {
        return None;
    }
    if lhs.same_x(x) {
        return Some(lhs.y());
    }
    if rhs.same_x(x) {
        return Some(rhs.y());
    }
    Some(lhs.y() + (rhs.y() - lhs.y()) * (x - lhs.x()) / (rhs.x() - lhs.x()))
}

pub(crate) fn check_index(index: usize, count: usize) -> Result<(), TabulatedFunctionError> {
    if index >= count {
        debug!("index {} rejected, {} points stored", index, count);
        return Err(TabulatedFunctionError::IndexOutOfRange { index, count });
    }
    Ok(())
}

pub(crate) fn check_finite(x: f64) -> Result<(), TabulatedFunctionError> {
    if !x.is_finite() {
        debug!("x = {} rejected, abscissas must be finite", x);
        return Err(TabulatedFunctionError::InvalidPoint(
            format!("x = {} is not a finite abscissa", x)
        ));
    }
    Ok(())
}

/// A new abscissa must be finite and clear both neighbours by more than
/// `EPSILON`.
pub(crate) fn check_between(prev_x: Option<f64>, next_x: Option<f64>, x: f64) -> Result<(), TabulatedFunctionError> {
    check_finite(x)?;
    if let Some(prev_x) = prev_x {
        if x <= prev_x + EPSILON {
            debug!("x = {} rejected, previous point is at {}", x, prev_x);
            return Err(TabulatedFunctionError::InvalidPoint(
                format!("x = {} must be greater than the previous x = {}", x, prev_x)
            ));
        }
    }
    if let Some(next_x) = next_x {
        if x >= next_x - EPSILON {
            debug!("x = {} rejected, next point is at {}", x, next_x);
            return Err(TabulatedFunctionError::InvalidPoint(
                format!("x = {} must be less than the next x = {}", x, next_x)
            ));
        }
    }
    Ok(())
}

pub(crate) fn check_deletable(count: usize) -> Result<(), TabulatedFunctionError> {
    if count <= MIN_POINTS {
        debug!("deletion refused with {} points left", count);
        return Err(TabulatedFunctionError::InvariantViolation(
            format!("a tabulated function keeps at least {} points", MIN_POINTS)
        ));
    }
    Ok(())
}

pub(crate) fn duplicate_point(x: f64) -> TabulatedFunctionError {
    debug!("x = {} rejected, a point with that x already exists", x);
    TabulatedFunctionError::InvalidPoint(format!("a point with x = {} already exists", x))
}

/// Checks construction input: at least `MIN_POINTS` samples with finite,
/// strictly increasing abscissas.
pub(crate) fn validate_samples(points: &[Sample]) -> Result<(), TabulatedFunctionError> {
    if points.len() < MIN_POINTS {
        return Err(TabulatedFunctionError::InvalidArgument(
            format!("at least {} points are required, got {}", MIN_POINTS, points.len())
        ));
    }
    if let Some(i) = points.iter().position(|p| !p.x().is_finite()) {
        debug!("non-finite abscissa {} at index {}", points[i].x(), i);
        return Err(TabulatedFunctionError::InvalidArgument(
            format!("x = {} at index {} is not finite", points[i].x(), i)
        ));
    }
    for (i, pair) in points.windows(2).enumerate() {
        if !(pair[1].x() > pair[0].x() + EPSILON) {
            debug!("unordered input at index {}: {} after {}", i + 1, pair[1].x(), pair[0].x());
            return Err(TabulatedFunctionError::InvalidArgument(
                format!("points are not strictly ordered by x at index {}", i + 1)
            ));
        }
    }
    Ok(())
}

/// Abscissas of a uniform partition of `[left, right]` into `count` points.
/// Neighbouring abscissas are more than `EPSILON` apart.
pub(crate) fn uniform_partition(left: f64, right: f64, count: usize) -> Result<impl Iterator<Item = f64>, TabulatedFunctionError> {
    if !left.is_finite() || !right.is_finite() {
        return Err(TabulatedFunctionError::InvalidArgument(
            format!("borders {} and {} must be finite", left, right)
        ));
    }
    if !(left < right) {
        return Err(TabulatedFunctionError::InvalidArgument(
            format!("left border {} must be less than right border {}", left, right)
        ));
    }
    if count < MIN_POINTS {
        return Err(TabulatedFunctionError::InvalidArgument(
            format!("at least {} points are required, got {}", MIN_POINTS, count)
        ));
    }
    let step = (right - left) / (count - 1) as f64;
    if !(step > EPSILON) {
        debug!("partition of [{}, {}] into {} points has step {}", left, right, count, step);
        return Err(TabulatedFunctionError::InvalidArgument(
            format!("{} points on [{}, {}] are not more than {} apart", count, left, right, EPSILON)
        ));
    }
    Ok((0..count).map(move |i| left + i as f64 * step))
}
