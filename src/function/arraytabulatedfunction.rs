use std::fmt;
use std::hash::{
    Hash,
    Hasher
};
use std::iter::Copied;
use std::slice;

use log::trace;

use crate::error::TabulatedFunctionError;
use crate::function::evaluable::Evaluable;
use crate::function::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use crate::function::sample::{
    EPSILON,
    Sample
};
use crate::function::tabulatedfunction::{
    bracket_value,
    check_between,
    check_deletable,
    check_finite,
    check_index,
    duplicate_point,
    hash_samples,
    same_samples,
    uniform_partition,
    validate_samples,
    write_samples,
    StorageKind,
    TabulatedFunction
};

const DEFAULT_CAPACITY: usize = 16;

/// Tabulated function stored in one contiguous buffer.
///
/// Random access is O(1); inserting or deleting shifts the tail of the
/// buffer. Capacity starts at `max(2 * n, 16)` and doubles when an insert
/// finds the buffer full.
#[derive(Debug, Clone)]
pub struct ArrayTabulatedFunction {
    points: Vec<Sample>
}

impl ArrayTabulatedFunction {
    /// Copies `points`, which must hold at least two samples with strictly
    /// increasing abscissas. The whole input is validated before anything is
    /// allocated.
    pub fn new(points: &[Sample]) -> Result<ArrayTabulatedFunction, TabulatedFunctionError> {
        validate_samples(points)?;
        let mut buffer = Self::allocate(points.len());
        buffer.extend_from_slice(points);
        Ok(ArrayTabulatedFunction { points: buffer })
    }

    /// `count` evenly spaced points over `[left, right]`, all with `y = 0`.
    pub fn with_zero_values(left: f64, right: f64, count: usize) -> Result<ArrayTabulatedFunction, TabulatedFunctionError> {
        let xs = uniform_partition(left, right, count)?;
        let mut buffer = Self::allocate(count);
        buffer.extend(xs.map(|x| Sample::new(x, 0.0)));
        Ok(ArrayTabulatedFunction { points: buffer })
    }

    /// Evenly spaced points over `[left, right]`, one per entry of `values`.
    pub fn with_values(left: f64, right: f64, values: &[f64]) -> Result<ArrayTabulatedFunction, TabulatedFunctionError> {
        let xs = uniform_partition(left, right, values.len())?;
        let mut buffer = Self::allocate(values.len());
        buffer.extend(xs.zip(values.iter()).map(|(x, &y)| Sample::new(x, y)));
        Ok(ArrayTabulatedFunction { points: buffer })
    }

    fn allocate(count: usize) -> Vec<Sample> {
        Vec::with_capacity(usize::max(count.saturating_mul(2), DEFAULT_CAPACITY))
    }

    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.points
    }

    pub fn iter(&self) -> Copied<slice::Iter<'_, Sample>> {
        self.points.iter().copied()
    }

    fn grow_if_full(&mut self) {
        let capacity = self.points.capacity();
        if self.points.len() == capacity {
            let additional = usize::max(capacity, DEFAULT_CAPACITY);
            self.points.reserve_exact(additional);
            trace!("array storage grown from {} to {}", capacity, self.points.capacity());
        }
    }

    fn neighbours_of(&self, index: usize) -> (Option<f64>, Option<f64>) {
        let prev_x = index.checked_sub(1).map(|i| self.points[i].x());
        let next_x = self.points.get(index + 1).map(|p| p.x());
        (prev_x, next_x)
    }
}

impl Evaluable for ArrayTabulatedFunction {
    fn left_border(&self) -> f64 {
        self.points.first().map_or(f64::NAN, |p| p.x())
    }

    fn right_border(&self) -> f64 {
        self.points.last().map_or(f64::NAN, |p| p.x())
    }

    fn value_at(&self, x: f64) -> f64 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return f64::NAN,
        };
        if x < first.x() - EPSILON || x > last.x() + EPSILON {
            return f64::NAN;
        }
        if first.same_x(x) {
            return first.y();
        }
        if last.same_x(x) {
            return last.y();
        }
        self.points
            .windows(2)
            .find_map(|pair| bracket_value(&pair[0], &pair[1], x))
            .unwrap_or(f64::NAN)
    }
}

impl TabulatedFunction for ArrayTabulatedFunction {
    fn count(&self) -> usize {
        self.points.len()
    }

    fn point_at(&self, index: usize) -> Result<Sample, TabulatedFunctionError> {
        check_index(index, self.count())?;
        Ok(self.points[index])
    }

    fn set_point(&mut self, index: usize, point: Sample) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.count())?;
        if self.points[index].same_x(point.x()) {
            self.points[index].set_y(point.y());
            return Ok(());
        }
        let (prev_x, next_x) = self.neighbours_of(index);
        check_between(prev_x, next_x, point.x())?;
        self.points[index] = point;
        Ok(())
    }

    fn point_x(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        check_index(index, self.count())?;
        Ok(self.points[index].x())
    }

    fn set_point_x(&mut self, index: usize, x: f64) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.count())?;
        if self.points[index].same_x(x) {
            return Ok(());
        }
        let (prev_x, next_x) = self.neighbours_of(index);
        check_between(prev_x, next_x, x)?;
        self.points[index].set_x(x);
        Ok(())
    }

    fn point_y(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        check_index(index, self.count())?;
        Ok(self.points[index].y())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.count())?;
        self.points[index].set_y(y);
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        check_index(index, self.count())?;
        check_deletable(self.count())?;
        self.points.remove(index);
        Ok(())
    }

    fn add_point(&mut self, point: Sample) -> Result<(), TabulatedFunctionError> {
        check_finite(point.x())?;
        let insert_index = self.points
            .iter()
            .position(|p| point.x() <= p.x() + EPSILON)
            .unwrap_or(self.points.len());
        if let Some(existing) = self.points.get(insert_index) {
            if existing.same_x(point.x()) {
                return Err(duplicate_point(point.x()));
            }
        }
        self.grow_if_full();
        self.points.insert(insert_index, point);
        Ok(())
    }

    fn storage_kind(&self) -> StorageKind {
        StorageKind::Array
    }

    fn clone_boxed(&self) -> Box<dyn TabulatedFunction> {
        Box::new(self.clone())
    }

    fn points(&self) -> Vec<Sample> {
        self.points.clone()
    }
}

impl PartialEq for ArrayTabulatedFunction {
    fn eq(&self, other: &Self) -> bool {
        self.points.len() == other.points.len()
            && self.points.iter().zip(other.points.iter()).all(|(a, b)| a == b)
    }
}

impl PartialEq<LinkedListTabulatedFunction> for ArrayTabulatedFunction {
    fn eq(&self, other: &LinkedListTabulatedFunction) -> bool {
        same_samples(self, other)
    }
}

impl Hash for ArrayTabulatedFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_samples(self.points.len(), self.iter(), state);
    }
}

impl fmt::Display for ArrayTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_samples(f, self.iter())
    }
}

impl<'a> IntoIterator for &'a ArrayTabulatedFunction {
    type Item = Sample;
    type IntoIter = Copied<slice::Iter<'a, Sample>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
