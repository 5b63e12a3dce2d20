use std::fmt;
use std::hash::{
    Hash,
    Hasher
};

use crate::error::TabulatedFunctionError;
use crate::function::arraytabulatedfunction::ArrayTabulatedFunction;
use crate::function::evaluable::Evaluable;
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

// ─────────────────────────────────────────────
// Node arena
// ─────────────────────────────────────────────
//
// The ring lives in a Vec of nodes linked by slot index. Slot 0 is the
// sentinel: its `next` is the first sample and its `prev` the last, so an
// empty ring is the sentinel pointing at itself and no link is ever absent.
// Unlinked slots are recycled through `free`.

const SENTINEL: usize = 0;

#[derive(Debug, Clone, Copy)]
struct Node {
    sample: Sample,
    prev: usize,
    next: usize,
}

/// Tabulated function stored as a circular doubly-linked list.
///
/// Indexed access walks from whichever end of the ring is closer; inserting
/// or deleting relinks two neighbours and never moves other samples.
#[derive(Debug)]
pub struct LinkedListTabulatedFunction {
    nodes: Vec<Node>,
    free: Vec<usize>,
    count: usize,
}

impl LinkedListTabulatedFunction {
    /// Copies `points`, which must hold at least two samples with strictly
    /// increasing abscissas.
    pub fn new(points: &[Sample]) -> Result<LinkedListTabulatedFunction, TabulatedFunctionError> {
        validate_samples(points)?;
        Ok(Self::from_ordered(points.iter().copied(), points.len()))
    }

    /// `count` evenly spaced points over `[left, right]`, all with `y = 0`.
    pub fn with_zero_values(left: f64, right: f64, count: usize) -> Result<LinkedListTabulatedFunction, TabulatedFunctionError> {
        let xs = uniform_partition(left, right, count)?;
        Ok(Self::from_ordered(xs.map(|x| Sample::new(x, 0.0)), count))
    }

    /// Evenly spaced points over `[left, right]`, one per entry of `values`.
    pub fn with_values(left: f64, right: f64, values: &[f64]) -> Result<LinkedListTabulatedFunction, TabulatedFunctionError> {
        let xs = uniform_partition(left, right, values.len())?;
        let samples = xs.zip(values.iter()).map(|(x, &y)| Sample::new(x, y));
        Ok(Self::from_ordered(samples, values.len()))
    }

    fn empty(capacity: usize) -> LinkedListTabulatedFunction {
        let mut nodes = Vec::with_capacity(capacity + 1);
        nodes.push(Node { sample: Sample::default(), prev: SENTINEL, next: SENTINEL });
        LinkedListTabulatedFunction { nodes, free: Vec::new(), count: 0 }
    }

    fn from_ordered<I>(samples: I, capacity: usize) -> LinkedListTabulatedFunction where
        I: Iterator<Item = Sample> {
        let mut list = Self::empty(capacity);
        for sample in samples {
            list.link_before(SENTINEL, sample);
        }
        list
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            front: self.nodes[SENTINEL].next,
            back: self.nodes[SENTINEL].prev,
            remaining: self.count,
        }
    }

    fn first(&self) -> Option<&Sample> {
        let slot = self.nodes[SENTINEL].next;
        (slot != SENTINEL).then(|| &self.nodes[slot].sample)
    }

    fn last(&self) -> Option<&Sample> {
        let slot = self.nodes[SENTINEL].prev;
        (slot != SENTINEL).then(|| &self.nodes[slot].sample)
    }

    /// Slot holding the sample at `index`, walking forward from the head for
    /// the first half and backward from the sentinel for the second.
    fn slot_of(&self, index: usize) -> Result<usize, TabulatedFunctionError> {
        check_index(index, self.count)?;
        let mut slot;
        if index < self.count / 2 {
            slot = self.nodes[SENTINEL].next;
            for _ in 0..index {
                slot = self.nodes[slot].next;
            }
        } else {
            slot = SENTINEL;
            for _ in index..self.count {
                slot = self.nodes[slot].prev;
            }
        }
        Ok(slot)
    }

    fn link_before(&mut self, next: usize, sample: Sample) -> usize {
        let prev = self.nodes[next].prev;
        let node = Node { sample, prev, next };
        let slot = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.nodes[prev].next = slot;
        self.nodes[next].prev = slot;
        self.count += 1;
        slot
    }

    fn unlink(&mut self, slot: usize) -> Sample {
        let Node { sample, prev, next } = self.nodes[slot];
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.free.push(slot);
        self.count -= 1;
        sample
    }

    fn neighbours_of(&self, slot: usize) -> (Option<f64>, Option<f64>) {
        let Node { prev, next, .. } = self.nodes[slot];
        let prev_x = (prev != SENTINEL).then(|| self.nodes[prev].sample.x());
        let next_x = (next != SENTINEL).then(|| self.nodes[next].sample.x());
        (prev_x, next_x)
    }
}

/// Walks the ring in index order.
pub struct Iter<'a> {
    list: &'a LinkedListTabulatedFunction,
    front: usize,
    back: usize,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.front];
        self.front = node.next;
        self.remaining -= 1;
        Some(node.sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Sample> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.list.nodes[self.back];
        self.back = node.prev;
        self.remaining -= 1;
        Some(node.sample)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a LinkedListTabulatedFunction {
    type Item = Sample;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Rebuilds a compact ring; freed slots of the source are not carried over.
impl Clone for LinkedListTabulatedFunction {
    fn clone(&self) -> Self {
        Self::from_ordered(self.iter(), self.count)
    }
}

impl Evaluable for LinkedListTabulatedFunction {
    fn left_border(&self) -> f64 {
        self.first().map_or(f64::NAN, |p| p.x())
    }

    fn right_border(&self) -> f64 {
        self.last().map_or(f64::NAN, |p| p.x())
    }

    fn value_at(&self, x: f64) -> f64 {
        let (first, last) = match (self.first(), self.last()) {
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
        let mut slot = self.nodes[SENTINEL].next;
        loop {
            let next = self.nodes[slot].next;
            if next == SENTINEL {
                return f64::NAN;
            }
            if let Some(y) = bracket_value(&self.nodes[slot].sample, &self.nodes[next].sample, x) {
                return y;
            }
            slot = next;
        }
    }
}

impl TabulatedFunction for LinkedListTabulatedFunction {
    fn count(&self) -> usize {
        self.count
    }

    fn point_at(&self, index: usize) -> Result<Sample, TabulatedFunctionError> {
        let slot = self.slot_of(index)?;
        Ok(self.nodes[slot].sample)
    }

    fn set_point(&mut self, index: usize, point: Sample) -> Result<(), TabulatedFunctionError> {
        let slot = self.slot_of(index)?;
        if self.nodes[slot].sample.same_x(point.x()) {
            self.nodes[slot].sample.set_y(point.y());
            return Ok(());
        }
        let (prev_x, next_x) = self.neighbours_of(slot);
        check_between(prev_x, next_x, point.x())?;
        self.nodes[slot].sample = point;
        Ok(())
    }

    fn point_x(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        let slot = self.slot_of(index)?;
        Ok(self.nodes[slot].sample.x())
    }

    fn set_point_x(&mut self, index: usize, x: f64) -> Result<(), TabulatedFunctionError> {
        let slot = self.slot_of(index)?;
        if self.nodes[slot].sample.same_x(x) {
            return Ok(());
        }
        let (prev_x, next_x) = self.neighbours_of(slot);
        check_between(prev_x, next_x, x)?;
        self.nodes[slot].sample.set_x(x);
        Ok(())
    }

    fn point_y(&self, index: usize) -> Result<f64, TabulatedFunctionError> {
        let slot = self.slot_of(index)?;
        Ok(self.nodes[slot].sample.y())
    }

    fn set_point_y(&mut self, index: usize, y: f64) -> Result<(), TabulatedFunctionError> {
        let slot = self.slot_of(index)?;
        self.nodes[slot].sample.set_y(y);
        Ok(())
    }

    fn delete_point(&mut self, index: usize) -> Result<(), TabulatedFunctionError> {
        let slot = self.slot_of(index)?;
        check_deletable(self.count)?;
        self.unlink(slot);
        Ok(())
    }

    fn add_point(&mut self, point: Sample) -> Result<(), TabulatedFunctionError> {
        check_finite(point.x())?;
        // Appending past the right border needs no scan.
        if self.last().is_none_or(|last| point.x() > last.x() + EPSILON) {
            self.link_before(SENTINEL, point);
            return Ok(());
        }
        let mut slot = self.nodes[SENTINEL].next;
        while slot != SENTINEL && point.x() > self.nodes[slot].sample.x() + EPSILON {
            slot = self.nodes[slot].next;
        }
        if slot != SENTINEL && self.nodes[slot].sample.same_x(point.x()) {
            return Err(duplicate_point(point.x()));
        }
        self.link_before(slot, point);
        Ok(())
    }

    fn storage_kind(&self) -> StorageKind {
        StorageKind::LinkedList
    }

    fn clone_boxed(&self) -> Box<dyn TabulatedFunction> {
        Box::new(self.clone())
    }

    fn points(&self) -> Vec<Sample> {
        self.iter().collect()
    }
}

/// Lock-step walk over both rings.
impl PartialEq for LinkedListTabulatedFunction {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl PartialEq<ArrayTabulatedFunction> for LinkedListTabulatedFunction {
    fn eq(&self, other: &ArrayTabulatedFunction) -> bool {
        same_samples(self, other)
    }
}

impl Hash for LinkedListTabulatedFunction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_samples(self.count, self.iter(), state);
    }
}

impl fmt::Display for LinkedListTabulatedFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_samples(f, self.iter())
    }
}
