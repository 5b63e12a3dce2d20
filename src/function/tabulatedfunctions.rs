use log::debug;

use crate::error::TabulatedFunctionError;
use crate::function::arraytabulatedfunction::ArrayTabulatedFunction;
use crate::function::evaluable::Evaluable;
use crate::function::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use crate::function::sample::Sample;
use crate::function::tabulatedfunction::{
    uniform_partition,
    StorageKind,
    TabulatedFunction
};

/// Samples `function` at `count` evenly spaced points of `[left, right]`,
/// both ends included.
///
/// The interval must lie inside the function's declared domain.
pub fn tabulate<E>(function: &E, left: f64, right: f64, count: usize) -> Result<ArrayTabulatedFunction, TabulatedFunctionError> where
    E: Evaluable + ?Sized {
    if left < function.left_border() || right > function.right_border() {
        debug!(
            "[{}, {}] is outside the domain [{}, {}]",
            left, right, function.left_border(), function.right_border()
        );
        return Err(TabulatedFunctionError::InvalidArgument(
            format!(
                "[{}, {}] is outside the domain [{}, {}]",
                left, right, function.left_border(), function.right_border()
            )
        ));
    }
    let points: Vec<Sample> = uniform_partition(left, right, count)?
        .map(|x| Sample::new(x, function.value_at(x)))
        .collect();
    ArrayTabulatedFunction::new(&points)
}

/// Builds a tabulated function of the requested storage strategy.
pub fn create(kind: StorageKind, points: &[Sample]) -> Result<Box<dyn TabulatedFunction>, TabulatedFunctionError> {
    Ok(match kind {
        StorageKind::Array => Box::new(ArrayTabulatedFunction::new(points)?),
        StorageKind::LinkedList => Box::new(LinkedListTabulatedFunction::new(points)?),
    })
}
