/// A real function of one variable with a declared domain.
///
/// `value_at` returns `f64::NAN` outside `[left_border(), right_border()]`;
/// it never fails.
pub trait Evaluable {
    fn left_border(&self) -> f64;

    fn right_border(&self) -> f64;

    fn value_at(&self, x: f64) -> f64;
}

impl<T: Evaluable + ?Sized> Evaluable for Box<T> {
    fn left_border(&self) -> f64 {
        (**self).left_border()
    }

    fn right_border(&self) -> f64 {
        (**self).right_border()
    }

    fn value_at(&self, x: f64) -> f64 {
        (**self).value_at(x)
    }
}

/// Adapts a closure to `Evaluable` over a fixed domain.
///
/// ```
/// use tabfun::function::evaluable::{Evaluable, FunctionOf};
///
/// let exp = FunctionOf::new(f64::NEG_INFINITY, f64::INFINITY, f64::exp);
/// assert_eq!(exp.value_at(0.0), 1.0);
///
/// let ln = FunctionOf::new(0.0, f64::INFINITY, f64::ln);
/// assert!(ln.value_at(-1.0).is_nan());
/// ```
pub struct FunctionOf<F> {
    left: f64,
    right: f64,
    function: F
}

impl<F> FunctionOf<F> where
    F: Fn(f64) -> f64 {
    pub fn new(left: f64, right: f64, function: F) -> FunctionOf<F> {
        FunctionOf { left, right, function }
    }
}

impl<F> Evaluable for FunctionOf<F> where
    F: Fn(f64) -> f64 {
    fn left_border(&self) -> f64 {
        self.left
    }

    fn right_border(&self) -> f64 {
        self.right
    }

    fn value_at(&self, x: f64) -> f64 {
        if x < self.left || x > self.right {
            f64::NAN
        } else {
            (self.function)(x)
        }
    }
}
