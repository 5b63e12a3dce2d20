use std::fmt;

use serde::{
    Deserialize,
    Serialize
};

/// Tolerance under which two coordinates are treated as the same value.
///
/// Shared by both storage strategies: ordering checks, duplicate detection,
/// knot snapping in `value_at` and equality all use it.
pub const EPSILON: f64 = 1e-10;

/// One `(x, y)` knot of a tabulated function.
///
/// `Sample` is `Copy`: containers hand out values, never references into
/// their storage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Sample {
    x: f64,
    y: f64
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Sample {
        Sample { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// `true` when `x` lies strictly within `EPSILON` of this sample's abscissa.
    pub fn same_x(&self, x: f64) -> bool {
        (self.x - x).abs() < EPSILON
    }
}

/// Coordinate-wise comparison within `EPSILON`.
impl PartialEq for Sample {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() <= EPSILON && (self.y - other.y).abs() <= EPSILON
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Sample::new(x, y)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}; {:.3})", self.x, self.y)
    }
}
