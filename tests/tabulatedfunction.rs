use std::hash::{
    DefaultHasher,
    Hash,
    Hasher
};

use tabfun::error::TabulatedFunctionError;
use tabfun::function::arraytabulatedfunction::ArrayTabulatedFunction;
use tabfun::function::evaluable::{
    Evaluable,
    FunctionOf
};
use tabfun::function::linkedlisttabulatedfunction::LinkedListTabulatedFunction;
use tabfun::function::sample::{
    EPSILON,
    Sample
};
use tabfun::function::tabulatedfunction::{
    same_samples,
    StorageKind,
    TabulatedFunction
};
use tabfun::function::tabulatedfunctions::{
    create,
    tabulate
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn parabola_points() -> Vec<Sample> {
    vec![
        Sample::new(0.0, 0.0),
        Sample::new(1.0, 1.0),
        Sample::new(2.0, 4.0),
    ]
}

fn both(points: &[Sample]) -> Vec<Box<dyn TabulatedFunction>> {
    vec![
        create(StorageKind::Array, points).unwrap(),
        create(StorageKind::LinkedList, points).unwrap(),
    ]
}

fn irregular_points() -> Vec<Sample> {
    vec![
        Sample::new(-3.0, 2.0),
        Sample::new(-1.5, -1.0),
        Sample::new(0.0, 0.5),
        Sample::new(0.25, 7.0),
        Sample::new(4.0, 7.0),
        Sample::new(9.0, -2.0),
    ]
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn assert_ordered(f: &dyn TabulatedFunction) {
    assert!(f.count() >= 2);
    let points = f.points();
    for pair in points.windows(2) {
        assert!(pair[0].x() < pair[1].x(), "{} is not ordered", f);
    }
}

#[test]
fn every_construction_is_ordered() {
    init();
    let constructed: Vec<Box<dyn TabulatedFunction>> = vec![
        Box::new(ArrayTabulatedFunction::new(&irregular_points()).unwrap()),
        Box::new(ArrayTabulatedFunction::with_zero_values(-1.0, 1.0, 2).unwrap()),
        Box::new(ArrayTabulatedFunction::with_values(0.0, 10.0, &[1.0, 2.0, 3.0, 4.0]).unwrap()),
        Box::new(LinkedListTabulatedFunction::new(&irregular_points()).unwrap()),
        Box::new(LinkedListTabulatedFunction::with_zero_values(-1.0, 1.0, 2).unwrap()),
        Box::new(LinkedListTabulatedFunction::with_values(0.0, 10.0, &[1.0, 2.0, 3.0, 4.0]).unwrap()),
    ];
    for f in &constructed {
        assert_ordered(&**f);
    }
}

#[test]
fn invalid_constructions_are_rejected() {
    init();
    let unordered = [Sample::new(0.0, 0.0), Sample::new(2.0, 0.0), Sample::new(1.0, 0.0)];
    let single = [Sample::new(0.0, 0.0)];
    for kind in [StorageKind::Array, StorageKind::LinkedList] {
        assert!(matches!(create(kind, &unordered), Err(TabulatedFunctionError::InvalidArgument(_))));
        assert!(matches!(create(kind, &single), Err(TabulatedFunctionError::InvalidArgument(_))));
        assert!(matches!(create(kind, &[]), Err(TabulatedFunctionError::InvalidArgument(_))));
    }
    assert!(ArrayTabulatedFunction::with_zero_values(1.0, 0.0, 3).is_err());
    assert!(ArrayTabulatedFunction::with_zero_values(0.0, 1.0, 1).is_err());
    assert!(LinkedListTabulatedFunction::with_zero_values(1.0, 1.0, 3).is_err());
    assert!(LinkedListTabulatedFunction::with_values(0.0, 1.0, &[]).is_err());

    let crowded = ArrayTabulatedFunction::with_zero_values(0.0, 1e-10, 3);
    assert!(matches!(crowded, Err(TabulatedFunctionError::InvalidArgument(_))));
    assert!(LinkedListTabulatedFunction::with_values(0.0, 1e-10, &[1.0, 2.0, 3.0]).is_err());
    let unbounded = LinkedListTabulatedFunction::with_zero_values(f64::NEG_INFINITY, f64::INFINITY, 3);
    assert!(matches!(unbounded, Err(TabulatedFunctionError::InvalidArgument(_))));
    assert!(ArrayTabulatedFunction::with_values(f64::NAN, 1.0, &[1.0, 2.0]).is_err());
    let exp = FunctionOf::new(f64::NEG_INFINITY, f64::INFINITY, f64::exp);
    assert!(tabulate(&exp, f64::NEG_INFINITY, 0.0, 4).is_err());
    assert!(tabulate(&exp, 0.0, 1e-10, 4).is_err());
    for kind in [StorageKind::Array, StorageKind::LinkedList] {
        let infinite = [Sample::new(0.0, 0.0), Sample::new(f64::INFINITY, 0.0)];
        assert!(matches!(create(kind, &infinite), Err(TabulatedFunctionError::InvalidArgument(_))));
    }
}

#[test]
fn non_finite_abscissas_are_never_stored() {
    init();
    for mut f in both(&parabola_points()) {
        for x in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(f.add_point(Sample::new(x, 5.0)), Err(TabulatedFunctionError::InvalidPoint(_))));
            assert!(matches!(f.set_point_x(0, x), Err(TabulatedFunctionError::InvalidPoint(_))));
            assert!(matches!(f.set_point(2, Sample::new(x, 1.0)), Err(TabulatedFunctionError::InvalidPoint(_))));
        }
        assert_eq!(f.points(), parabola_points());
        assert_ordered(&*f);
    }
}

#[test]
fn knots_evaluate_to_their_ordinates() {
    init();
    for f in both(&irregular_points()) {
        for point in irregular_points() {
            assert_eq!(f.value_at(point.x()), point.y());
            assert_eq!(f.value_at(point.x() + EPSILON / 2.0), point.y());
        }
    }
}

#[test]
fn interpolation_is_affine_between_knots() {
    init();
    let points = irregular_points();
    for f in both(&points) {
        for pair in points.windows(2) {
            let (lhs, rhs) = (pair[0], pair[1]);
            for t in [0.1, 0.25, 0.5, 0.9] {
                let x = lhs.x() + t * (rhs.x() - lhs.x());
                let expected = lhs.y() + (rhs.y() - lhs.y()) * (x - lhs.x()) / (rhs.x() - lhs.x());
                assert!((f.value_at(x) - expected).abs() < 1e-12, "{:?} at {}", f, x);
            }
        }
    }
}

#[test]
fn undefined_outside_the_domain() {
    init();
    for f in both(&irregular_points()) {
        assert!(f.value_at(-3.0 - 1e-6).is_nan());
        assert!(f.value_at(9.0 + 1e-6).is_nan());
        assert!(f.value_at(f64::NEG_INFINITY).is_nan());
        assert!(f.value_at(f64::NAN).is_nan());
        assert_eq!(f.left_border(), -3.0);
        assert_eq!(f.right_border(), 9.0);
    }
}

#[test]
fn parabola_scenario() {
    init();
    for f in both(&parabola_points()) {
        assert_eq!(f.value_at(0.5), 0.5);
        assert_eq!(f.value_at(1.5), 2.5);
        assert!(f.value_at(-1.0).is_nan());
    }
}

#[test]
fn deletion_keeps_two_points() {
    init();
    let mut functions: Vec<Box<dyn TabulatedFunction>> = vec![
        Box::new(ArrayTabulatedFunction::with_zero_values(0.0, 1.0, 3).unwrap()),
        Box::new(LinkedListTabulatedFunction::with_zero_values(0.0, 1.0, 3).unwrap()),
    ];
    for f in functions.iter_mut() {
        f.delete_point(1).unwrap();
        assert_eq!(f.count(), 2);
        assert!(matches!(f.delete_point(0), Err(TabulatedFunctionError::InvariantViolation(_))));
        assert_eq!(f.points(), vec![Sample::new(0.0, 0.0), Sample::new(1.0, 0.0)]);
        assert_eq!(
            f.delete_point(2),
            Err(TabulatedFunctionError::IndexOutOfRange { index: 2, count: 2 })
        );
    }
}

#[test]
fn duplicate_abscissa_is_rejected() {
    init();
    for mut f in both(&parabola_points()) {
        let result = f.add_point(Sample::new(1.0, 5.0));
        assert!(matches!(result, Err(TabulatedFunctionError::InvalidPoint(_))));
        assert_eq!(f.count(), 3);
        assert_eq!(f.point_y(1).unwrap(), 1.0);
        assert!(f.add_point(Sample::new(1.0 + EPSILON / 2.0, 5.0)).is_err());
        assert!(f.add_point(Sample::new(0.0, 5.0)).is_err());
        assert!(f.add_point(Sample::new(2.0, 5.0)).is_err());
    }
}

#[test]
fn set_point_x_below_previous_neighbour_is_rejected() {
    init();
    for mut f in both(&parabola_points()) {
        let result = f.set_point_x(1, -0.5);
        assert!(matches!(result, Err(TabulatedFunctionError::InvalidPoint(_))));
        assert_eq!(f.point_at(1).unwrap(), Sample::new(1.0, 1.0));
        assert!(f.set_point_x(1, 2.0).is_err());
        assert!(f.set_point(1, Sample::new(0.0, 9.0)).is_err());
        assert_eq!(f.points(), parabola_points());
        f.set_point_x(1, 1.5).unwrap();
        assert_eq!(f.point_x(1).unwrap(), 1.5);
    }
}

#[test]
fn indexed_accessors_check_bounds() {
    init();
    for mut f in both(&parabola_points()) {
        let out_of_range = TabulatedFunctionError::IndexOutOfRange { index: 3, count: 3 };
        assert_eq!(f.point_at(3), Err(out_of_range.clone()));
        assert_eq!(f.point_x(3), Err(out_of_range.clone()));
        assert_eq!(f.point_y(3), Err(out_of_range.clone()));
        assert_eq!(f.set_point(3, Sample::new(5.0, 0.0)), Err(out_of_range.clone()));
        assert_eq!(f.set_point_x(3, 5.0), Err(out_of_range.clone()));
        assert_eq!(f.set_point_y(3, 5.0), Err(out_of_range));
        f.set_point_y(2, -8.0).unwrap();
        assert_eq!(f.point_at(2).unwrap(), Sample::new(2.0, -8.0));
    }
}

#[test]
fn add_then_delete_restores_the_function() {
    init();
    for mut f in both(&irregular_points()) {
        let reference = f.clone_boxed();
        for x in [-10.0, -2.0, 0.1, 5.0, 20.0] {
            f.add_point(Sample::new(x, 42.0)).unwrap();
            let index = f.points().iter().position(|p| p.x() == x).unwrap();
            assert_eq!(f.point_y(index).unwrap(), 42.0);
            assert_ordered(&*f);
            f.delete_point(index).unwrap();
            assert!(*f == *reference);
        }
    }
}

#[test]
fn same_samples_compare_equal_across_storage() {
    init();
    let points = irregular_points();
    let array = ArrayTabulatedFunction::new(&points).unwrap();
    let list = LinkedListTabulatedFunction::new(&points).unwrap();
    assert!(array == list);
    assert!(list == array);
    assert!(same_samples(&array, &list));
    assert_eq!(hash_of(&array), hash_of(&list));

    let mut edited = list.clone();
    edited.set_point_y(2, 0.75).unwrap();
    assert!(array != edited);
    assert!(edited != list);
    assert_ne!(hash_of(&edited), hash_of(&list));

    let shorter = ArrayTabulatedFunction::new(&points[..5]).unwrap();
    assert!(shorter != array);
    assert!(shorter != list);
}

#[test]
fn hash_depends_on_order() {
    init();
    let a = ArrayTabulatedFunction::new(&[Sample::new(0.0, 1.0), Sample::new(1.0, 0.0)]).unwrap();
    let b = ArrayTabulatedFunction::new(&[Sample::new(0.0, 0.0), Sample::new(1.0, 1.0)]).unwrap();
    assert_ne!(hash_of(&a), hash_of(&b));
}

#[test]
fn clones_are_independent() {
    init();
    let mut array = ArrayTabulatedFunction::new(&parabola_points()).unwrap();
    let mut list = LinkedListTabulatedFunction::new(&parabola_points()).unwrap();
    let array_copy = array.clone_boxed();
    let list_copy = list.clone_boxed();
    assert_eq!(array_copy.storage_kind(), StorageKind::Array);
    assert_eq!(list_copy.storage_kind(), StorageKind::LinkedList);

    array.set_point_y(0, 10.0).unwrap();
    list.add_point(Sample::new(3.0, 9.0)).unwrap();
    assert_eq!(array_copy.point_y(0).unwrap(), 0.0);
    assert_eq!(list_copy.count(), 3);
}

#[test]
fn display_is_identical_for_both_storages() {
    init();
    let functions = both(&parabola_points());
    assert_eq!(functions[0].to_string(), "{(0.000; 0.000), (1.000; 1.000), (2.000; 4.000)}");
    assert_eq!(functions[0].to_string(), functions[1].to_string());
}

#[test]
fn tabulated_functions_can_be_tabulated_again() {
    init();
    let exp = FunctionOf::new(f64::NEG_INFINITY, f64::INFINITY, f64::exp);
    let coarse = tabulate(&exp, 0.0, 1.0, 11).unwrap();
    assert_eq!(coarse.value_at(0.0), 1.0);
    assert!((coarse.value_at(0.05) - (1.0 + 0.1_f64.exp()) / 2.0).abs() < 1e-12);

    let list = LinkedListTabulatedFunction::new(&coarse.points()).unwrap();
    let resampled = tabulate(&list, 0.0, 1.0, 21).unwrap();
    assert_eq!(resampled.count(), 21);
    assert!(tabulate(&list, -0.5, 1.0, 21).is_err());
    for i in 0..11 {
        let knot = coarse.point_at(i).unwrap();
        assert!((resampled.value_at(knot.x()) - knot.y()).abs() < 1e-12);
    }
}
