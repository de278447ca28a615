use mold_testhelpers::test;

use mold::{Buildable, BuildError, Builder, Members, expose_fields};

#[derive(Debug, PartialEq)]
struct Point {
    x: i32,
    y: i32,
}

impl Point {
    fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Buildable for Point {
    fn members(members: &mut Members<Self>) {
        members.constructor(Point::new);
        members.constructor(|| Point::new(0, 0));
        expose_fields!(members, x, y);
    }
}

#[derive(Debug)]
struct Splode;

impl core::fmt::Display for Splode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "splode")
    }
}

impl core::error::Error for Splode {}

struct Picky {
    limit: u32,
}

impl Picky {
    fn checked(limit: u32) -> Result<Self, Splode> {
        if limit > 100 {
            return Err(Splode);
        }
        Ok(Self { limit })
    }
}

impl Buildable for Picky {
    fn members(members: &mut Members<Self>) {
        members.try_constructor(Picky::checked);
    }
}

#[test]
fn zero_arg_constructor() {
    let point = Builder::<Point>::create(())?.build();
    assert_eq!(point, Point { x: 0, y: 0 });
}

#[test]
fn positional_constructor() {
    let point = Builder::<Point>::create((1, 2))?.build();
    assert_eq!(point, Point { x: 1, y: 2 });
}

#[test]
fn no_matching_constructor() {
    let err = Builder::<Point>::create((1i64, 2i64)).unwrap_err();
    assert!(matches!(err, BuildError::NoMatchingConstructor { .. }));
}

#[test]
fn no_widening_in_resolution() {
    // u8 arguments never match the (i32, i32) constructor
    let err = Builder::<Point>::create((1u8, 2u8)).unwrap_err();
    assert!(matches!(err, BuildError::NoMatchingConstructor { .. }));
}

#[test]
fn arity_matters() {
    let err = Builder::<Point>::create((1,)).unwrap_err();
    assert!(matches!(err, BuildError::NoMatchingConstructor { .. }));
}

#[test]
fn fallible_constructor_ok() {
    let picky = Builder::<Picky>::create((42u32,))?.build();
    assert_eq!(picky.limit, 42);
}

#[test]
fn fallible_constructor_error_is_wrapped() {
    let err = Builder::<Picky>::create((1000u32,)).unwrap_err();
    assert!(matches!(err, BuildError::MemberFailed { .. }));
    let source = core::error::Error::source(&err).expect("cause retained");
    assert!(source.to_string().contains("splode"));
}
