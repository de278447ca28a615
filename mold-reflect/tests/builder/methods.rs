use mold_testhelpers::test;

use mold::{Buildable, BuildError, Builder, MemberKind, Members};

#[derive(Debug, Default, PartialEq)]
struct Canvas {
    width: u32,
    height: u32,
    strokes: Vec<String>,
}

#[derive(Debug)]
struct OutOfBounds;

impl core::fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "out of bounds")
    }
}

impl core::error::Error for OutOfBounds {}

impl Canvas {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    // returns the stroke count; the builder discards it
    fn stroke(&mut self, label: String) -> usize {
        self.strokes.push(label);
        self.strokes.len()
    }

    fn stroke_at(&mut self, label: String, x: u32, y: u32) -> Result<(), OutOfBounds> {
        if x >= self.width || y >= self.height {
            return Err(OutOfBounds);
        }
        self.strokes.push(format!("{label}@{x},{y}"));
        Ok(())
    }
}

impl Buildable for Canvas {
    fn members(members: &mut Members<Self>) {
        members.constructor(Canvas::default);
        members.method("resize", Canvas::resize);
        members.method("stroke", Canvas::stroke);
        members.try_method("stroke_at", Canvas::stroke_at);
    }
}

#[test]
fn invoke_mutates_and_chains() {
    let canvas = Builder::<Canvas>::create(())?
        .invoke("resize", (800u32, 600u32))?
        .invoke("stroke", (String::from("a"),))?
        .invoke("stroke", (String::from("b"),))?
        .build();
    assert_eq!(canvas.width, 800);
    assert_eq!(canvas.strokes, vec!["a", "b"]);
}

#[test]
fn return_values_are_discarded() {
    // `stroke` returns the stroke count; invoke still yields the builder
    let canvas = Builder::<Canvas>::create(())?
        .invoke("stroke", (String::from("only"),))?
        .build();
    assert_eq!(canvas.strokes.len(), 1);
}

#[test]
fn unknown_method() {
    let err = Builder::<Canvas>::create(())?
        .invoke("blur", ())
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::NoSuchMember {
            kind: MemberKind::Method,
            name_exists: false,
            ..
        }
    ));
}

#[test]
fn method_signature_is_exact() {
    // &str is not String
    let err = Builder::<Canvas>::create(())?
        .invoke("stroke", ("a",))
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::NoSuchMember {
            kind: MemberKind::Method,
            name_exists: true,
            ..
        }
    ));
}

#[test]
fn fallible_method_error_is_wrapped() {
    let err = Builder::<Canvas>::create(())?
        .invoke("resize", (10u32, 10u32))?
        .invoke("stroke_at", (String::from("x"), 99u32, 0u32))
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::MemberFailed {
            kind: MemberKind::Method,
            ..
        }
    ));
}

#[test]
fn fallible_method_ok() {
    let canvas = Builder::<Canvas>::create(())?
        .invoke("resize", (10u32, 10u32))?
        .invoke("stroke_at", (String::from("x"), 5u32, 5u32))?
        .build();
    assert_eq!(canvas.strokes, vec!["x@5,5"]);
}

#[test]
fn invoke_mut_keeps_the_builder() {
    let mut builder = Builder::<Canvas>::create(())?;
    builder.invoke_mut("resize", (4u32, 4u32))?;
    // a failed step leaves the builder usable, prior effects intact
    assert!(builder.invoke_mut("blur", ()).is_err());
    let canvas = builder.build();
    assert_eq!(canvas.width, 4);
}
