use mold_testhelpers::test;

use mold::{Buildable, Builder, Members};

#[derive(Debug)]
struct Refused;

impl core::fmt::Display for Refused {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "refused")
    }
}

impl core::error::Error for Refused {}

#[derive(Debug, Default)]
struct Gate {
    open: bool,
}

impl Gate {
    fn unlock(&mut self, code: u32) -> Result<(), Refused> {
        if code != 42 {
            return Err(Refused);
        }
        self.open = true;
        Ok(())
    }
}

impl Buildable for Gate {
    fn members(members: &mut Members<Self>) {
        members.constructor(Gate::default);
        members.try_method("unlock", Gate::unlock);
    }
}

#[test]
fn display_names_the_member() {
    let err = Builder::<Gate>::create(())?
        .invoke("unlock", (7u32,))
        .unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("unlock"));
    assert!(rendered.contains("Gate"));
}

#[test]
fn display_shows_the_provided_signature() {
    let err = Builder::<Gate>::create(())?
        .invoke("unlock", (7i64,))
        .unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("i64"));
}

#[test]
fn source_chain_reaches_the_cause() {
    let err = Builder::<Gate>::create(())?
        .invoke("unlock", (7u32,))
        .unwrap_err();
    let member_error = core::error::Error::source(&err).expect("member error");
    let cause = member_error.source().expect("target error");
    assert_eq!(cause.to_string(), "refused");
}

#[test]
fn unknown_constructor_error_mentions_the_type() {
    #[derive(Debug)]
    struct Bare;

    impl Buildable for Bare {
        fn members(_members: &mut Members<Self>) {}
    }

    let err = Builder::<Bare>::create(()).unwrap_err();
    assert!(err.to_string().contains("Bare"));
}
