use mold_testhelpers::test;

use mold::{Buildable, BuildError, Builder, MemberKind, Members};

#[derive(Debug, PartialEq)]
struct Duration {
    millis: u64,
}

#[derive(Debug)]
struct Negative;

impl core::fmt::Display for Negative {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "negative duration")
    }
}

impl core::error::Error for Negative {}

impl Duration {
    fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    fn from_secs(secs: u64) -> Self {
        Self {
            millis: secs * 1000,
        }
    }

    fn try_from_signed(millis: i64) -> Result<Self, Negative> {
        if millis < 0 {
            return Err(Negative);
        }
        Ok(Self {
            millis: millis as u64,
        })
    }
}

impl Buildable for Duration {
    fn members(members: &mut Members<Self>) {
        members.factory("from_millis", Duration::from_millis);
        members.factory("from_secs", Duration::from_secs);
        members.try_factory("try_from_signed", Duration::try_from_signed);
    }
}

#[test]
fn factory_by_name_and_signature() {
    let d = Builder::<Duration>::from_factory("from_secs", (2u64,))?.build();
    assert_eq!(d, Duration { millis: 2000 });

    let d = Builder::<Duration>::from_factory("from_millis", (250u64,))?.build();
    assert_eq!(d, Duration { millis: 250 });
}

#[test]
fn unknown_factory_name() {
    let err = Builder::<Duration>::from_factory("from_days", (1u64,)).unwrap_err();
    assert!(matches!(
        err,
        BuildError::NoSuchMember {
            kind: MemberKind::Factory,
            name_exists: false,
            ..
        }
    ));
}

#[test]
fn known_name_wrong_signature() {
    // name resolves, signature does not: u32 is not u64
    let err = Builder::<Duration>::from_factory("from_secs", (2u32,)).unwrap_err();
    assert!(matches!(
        err,
        BuildError::NoSuchMember {
            kind: MemberKind::Factory,
            name_exists: true,
            ..
        }
    ));
}

#[test]
fn fallible_factory_error_is_wrapped() {
    let err = Builder::<Duration>::from_factory("try_from_signed", (-1i64,)).unwrap_err();
    assert!(matches!(
        err,
        BuildError::MemberFailed {
            kind: MemberKind::Factory,
            ..
        }
    ));
}

#[test]
fn fallible_factory_ok() {
    let d = Builder::<Duration>::from_factory("try_from_signed", (10i64,))?.build();
    assert_eq!(d, Duration { millis: 10 });
}
