use alloc::boxed::Box;

/// The kinds of member a [`Members`](crate::Members) table can hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A constructor, resolved by signature alone
    Constructor,
    /// A named static factory
    Factory,
    /// A named instance method
    Method,
    /// A registered field accessor
    Field,
}

impl core::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            MemberKind::Constructor => "constructor",
            MemberKind::Factory => "factory",
            MemberKind::Method => "method",
            MemberKind::Field => "field",
        };
        f.pad(s)
    }
}

/// Errors that can occur when resolving or invoking a registered member.
///
/// These are low-level errors: `mold-reflect` wraps them with the target
/// type and member context before surfacing them.
#[derive(Debug)]
#[non_exhaustive]
pub enum MemberError {
    /// The number of supplied arguments does not match the member's arity
    ArityMismatch {
        /// Arity of the resolved member
        expected: usize,
        /// Number of arguments supplied
        provided: usize,
    },

    /// An argument's runtime type does not match the parameter type exactly.
    ///
    /// Matching is exact `TypeId` equality: no coercion, no widening.
    TypeMismatch {
        /// Name of the expected parameter type
        expected: &'static str,
        /// Name of the type that was supplied
        actual: &'static str,
    },

    /// The invoked target itself raised an error during execution
    Invocation {
        /// The error raised by the target
        source: Box<dyn core::error::Error + Send + Sync>,
    },

    /// The field is registered but opted out of direct mutation
    NotWritable {
        /// Name of the field
        field: &'static str,
    },
}

impl core::fmt::Display for MemberError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MemberError::ArityMismatch { expected, provided } => {
                write!(
                    f,
                    "Expected {expected} argument(s), but {provided} were provided"
                )
            }
            MemberError::TypeMismatch { expected, actual } => {
                write!(f, "Expected a value of type {expected}, but got {actual}")
            }
            MemberError::Invocation { source } => {
                write!(f, "The invoked target raised an error: {source}")
            }
            MemberError::NotWritable { field } => {
                write!(f, "Field '{field}' does not permit direct mutation")
            }
        }
    }
}

impl core::error::Error for MemberError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            MemberError::Invocation { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}
