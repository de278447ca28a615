use alloc::string::String;
use mold_core::{MemberError, MemberKind, Signature};
use owo_colors::OwoColorize;

/// Errors that can occur while building an instance.
///
/// Every member-resolution, type-matching, and invocation failure is wrapped
/// into this one kind at the [`Builder`](crate::Builder) boundary, with the
/// target type and member context attached.
#[derive(Debug)]
#[non_exhaustive]
pub enum BuildError {
    /// No registered constructor matches the provided argument types
    NoMatchingConstructor {
        /// The type being built
        type_name: &'static str,
        /// The signature formed by the provided arguments
        provided: Signature,
    },

    /// A named member could not be resolved
    NoSuchMember {
        /// The type being built
        type_name: &'static str,
        /// The kind of member that was looked up
        kind: MemberKind,
        /// The name that was looked up
        name: String,
        /// The signature formed by the provided arguments
        provided: Signature,
        /// True if the name is registered but no signature matched
        name_exists: bool,
    },

    /// A resolved member failed during invocation
    MemberFailed {
        /// The type being built
        type_name: &'static str,
        /// The kind of member that failed
        kind: MemberKind,
        /// The member's name
        name: String,
        /// The underlying failure
        source: MemberError,
    },

    /// The `set` fallback found the field, but the value's runtime type is
    /// not exactly the field's type
    FieldTypeMismatch {
        /// The type being built
        type_name: &'static str,
        /// The field's name
        field: String,
        /// The field's type
        expected: &'static str,
        /// The provided value's type
        actual: &'static str,
    },

    /// The `set` fallback found the field, but it refuses direct mutation
    FieldNotWritable {
        /// The type being built
        type_name: &'static str,
        /// The field's name
        field: String,
    },
}

impl core::fmt::Display for BuildError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BuildError::NoMatchingConstructor {
                type_name,
                provided,
            } => {
                write!(
                    f,
                    "No constructor on {} matches {}",
                    type_name.blue(),
                    provided.red()
                )
            }
            BuildError::NoSuchMember {
                type_name,
                kind,
                name,
                provided,
                name_exists,
            } => {
                if *name_exists {
                    write!(
                        f,
                        "{} {} on {} exists, but not with signature {}",
                        kind,
                        name.cyan(),
                        type_name.blue(),
                        provided.red()
                    )
                } else {
                    write!(
                        f,
                        "No {} named {} on {}",
                        kind,
                        name.cyan(),
                        type_name.blue()
                    )
                }
            }
            BuildError::MemberFailed {
                type_name,
                kind,
                name,
                source,
            } => {
                write!(
                    f,
                    "{} {} on {} failed: {}",
                    kind,
                    name.cyan(),
                    type_name.blue(),
                    source.red()
                )
            }
            BuildError::FieldTypeMismatch {
                type_name,
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Field {} on {} has type {}, but a {} was provided",
                    field.cyan(),
                    type_name.blue(),
                    expected.green(),
                    actual.red()
                )
            }
            BuildError::FieldNotWritable { type_name, field } => {
                write!(
                    f,
                    "Field {} on {} does not permit direct mutation",
                    field.cyan(),
                    type_name.blue()
                )
            }
        }
    }
}

impl core::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            BuildError::MemberFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}
