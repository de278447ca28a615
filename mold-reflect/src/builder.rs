use alloc::format;
use alloc::string::ToString;
use core::any::{Any, type_name};

use mold_core::{ArgList, Arguments, Buildable, MemberError, MemberKind, Members, Signature};

use crate::BuildError;

/// A fluent builder over a [`Buildable`] type's member table.
///
/// A `Builder` owns the member table and the single instance under
/// construction. The table is fixed at creation; the instance is created by
/// [`create`](Builder::create) or [`from_factory`](Builder::from_factory)
/// and mutated in place by every subsequent operation, never replaced.
/// [`build`](Builder::build) hands the instance over.
///
/// Chained operations consume and return the builder, so a whole
/// construction reads as one expression:
///
/// ```
/// use mold_core::{Buildable, Members, expose_fields};
/// use mold_reflect::Builder;
///
/// #[derive(Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Buildable for Point {
///     fn members(members: &mut Members<Self>) {
///         members.constructor(|x: i32, y: i32| Point { x, y });
///         expose_fields!(members, x, y);
///     }
/// }
///
/// # fn main() -> Result<(), mold_reflect::BuildError> {
/// let point = Builder::<Point>::create((1, 2))?.set("x", 5)?.build();
/// assert_eq!(point, Point { x: 5, y: 2 });
/// # Ok(())
/// # }
/// ```
pub struct Builder<T: Buildable> {
    members: Members<T>,
    instance: T,
}

impl<T: Buildable> core::fmt::Debug for Builder<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Builder").finish_non_exhaustive()
    }
}

impl<T: Buildable> Builder<T> {
    /// Constructs an instance through a registered constructor.
    ///
    /// The provided argument tuple's runtime types are matched against the
    /// registered constructor signatures, strictly and in order — no
    /// coercion, no widening. Fails with
    /// [`BuildError::NoMatchingConstructor`] when no signature matches, or
    /// with [`BuildError::MemberFailed`] when the matched constructor itself
    /// errors.
    pub fn create(args: impl ArgList) -> Result<Self, BuildError> {
        let members = Members::collect();
        let args = args.into_arguments();
        let instance = match members.find_constructor(&args) {
            Some(entry) => {
                trace!(
                    "resolved constructor {} for {}",
                    entry.signature(),
                    type_name::<T>()
                );
                entry.invoke(args).map_err(|source| BuildError::MemberFailed {
                    type_name: type_name::<T>(),
                    kind: MemberKind::Constructor,
                    name: "<constructor>".to_string(),
                    source,
                })?
            }
            None => {
                return Err(BuildError::NoMatchingConstructor {
                    type_name: type_name::<T>(),
                    provided: args.signature(),
                });
            }
        };
        Ok(Self { members, instance })
    }

    /// Constructs an instance through a registered named factory.
    ///
    /// Resolution requires both the name and the exact argument signature to
    /// match. The error distinguishes an unknown name from a known name with
    /// a differing signature.
    pub fn from_factory(name: &str, args: impl ArgList) -> Result<Self, BuildError> {
        let members = Members::collect();
        let args = args.into_arguments();
        let instance = match members.find_factory(name, &args) {
            Some(entry) => {
                trace!("resolved factory {} for {}", name, type_name::<T>());
                entry.invoke(args).map_err(|source| BuildError::MemberFailed {
                    type_name: type_name::<T>(),
                    kind: MemberKind::Factory,
                    name: name.to_string(),
                    source,
                })?
            }
            None => {
                return Err(BuildError::NoSuchMember {
                    type_name: type_name::<T>(),
                    kind: MemberKind::Factory,
                    name: name.to_string(),
                    name_exists: members.has_factory_named(name),
                    provided: args.signature(),
                });
            }
        };
        Ok(Self { members, instance })
    }

    /// Invokes a registered method on the owned instance, discarding any
    /// return value, and passes the builder along for chaining.
    pub fn invoke(mut self, name: &str, args: impl ArgList) -> Result<Self, BuildError> {
        self.invoke_mut(name, args)?;
        Ok(self)
    }

    /// Non-consuming form of [`invoke`](Builder::invoke), for callers that
    /// keep the builder across fallible steps.
    pub fn invoke_mut(
        &mut self,
        name: &str,
        args: impl ArgList,
    ) -> Result<&mut Self, BuildError> {
        let args = args.into_arguments();
        match self.members.find_method(name, &args) {
            Some(entry) => {
                trace!("invoking {} on {}", name, type_name::<T>());
                entry
                    .invoke(&mut self.instance, args)
                    .map_err(|source| BuildError::MemberFailed {
                        type_name: type_name::<T>(),
                        kind: MemberKind::Method,
                        name: name.to_string(),
                        source,
                    })?;
                Ok(self)
            }
            None => Err(BuildError::NoSuchMember {
                type_name: type_name::<T>(),
                kind: MemberKind::Method,
                name: name.to_string(),
                name_exists: self.members.has_method_named(name),
                provided: args.signature(),
            }),
        }
    }

    /// Sets a property, preferring a conventional setter.
    ///
    /// Attempts to resolve a method named `set_{property}` taking exactly
    /// the value's runtime type. When no such setter resolves, silently
    /// falls back to the field accessor registered under exactly
    /// `property`; only the fallback's failure surfaces. An error raised by
    /// a *resolved* setter during execution surfaces as
    /// [`BuildError::MemberFailed`] — ownership of the value has passed to
    /// the setter at that point, so no fallback is possible.
    pub fn set<V: Any>(mut self, property: &str, value: V) -> Result<Self, BuildError> {
        self.set_mut(property, value)?;
        Ok(self)
    }

    /// Non-consuming form of [`set`](Builder::set).
    pub fn set_mut<V: Any>(
        &mut self,
        property: &str,
        value: V,
    ) -> Result<&mut Self, BuildError> {
        let setter = format!("set_{property}");
        let args = Arguments::single(value);

        if let Some(entry) = self.members.find_method(&setter, &args) {
            trace!("set {}: resolved setter {}", property, setter);
            entry
                .invoke(&mut self.instance, args)
                .map_err(|source| BuildError::MemberFailed {
                    type_name: type_name::<T>(),
                    kind: MemberKind::Method,
                    name: setter,
                    source,
                })?;
            return Ok(self);
        }

        trace!("set {}: no setter {}, falling back to field", property, setter);
        let Some(field) = self.members.find_field(property) else {
            return Err(BuildError::NoSuchMember {
                type_name: type_name::<T>(),
                kind: MemberKind::Field,
                name: property.to_string(),
                name_exists: false,
                provided: args.signature(),
            });
        };
        let Some(value) = args.into_single() else {
            return Err(BuildError::MemberFailed {
                type_name: type_name::<T>(),
                kind: MemberKind::Field,
                name: property.to_string(),
                source: MemberError::ArityMismatch {
                    expected: 1,
                    provided: 0,
                },
            });
        };
        field
            .write_into(&mut self.instance, value)
            .map_err(|source| match source {
                MemberError::NotWritable { .. } => BuildError::FieldNotWritable {
                    type_name: type_name::<T>(),
                    field: property.to_string(),
                },
                MemberError::TypeMismatch { expected, actual } => BuildError::FieldTypeMismatch {
                    type_name: type_name::<T>(),
                    field: property.to_string(),
                    expected,
                    actual,
                },
                other => BuildError::MemberFailed {
                    type_name: type_name::<T>(),
                    kind: MemberKind::Field,
                    name: property.to_string(),
                    source: other,
                },
            })?;
        Ok(self)
    }

    /// Reads a registered field back as `F`.
    ///
    /// Fails unless a field accessor is registered under `field` and its
    /// type is exactly `F`.
    pub fn peek<F: Any>(&self, field: &str) -> Result<&F, BuildError> {
        let Some(entry) = self.members.find_field(field) else {
            return Err(BuildError::NoSuchMember {
                type_name: type_name::<T>(),
                kind: MemberKind::Field,
                name: field.to_string(),
                name_exists: false,
                provided: Signature::empty(),
            });
        };
        entry
            .read_from(&self.instance)
            .downcast_ref::<F>()
            .ok_or_else(|| BuildError::FieldTypeMismatch {
                type_name: type_name::<T>(),
                field: field.to_string(),
                expected: entry.type_name(),
                actual: type_name::<F>(),
            })
    }

    /// Borrows the instance under construction
    pub fn instance(&self) -> &T {
        &self.instance
    }

    /// Mutably borrows the instance under construction
    pub fn instance_mut(&mut self) -> &mut T {
        &mut self.instance
    }

    /// Terminal operation: hands the built instance over.
    pub fn build(self) -> T {
        trace!("built instance of {}", type_name::<T>());
        self.instance
    }
}
