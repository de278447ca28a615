use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};

use crate::MemberError;

/// One element of a [`Signature`]: a parameter type's identity plus its
/// name for diagnostics.
#[derive(Clone, Copy, Debug)]
pub struct SigElem {
    id: TypeId,
    name: &'static str,
}

impl SigElem {
    /// Returns the signature element for type `A`
    pub fn of<A: Any>() -> Self {
        Self {
            id: TypeId::of::<A>(),
            name: type_name::<A>(),
        }
    }

    /// The `TypeId` of the parameter type
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The name of the parameter type
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// An ordered list of parameter types.
///
/// Two signatures are equal iff they have the same length and every element
/// has the same `TypeId`, position for position. This is the exact-type
/// matching rule: a `u8` argument never matches a `u32` parameter, and
/// `Option<V>` is an ordinary type with its own identity.
#[derive(Clone, Debug)]
pub struct Signature {
    elems: Vec<SigElem>,
}

impl Signature {
    /// Builds a signature from its elements
    pub fn new(elems: Vec<SigElem>) -> Self {
        Self { elems }
    }

    /// The empty signature
    pub fn empty() -> Self {
        Self { elems: Vec::new() }
    }

    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.elems.len()
    }

    /// The signature's elements, in order
    pub fn elems(&self) -> &[SigElem] {
        &self.elems
    }

    /// Returns true if the packed arguments match this signature exactly
    pub fn matches(&self, args: &Arguments) -> bool {
        self.elems.len() == args.values.len()
            && self
                .elems
                .iter()
                .zip(args.values.iter())
                .all(|(elem, value)| elem.id == value.type_id)
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.elems.len() == other.elems.len()
            && self
                .elems
                .iter()
                .zip(other.elems.iter())
                .all(|(a, b)| a.id == b.id)
    }
}

impl Eq for Signature {}

impl core::fmt::Display for Signature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "(")?;
        for (index, elem) in self.elems.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", elem.name)?;
        }
        write!(f, ")")
    }
}

/// A single erased argument: its runtime type identity plus the boxed value.
pub struct ArgValue {
    type_id: TypeId,
    type_name: &'static str,
    value: Box<dyn Any>,
}

impl ArgValue {
    /// Packs a value, capturing its runtime type
    pub fn new<A: Any>(value: A) -> Self {
        Self {
            type_id: TypeId::of::<A>(),
            type_name: type_name::<A>(),
            value: Box::new(value),
        }
    }

    /// The `TypeId` of the packed value
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The name of the packed value's type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Unpacks the value as `A`.
    ///
    /// Fails with [`MemberError::TypeMismatch`] if the packed value is not
    /// exactly an `A`.
    pub fn take<A: Any>(self) -> Result<A, MemberError> {
        let actual = self.type_name;
        match self.value.downcast::<A>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(MemberError::TypeMismatch {
                expected: type_name::<A>(),
                actual,
            }),
        }
    }
}

impl core::fmt::Debug for ArgValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArgValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// An ordered, erased argument list, as packed at a call site.
#[derive(Debug)]
pub struct Arguments {
    values: Vec<ArgValue>,
}

impl Arguments {
    /// Packs a single value
    pub fn single<A: Any>(value: A) -> Self {
        Self {
            values: vec![ArgValue::new(value)],
        }
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no arguments
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The signature formed by the arguments' runtime types, in order
    pub fn signature(&self) -> Signature {
        Signature {
            elems: self
                .values
                .iter()
                .map(|value| SigElem {
                    id: value.type_id,
                    name: value.type_name,
                })
                .collect(),
        }
    }

    /// Consumes the list, yielding the packed values in order
    pub fn into_values(self) -> Vec<ArgValue> {
        self.values
    }

    /// Consumes the list, yielding its only value.
    ///
    /// Returns `None` unless the list holds exactly one value.
    pub fn into_single(self) -> Option<ArgValue> {
        let mut values = self.values;
        if values.len() == 1 { values.pop() } else { None }
    }
}

/// A call-site argument tuple.
///
/// Implemented for tuples of up to six `'static` values, `()` included.
/// Packing preserves order and captures each element's runtime type for
/// exact-signature member resolution.
pub trait ArgList: Sized {
    /// Number of arguments in the tuple
    fn arity() -> usize;

    /// The signature formed by the tuple's element types
    fn signature() -> Signature;

    /// Packs the tuple into an erased [`Arguments`] list
    fn into_arguments(self) -> Arguments;

    /// Unpacks an erased list back into the typed tuple.
    ///
    /// Fails if the arity or any element type differs.
    fn from_arguments(args: Arguments) -> Result<Self, MemberError>;
}

macro_rules! impl_arg_list_for_tuples {
    ($( ( $($A:ident),* ) )+) => {
        $(
            impl<$($A: Any),*> ArgList for ($($A,)*) {
                fn arity() -> usize {
                    0 $(+ { let _ = stringify!($A); 1 })*
                }

                fn signature() -> Signature {
                    Signature::new(vec![$(SigElem::of::<$A>()),*])
                }

                #[allow(non_snake_case)]
                fn into_arguments(self) -> Arguments {
                    let ($($A,)*) = self;
                    Arguments {
                        values: vec![$(ArgValue::new($A)),*],
                    }
                }

                #[allow(non_snake_case, unused_variables, unused_mut)]
                fn from_arguments(args: Arguments) -> Result<Self, MemberError> {
                    if args.len() != Self::arity() {
                        return Err(MemberError::ArityMismatch {
                            expected: Self::arity(),
                            provided: args.len(),
                        });
                    }
                    let mut values = args.into_values().into_iter();
                    Ok(($(
                        match values.next() {
                            Some(value) => value.take::<$A>()?,
                            None => {
                                return Err(MemberError::ArityMismatch {
                                    expected: Self::arity(),
                                    provided: 0,
                                });
                            }
                        },
                    )*))
                }
            }
        )+
    };
}

impl_arg_list_for_tuples! {
    ()
    (A0)
    (A0, A1)
    (A0, A1, A2)
    (A0, A1, A2, A3)
    (A0, A1, A2, A3, A4)
    (A0, A1, A2, A3, A4, A5)
}
