use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId, type_name};

use crate::{ArgList, ArgValue, Arguments, Buildable, FieldFlags, MemberError, Signature};

/// An erased constructor or factory body
pub type ErasedConstruct<T> = Box<dyn Fn(Arguments) -> Result<T, MemberError>>;

/// An erased instance-method body
pub type ErasedMethod<T> = Box<dyn Fn(&mut T, Arguments) -> Result<(), MemberError>>;

/// A callable that produces a `T` from typed arguments.
///
/// Implemented for `Fn` items and closures of up to six arguments returning
/// `T`. The argument types form the constructor's signature.
pub trait Construct<T, A>: 'static {
    /// The signature formed by the callable's argument types
    fn signature(&self) -> Signature;

    /// Erases the callable into a uniform entry body
    fn erase(self) -> ErasedConstruct<T>;
}

/// Fallible counterpart of [`Construct`]: the callable returns
/// `Result<T, E>` and an `Err` is reported as [`MemberError::Invocation`].
pub trait TryConstruct<T, A, E>: 'static {
    /// The signature formed by the callable's argument types
    fn signature(&self) -> Signature;

    /// Erases the callable into a uniform entry body
    fn erase(self) -> ErasedConstruct<T>;
}

/// A callable invoked on `&mut T` with typed arguments.
///
/// Any return value is discarded on invocation, matching the fluent
/// contract: methods mutate the instance, the builder carries it forward.
pub trait InstanceMethod<T, A, R>: 'static {
    /// The signature formed by the callable's argument types (the receiver
    /// excluded)
    fn signature(&self) -> Signature;

    /// Erases the callable into a uniform entry body
    fn erase(self) -> ErasedMethod<T>;
}

/// Fallible counterpart of [`InstanceMethod`].
pub trait TryInstanceMethod<T, A, R, E>: 'static {
    /// The signature formed by the callable's argument types (the receiver
    /// excluded)
    fn signature(&self) -> Signature;

    /// Erases the callable into a uniform entry body
    fn erase(self) -> ErasedMethod<T>;
}

macro_rules! impl_callables {
    ($( ( $($A:ident),* ) )+) => {
        $(
            impl<T, F, $($A: Any),*> Construct<T, ($($A,)*)> for F
            where
                F: Fn($($A),*) -> T + 'static,
                T: 'static,
            {
                fn signature(&self) -> Signature {
                    <($($A,)*) as ArgList>::signature()
                }

                #[allow(non_snake_case)]
                fn erase(self) -> ErasedConstruct<T> {
                    Box::new(move |args| {
                        let ($($A,)*) = <($($A,)*) as ArgList>::from_arguments(args)?;
                        Ok((self)($($A),*))
                    })
                }
            }

            impl<T, F, E, $($A: Any),*> TryConstruct<T, ($($A,)*), E> for F
            where
                F: Fn($($A),*) -> Result<T, E> + 'static,
                E: core::error::Error + Send + Sync + 'static,
                T: 'static,
            {
                fn signature(&self) -> Signature {
                    <($($A,)*) as ArgList>::signature()
                }

                #[allow(non_snake_case)]
                fn erase(self) -> ErasedConstruct<T> {
                    Box::new(move |args| {
                        let ($($A,)*) = <($($A,)*) as ArgList>::from_arguments(args)?;
                        (self)($($A),*).map_err(|e| MemberError::Invocation {
                            source: Box::new(e),
                        })
                    })
                }
            }

            impl<T, F, R, $($A: Any),*> InstanceMethod<T, ($($A,)*), R> for F
            where
                F: Fn(&mut T, $($A),*) -> R + 'static,
                T: 'static,
            {
                fn signature(&self) -> Signature {
                    <($($A,)*) as ArgList>::signature()
                }

                #[allow(non_snake_case)]
                fn erase(self) -> ErasedMethod<T> {
                    Box::new(move |instance, args| {
                        let ($($A,)*) = <($($A,)*) as ArgList>::from_arguments(args)?;
                        // return value discarded
                        let _ = (self)(instance, $($A),*);
                        Ok(())
                    })
                }
            }

            impl<T, F, R, E, $($A: Any),*> TryInstanceMethod<T, ($($A,)*), R, E> for F
            where
                F: Fn(&mut T, $($A),*) -> Result<R, E> + 'static,
                E: core::error::Error + Send + Sync + 'static,
                T: 'static,
            {
                fn signature(&self) -> Signature {
                    <($($A,)*) as ArgList>::signature()
                }

                #[allow(non_snake_case)]
                fn erase(self) -> ErasedMethod<T> {
                    Box::new(move |instance, args| {
                        let ($($A,)*) = <($($A,)*) as ArgList>::from_arguments(args)?;
                        match (self)(instance, $($A),*) {
                            Ok(_) => Ok(()),
                            Err(e) => Err(MemberError::Invocation {
                                source: Box::new(e),
                            }),
                        }
                    })
                }
            }
        )+
    };
}

impl_callables! {
    ()
    (A0)
    (A0, A1)
    (A0, A1, A2)
    (A0, A1, A2, A3)
    (A0, A1, A2, A3, A4)
    (A0, A1, A2, A3, A4, A5)
}

/// A registered constructor: a signature plus the erased body.
pub struct ConstructorEntry<T: 'static> {
    signature: Signature,
    construct: ErasedConstruct<T>,
}

impl<T> ConstructorEntry<T> {
    /// The constructor's signature
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invokes the constructor with packed arguments
    pub fn invoke(&self, args: Arguments) -> Result<T, MemberError> {
        (self.construct)(args)
    }
}

/// A registered named factory.
pub struct FactoryEntry<T: 'static> {
    name: &'static str,
    signature: Signature,
    construct: ErasedConstruct<T>,
}

impl<T> FactoryEntry<T> {
    /// The factory's name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The factory's signature
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invokes the factory with packed arguments
    pub fn invoke(&self, args: Arguments) -> Result<T, MemberError> {
        (self.construct)(args)
    }
}

/// A registered named instance method.
pub struct MethodEntry<T: 'static> {
    name: &'static str,
    signature: Signature,
    call: ErasedMethod<T>,
}

impl<T> MethodEntry<T> {
    /// The method's name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The method's signature (receiver excluded)
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invokes the method on `instance` with packed arguments
    pub fn invoke(&self, instance: &mut T, args: Arguments) -> Result<(), MemberError> {
        (self.call)(instance, args)
    }
}

/// A registered field accessor: closure projection, no pointer arithmetic.
pub struct FieldEntry<T: 'static> {
    name: &'static str,
    type_id: TypeId,
    type_name: &'static str,
    flags: FieldFlags,
    read: Box<dyn for<'a> Fn(&'a T) -> &'a dyn Any>,
    write: Box<dyn Fn(&mut T, ArgValue) -> Result<(), MemberError>>,
}

impl<T> FieldEntry<T> {
    /// The field's name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The `TypeId` of the field's type
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The name of the field's type
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The field's flags
    pub fn flags(&self) -> FieldFlags {
        self.flags
    }

    /// Reads the field from `instance` as an erased reference
    pub fn read_from<'a>(&self, instance: &'a T) -> &'a dyn Any {
        (self.read)(instance)
    }

    /// Assigns `value` into the field on `instance`.
    ///
    /// Fails with [`MemberError::NotWritable`] for `NO_FALLBACK` fields and
    /// with [`MemberError::TypeMismatch`] unless the value's runtime type is
    /// exactly the field's type.
    pub fn write_into(&self, instance: &mut T, value: ArgValue) -> Result<(), MemberError> {
        if self.flags.contains(FieldFlags::NO_FALLBACK) {
            return Err(MemberError::NotWritable { field: self.name });
        }
        (self.write)(instance, value)
    }
}

/// The per-type member table: every constructor, factory, method, and field
/// reachable by name, as registered by [`Buildable::members`].
///
/// Lookup is strict: names match by equality, signatures by exact
/// `TypeId` sequence equality. Registering the same name and signature twice
/// is allowed; the first registration wins on lookup.
pub struct Members<T: 'static> {
    constructors: Vec<ConstructorEntry<T>>,
    factories: Vec<FactoryEntry<T>>,
    methods: Vec<MethodEntry<T>>,
    fields: Vec<FieldEntry<T>>,
}

impl<T: Buildable> Members<T> {
    /// Collects the member table for `T` by running its registration
    pub fn collect() -> Self {
        let mut members = Self {
            constructors: Vec::new(),
            factories: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        };
        T::members(&mut members);
        members
    }
}

impl<T: 'static> Members<T> {
    /// Registers a constructor
    pub fn constructor<A, F>(&mut self, f: F)
    where
        F: Construct<T, A>,
    {
        self.constructors.push(ConstructorEntry {
            signature: f.signature(),
            construct: f.erase(),
        });
    }

    /// Registers a fallible constructor
    pub fn try_constructor<A, E, F>(&mut self, f: F)
    where
        F: TryConstruct<T, A, E>,
    {
        self.constructors.push(ConstructorEntry {
            signature: f.signature(),
            construct: f.erase(),
        });
    }

    /// Registers a named factory
    pub fn factory<A, F>(&mut self, name: &'static str, f: F)
    where
        F: Construct<T, A>,
    {
        self.factories.push(FactoryEntry {
            name,
            signature: f.signature(),
            construct: f.erase(),
        });
    }

    /// Registers a fallible named factory
    pub fn try_factory<A, E, F>(&mut self, name: &'static str, f: F)
    where
        F: TryConstruct<T, A, E>,
    {
        self.factories.push(FactoryEntry {
            name,
            signature: f.signature(),
            construct: f.erase(),
        });
    }

    /// Registers a named instance method
    pub fn method<A, R, F>(&mut self, name: &'static str, f: F)
    where
        F: InstanceMethod<T, A, R>,
    {
        self.methods.push(MethodEntry {
            name,
            signature: f.signature(),
            call: f.erase(),
        });
    }

    /// Registers a fallible named instance method
    pub fn try_method<A, R, E, F>(&mut self, name: &'static str, f: F)
    where
        F: TryInstanceMethod<T, A, R, E>,
    {
        self.methods.push(MethodEntry {
            name,
            signature: f.signature(),
            call: f.erase(),
        });
    }

    /// Registers a field accessor
    pub fn field<F: Any>(
        &mut self,
        name: &'static str,
        read: fn(&T) -> &F,
        write: fn(&mut T) -> &mut F,
    ) {
        self.field_with_flags(name, read, write, FieldFlags::empty());
    }

    /// Registers a field accessor with flags
    pub fn field_with_flags<F: Any>(
        &mut self,
        name: &'static str,
        read: fn(&T) -> &F,
        write: fn(&mut T) -> &mut F,
        flags: FieldFlags,
    ) {
        self.fields.push(FieldEntry {
            name,
            type_id: TypeId::of::<F>(),
            type_name: type_name::<F>(),
            flags,
            read: Box::new(move |instance: &T| read(instance) as &dyn Any),
            write: Box::new(move |instance: &mut T, value: ArgValue| {
                *write(instance) = value.take::<F>()?;
                Ok(())
            }),
        });
    }

    /// Finds the first constructor whose signature matches the packed
    /// arguments exactly
    pub fn find_constructor(&self, args: &Arguments) -> Option<&ConstructorEntry<T>> {
        self.constructors
            .iter()
            .find(|entry| entry.signature.matches(args))
    }

    /// Finds the first factory matching both name and signature
    pub fn find_factory(&self, name: &str, args: &Arguments) -> Option<&FactoryEntry<T>> {
        self.factories
            .iter()
            .find(|entry| entry.name == name && entry.signature.matches(args))
    }

    /// Returns true if any factory is registered under `name`, regardless
    /// of signature
    pub fn has_factory_named(&self, name: &str) -> bool {
        self.factories.iter().any(|entry| entry.name == name)
    }

    /// Finds the first method matching both name and signature
    pub fn find_method(&self, name: &str, args: &Arguments) -> Option<&MethodEntry<T>> {
        self.methods
            .iter()
            .find(|entry| entry.name == name && entry.signature.matches(args))
    }

    /// Returns true if any method is registered under `name`, regardless of
    /// signature
    pub fn has_method_named(&self, name: &str) -> bool {
        self.methods.iter().any(|entry| entry.name == name)
    }

    /// Finds the field accessor registered under exactly `name`
    pub fn find_field(&self, name: &str) -> Option<&FieldEntry<T>> {
        self.fields.iter().find(|entry| entry.name == name)
    }

    /// The registered constructors, in registration order
    pub fn constructors(&self) -> &[ConstructorEntry<T>] {
        &self.constructors
    }

    /// The registered factories, in registration order
    pub fn factories(&self) -> &[FactoryEntry<T>] {
        &self.factories
    }

    /// The registered methods, in registration order
    pub fn methods(&self) -> &[MethodEntry<T>] {
        &self.methods
    }

    /// The registered field accessors, in registration order
    pub fn fields(&self) -> &[FieldEntry<T>] {
        &self.fields
    }
}

impl<T> core::fmt::Debug for Members<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Members")
            .field("constructors", &self.constructors.len())
            .field("factories", &self.factories.len())
            .field("methods", &self.methods.len())
            .field("fields", &self.fields.len())
            .finish()
    }
}
