/// Registers plain field accessors for the named fields of the surrounding
/// type.
///
/// Expands to one [`field`](crate::Members::field) registration per name,
/// using the field's identifier as its registered name.
///
/// ```
/// use mold_core::{Buildable, Members, expose_fields};
///
/// struct Size {
///     width: u32,
///     height: u32,
/// }
///
/// impl Buildable for Size {
///     fn members(members: &mut Members<Self>) {
///         members.constructor(|| Size { width: 0, height: 0 });
///         expose_fields!(members, width, height);
///     }
/// }
/// ```
#[macro_export]
macro_rules! expose_fields {
    ($members:expr, $($field:ident),+ $(,)?) => {
        $(
            $members.field(
                stringify!($field),
                |instance| &instance.$field,
                |instance| &mut instance.$field,
            );
        )+
    };
}
