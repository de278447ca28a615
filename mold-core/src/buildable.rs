use crate::Members;

/// The capability trait: a type that can be driven by a
/// [`Builder`](https://docs.rs/mold-reflect) through named members.
///
/// Implementations register every constructor, factory, method, and field
/// that should be reachable by name. Nothing is discovered implicitly: a
/// member that is not registered does not exist as far as resolution is
/// concerned, which makes the reachable surface explicit and auditable.
///
/// ```
/// use mold_core::{Buildable, Members, expose_fields};
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Point {
///     fn new(x: i32, y: i32) -> Self {
///         Self { x, y }
///     }
///
///     fn set_x(&mut self, x: i32) {
///         self.x = x;
///     }
/// }
///
/// impl Buildable for Point {
///     fn members(members: &mut Members<Self>) {
///         members.constructor(Point::new);
///         members.method("set_x", Point::set_x);
///         expose_fields!(members, x, y);
///     }
/// }
/// ```
pub trait Buildable: Sized + 'static {
    /// Registers the type's reachable members into `members`
    fn members(members: &mut Members<Self>);
}
