#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![doc = include_str!("../README.md")]

#[cfg(feature = "alloc")]
extern crate alloc;

mod macros;

// Argument packing and signatures
mod args;
pub use args::*;

// The capability trait
mod buildable;
pub use buildable::*;

// Member tables: constructors, factories, methods, fields
mod members;
pub use members::*;

// Field flags
mod flags;
pub use flags::*;

// Member resolution errors
mod error;
pub use error::*;
