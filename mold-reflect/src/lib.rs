#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![doc = include_str!("../README.md")]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "log")]
macro_rules! trace {
    ($($tt:tt)*) => { log::trace!($($tt)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}

mod error;
pub use error::*;

mod builder;
pub use builder::*;
