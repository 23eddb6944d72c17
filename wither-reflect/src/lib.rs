#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

#[cfg(feature = "log")]
pub(crate) use log::{debug, trace};

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}

#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($tt:tt)*) => {};
}

#[cfg(not(feature = "log"))]
pub(crate) use {debug, trace};

mod error;
pub use error::*;

// Reading from an existing instance
mod peek;
pub use peek::*;

// Building a new instance
mod partial;
pub use partial::*;

mod edits;
pub use edits::*;

// Constructor-only, property-only and mixed rebuilding
mod strategy;

// Persistent, lazily resolved chains of edits
mod sequence;
pub use sequence::*;
