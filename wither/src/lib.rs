#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use wither_core::*;

#[cfg(feature = "reflect")]
pub use wither_reflect::*;

#[cfg(feature = "reflect")]
mod ext;
#[cfg(feature = "reflect")]
pub use ext::WitherExt;

pub use static_assertions;

// Sequences and edits are shared across threads and cloned freely.
static_assertions::assert_impl_all!(Value: Send, Sync, Clone);
static_assertions::assert_impl_all!(Shape: Send, Sync);

#[cfg(feature = "reflect")]
mod assertions {
    use super::*;

    static_assertions::assert_impl_all!(WithError: Send, Sync, Clone, core::error::Error);
    static_assertions::assert_impl_all!(PendingEdits: Send, Sync, Clone);
    static_assertions::assert_impl_all!(Deferred: Send, Sync, Clone);
    static_assertions::assert_impl_all!(WithSequence<()>: Send, Sync, Clone, Default);
    static_assertions::assert_impl_all!(MutationSequence<'static, ()>: Send, Sync, Clone);
}
