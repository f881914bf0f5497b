//! Type system utilities and aliases.
//!
//! ## Modules
//!
//! - [`aliases`]: Type aliases for shared read-only state and boxed iterators.

pub mod aliases;

pub use aliases::*;
