//! Composable, chainable builders for single values, lists, and maps.
//!
//! Values are staged lazily, either as literals or as child builders that are
//! only invoked when the parent builds, and any run of mutating calls can be
//! toggled on or off mid-chain with `maybe`:
//!
//! ```
//! use stagecraft::prelude::*;
//!
//! let list = ListBuilder::new()
//!     .add(1)
//!     .add(7)
//!     .maybe(false)
//!     .add(99)
//!     .add(100)
//!     .always()
//!     .add(4)
//!     .build()?;
//! assert_eq!(list, vec![1, 7, 4]);
//! # Ok::<(), stagecraft::BuildError>(())
//! ```
//!
//! Nested `maybe` calls AND together, `end_maybe` closes the innermost
//! conditional level, and `always` jumps back to the unconditioned root from
//! any depth. Building is non-destructive: each `build` re-resolves every
//! staged value and returns a fresh collection.

/// The `Build` capability, its error type, and supplier adapters.
pub mod build;

/// Deferred values staged inside builders.
pub mod deferred;

/// Builder for an ordered list of values.
pub mod list;

/// Builder for an insertion-ordered key-value mapping.
pub mod map;

/// The conditional (`maybe`) chain mechanism.
pub mod maybe;

/// Builder for a single required value.
pub mod value;

pub use build::{Build, BuildError};
pub use deferred::Deferred;
pub use list::{AddElement, ListBuilder};
pub use map::{Map, MapBuilder, MapEntry, PutEntry};
pub use maybe::{Always, Maybe, Stage};
pub use value::{SetValue, ValueBuilder};

/// One-stop imports for fluent chains: the builder types plus the op traits
/// they and their conditional layers implement.
pub mod prelude {
    pub use crate::build::{Build, BuildError};
    pub use crate::deferred::Deferred;
    pub use crate::list::{AddElement, ListBuilder};
    pub use crate::map::{Map, MapBuilder, MapEntry, PutEntry};
    pub use crate::maybe::{Always, Maybe, Stage};
    pub use crate::value::{SetValue, ValueBuilder};
}
