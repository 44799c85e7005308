//! The [`Build`] capability and its error type.
//!
//! A [`Build`] implementor produces a value on demand. Builders, wrapped
//! literals, and plain closures all satisfy it, which is what lets a builder
//! hold "a value" and "a recipe for a value" behind one seam.

use std::cell::RefCell;
use std::error::Error as StdError;
use std::rc::Rc;

/// Error produced while building.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The builder requires a value that was never staged.
    #[error("builder value has not been set")]
    Incomplete,
    /// A user-defined [`Build`] implementation failed.
    #[error("{0}")]
    Custom(Box<dyn StdError + Send + Sync>),
}

impl From<Box<dyn StdError + Send + Sync>> for BuildError {
    fn from(err: Box<dyn StdError + Send + Sync>) -> Self {
        Self::Custom(err)
    }
}

/// Produce a value of type [`Output`](Build::Output) on demand.
///
/// `build` may be called any number of times and is never memoized by the
/// callers in this crate: a parent builder re-invokes every staged `Build`
/// on each of its own `build` calls, so an impure implementation may yield a
/// different value each time.
pub trait Build {
    /// The type of value this capability produces.
    type Output;

    /// Build and return one value based on the current state of `self`.
    fn build(&self) -> Result<Self::Output, BuildError>;
}

impl<B: Build + ?Sized> Build for Box<B> {
    type Output = B::Output;

    fn build(&self) -> Result<Self::Output, BuildError> {
        (**self).build()
    }
}

/// A shared handle to a builder.
///
/// Staging an `Rc<RefCell<_>>` clone of a child builder lets the caller keep
/// the other clone and mutate the child between two `build` calls on the
/// parent; each parent `build` observes the child's state at that moment.
impl<B: Build> Build for Rc<RefCell<B>> {
    type Output = B::Output;

    fn build(&self) -> Result<Self::Output, BuildError> {
        self.borrow().build()
    }
}

/// A pure supplier that clones `value` on every `build`.
///
/// Created with [`of`].
pub struct OfValue<T> {
    value: T,
}

impl<T: Clone> Build for OfValue<T> {
    type Output = T;

    fn build(&self) -> Result<T, BuildError> {
        Ok(self.value.clone())
    }
}

/// Wrap a literal value as a [`Build`] that returns a clone of it each call.
pub fn of<T: Clone>(value: T) -> OfValue<T> {
    OfValue { value }
}

/// A supplier backed by a closure.
///
/// Created with [`from_fn`].
pub struct FromFn<F> {
    f: F,
}

impl<T, F: Fn() -> T> Build for FromFn<F> {
    type Output = T;

    fn build(&self) -> Result<T, BuildError> {
        Ok((self.f)())
    }
}

/// Lift a closure into a [`Build`] that invokes it on every call.
pub fn from_fn<T, F: Fn() -> T>(f: F) -> FromFn<F> {
    FromFn { f }
}
