//! Deferred values: the unit every builder stages internally.

use std::fmt;

use crate::build::{Build, BuildError};

/// A value that has been staged but not yet resolved.
///
/// Either a literal, returned as-is (cloned) on every resolution, or a boxed
/// [`Build`] whose `build` is re-invoked on every resolution. Resolution is
/// never memoized.
pub enum Deferred<T> {
    /// A literal value, staged directly.
    Value(T),
    /// A not-yet-invoked builder for the value.
    Builder(Box<dyn Build<Output = T>>),
}

impl<T> Deferred<T> {
    /// Stage a literal value.
    pub fn of(value: T) -> Self {
        Self::Value(value)
    }

    /// Stage a builder for the value. The builder is not invoked here; it is
    /// invoked once per [`resolve`](Self::resolve) call.
    pub fn builder<B>(builder: B) -> Self
    where
        B: Build<Output = T> + 'static,
    {
        Self::Builder(Box::new(builder))
    }
}

impl<T: Clone> Deferred<T> {
    /// Resolve to a concrete value, cloning a literal or invoking a staged
    /// builder. A builder failure propagates unmodified.
    pub fn resolve(&self) -> Result<T, BuildError> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::Builder(builder) => builder.build(),
        }
    }
}

impl<T> From<T> for Deferred<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Builder(_) => f.debug_tuple("Builder").field(&"..").finish(),
        }
    }
}
