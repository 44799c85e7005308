//! Builder for a single required value.

use crate::build::{Build, BuildError};
use crate::deferred::Deferred;
use crate::maybe::{Always, Maybe, Stage};

/// A builder for one value of type `T`.
///
/// Starts empty (or seeded, via [`of`](Self::of)/[`of_builder`](Self::of_builder));
/// each `set` replaces whatever was staged before. Building while empty is the
/// one failure this crate defines, [`BuildError::Incomplete`]: an aggregate
/// can reasonably be empty, a single required value cannot.
#[derive(Debug)]
pub struct ValueBuilder<T> {
    value: Option<Deferred<T>>,
}

impl<T> ValueBuilder<T> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self { value: None }
    }

    /// Create a builder already set to `value`.
    pub fn of(value: T) -> Self {
        Self {
            value: Some(Deferred::of(value)),
        }
    }

    /// Create a builder already set to a child builder for the value. The
    /// child is not invoked here; it is invoked once per `build` call.
    pub fn of_builder<B>(builder: B) -> Self
    where
        B: Build<Output = T> + 'static,
    {
        Self {
            value: Some(Deferred::builder(builder)),
        }
    }

    /// Whether a value or child builder has been staged.
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Invoke `f` on this builder and return it, for arbitrary imperative
    /// configuration mid-chain.
    pub fn apply(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }

    /// Apply a chain of calls to a builder held behind a mutable reference,
    /// e.g. inside an `Rc<RefCell<_>>` shared with a parent builder.
    pub fn update(&mut self, f: impl FnOnce(Self) -> Self) {
        let builder = std::mem::take(self);
        *self = f(builder);
    }

    /// Open a conditional level: mutations on the returned chain apply iff
    /// `yes` is true. See the [`maybe`](crate::maybe) module.
    pub fn maybe(self, yes: bool) -> Maybe<Self> {
        if yes { Maybe::open(self) } else { Maybe::shut(self) }
    }

    /// Open a conditional level gated by a predicate, evaluated once per
    /// mutating call.
    pub fn maybe_when(self, predicate: impl FnMut() -> bool + 'static) -> Maybe<Self> {
        Maybe::when(self, predicate)
    }

    /// The root builder has no conditional level to close; returns itself.
    pub fn end_maybe(self) -> Self {
        self
    }
}

impl<T> Default for ValueBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stage for ValueBuilder<T> {
    type Staged = Deferred<T>;

    fn stage(&mut self, value: Deferred<T>) {
        self.value = Some(value);
    }
}

impl<T> Always for ValueBuilder<T> {
    type Root = Self;

    fn always(self) -> Self {
        self
    }
}

impl<T: Clone> Build for ValueBuilder<T> {
    type Output = T;

    fn build(&self) -> Result<T, BuildError> {
        match &self.value {
            Some(value) => value.resolve(),
            None => Err(BuildError::Incomplete),
        }
    }
}

/// Fluent mutations of a [`ValueBuilder`], available on the builder itself
/// and on any conditional layer over it.
pub trait SetValue<T>: Stage<Staged = Deferred<T>> + Sized {
    /// Stage `value`; `build` will return it as-is.
    fn set(mut self, value: T) -> Self {
        self.stage(Deferred::of(value));
        self
    }

    /// Stage a child builder for the value, invoked once per `build` call.
    fn set_builder<B>(mut self, builder: B) -> Self
    where
        B: Build<Output = T> + 'static,
    {
        self.stage(Deferred::builder(builder));
        self
    }

    /// Stage `value` iff `set` is true.
    fn maybe_set(self, value: T, set: bool) -> Self {
        if set { self.set(value) } else { self }
    }

    /// Stage a child builder iff `set` is true.
    fn maybe_set_builder<B>(self, builder: B, set: bool) -> Self
    where
        B: Build<Output = T> + 'static,
    {
        if set { self.set_builder(builder) } else { self }
    }
}

impl<T> SetValue<T> for ValueBuilder<T> {}
impl<T, B: SetValue<T>> SetValue<T> for Maybe<B> {}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_build_unset_is_incomplete() {
        let builder = ValueBuilder::<i32>::new();
        assert!(matches!(builder.build(), Err(BuildError::Incomplete)));
    }

    #[test]
    fn test_set_then_build() {
        let builder = ValueBuilder::new().set(42);
        assert_eq!(builder.build().expect("Failed to build"), 42);
    }

    #[test]
    fn test_last_set_wins() {
        let builder = ValueBuilder::of(1).set(2).set(3);
        assert_eq!(builder.build().expect("Failed to build"), 3);
    }

    #[test]
    fn test_explicit_none_is_a_value() {
        let builder = ValueBuilder::of(None::<i32>);
        assert_eq!(builder.build().expect("Failed to build"), None);
    }

    #[test]
    fn test_set_builder_invoked_per_build() {
        let count = Rc::new(Cell::new(0u32));
        let counter = count.clone();
        let builder = ValueBuilder::new().set_builder(crate::build::from_fn(move || {
            counter.set(counter.get() + 1);
            "x"
        }));

        builder.build().expect("Failed to build");
        builder.build().expect("Failed to build");
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_of_builder_tracks_child() {
        let builder = ValueBuilder::of_builder(ValueBuilder::of(5));
        assert_eq!(builder.build().expect("Failed to build"), 5);
    }

    #[test]
    fn test_unset_child_propagates_incomplete() {
        let builder = ValueBuilder::of_builder(ValueBuilder::<i32>::new());
        assert!(matches!(builder.build(), Err(BuildError::Incomplete)));
    }

    #[test]
    fn test_maybe_set() {
        let builder = ValueBuilder::new().maybe_set(1, false).maybe_set(2, true);
        assert_eq!(builder.build().expect("Failed to build"), 2);
    }

    #[test]
    fn test_apply_runs_callback() {
        let builder = ValueBuilder::new().apply(|b| b.update(|b| b.set(9)));
        assert_eq!(builder.build().expect("Failed to build"), 9);
    }

    #[test]
    fn test_maybe_false_discards_set() {
        let builder = ValueBuilder::of(1).maybe(false).set(9).always();
        assert_eq!(builder.build().expect("Failed to build"), 1);
    }

    #[test]
    fn test_maybe_true_passes_set_through() {
        let builder = ValueBuilder::of(1).maybe(true).set(9).always();
        assert_eq!(builder.build().expect("Failed to build"), 9);
    }

    #[test]
    fn test_is_set() {
        let builder = ValueBuilder::<i32>::new();
        assert!(!builder.is_set());
        assert!(builder.set(1).is_set());
    }
}
