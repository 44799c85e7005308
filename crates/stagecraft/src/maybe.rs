//! Conditional chains: forward or discard mutations based on a condition.
//!
//! `maybe(condition)` wraps a builder in a [`Maybe`] decorator. While the
//! decorator's gate is open, every mutating call passes through to the
//! wrapped builder; while it is shut, every mutating call is a designed
//! no-op. Nested `maybe` calls AND together: once one level of the chain is
//! shut, every deeper level is shut regardless of its own condition, and the
//! deeper conditions are not even evaluated.
//!
//! One generic decorator serves all builder kinds; it forwards through the
//! [`Stage`] primitive, so each kind's fluent surface works unchanged at any
//! nesting depth.

use crate::build::{Build, BuildError};

/// The one mutation primitive of a builder: append an item to its staged
/// state. Everything a fluent method does funnels through here, which is
/// the single point [`Maybe`] has to gate.
pub trait Stage {
    /// What this builder stages: a deferred value, a deferred entry, etc.
    type Staged;

    /// Record one staged item.
    fn stage(&mut self, item: Self::Staged);
}

/// Recover the root, unconditioned builder from any nesting depth.
pub trait Always {
    /// The type of the root builder that owns the real staged state.
    type Root;

    /// Unwrap every conditional layer and return the root builder.
    fn always(self) -> Self::Root;
}

enum Gate {
    /// Mutations pass through.
    Open,
    /// Mutations are discarded.
    Shut,
    /// The predicate decides, evaluated once per forwarded mutation.
    When(Box<dyn FnMut() -> bool>),
}

/// A conditional layer over a builder, created by `maybe`/`maybe_when`.
///
/// Owns its parent builder; `end_maybe` gives the parent back by move, and
/// [`Always::always`] unwraps all the way to the root. Building through a
/// `Maybe` delegates to the root regardless of the gate, since a shut layer
/// holds no buildable state of its own.
pub struct Maybe<B> {
    inner: B,
    gate: Gate,
}

impl<B> Maybe<B> {
    pub(crate) fn open(inner: B) -> Self {
        Self {
            inner,
            gate: Gate::Open,
        }
    }

    pub(crate) fn shut(inner: B) -> Self {
        Self {
            inner,
            gate: Gate::Shut,
        }
    }

    pub(crate) fn when(inner: B, predicate: impl FnMut() -> bool + 'static) -> Self {
        Self {
            inner,
            gate: Gate::When(Box::new(predicate)),
        }
    }

    fn gate_open(&mut self) -> bool {
        match &mut self.gate {
            Gate::Open => true,
            Gate::Shut => false,
            Gate::When(predicate) => predicate(),
        }
    }

    /// Open one more conditional level.
    ///
    /// The new level is open iff `yes` is true AND this level is open; when
    /// `yes` is false this level's own predicate is not consulted, and a shut
    /// level never evaluates anything.
    pub fn maybe(mut self, yes: bool) -> Maybe<Maybe<B>> {
        if yes && self.gate_open() {
            Maybe::open(self)
        } else {
            Maybe::shut(self)
        }
    }

    /// Open one more conditional level gated by a predicate.
    ///
    /// While this level is open, the predicate is evaluated once per mutating
    /// call on the new level. If this level is already shut, the predicate is
    /// never evaluated and the new level is shut outright.
    pub fn maybe_when(mut self, predicate: impl FnMut() -> bool + 'static) -> Maybe<Maybe<B>> {
        if self.gate_open() {
            Maybe::when(self, predicate)
        } else {
            Maybe::shut(self)
        }
    }

    /// Close this conditional level and return its parent. The parent keeps
    /// its own gate, so ending an inner level of a shut chain resumes a shut
    /// level, not the root.
    pub fn end_maybe(self) -> B {
        self.inner
    }

    /// Invoke `f` on this layer and return it, for arbitrary imperative
    /// configuration mid-chain.
    ///
    /// The callback is invoked even while the gate is shut: the layer's
    /// mutating methods are already no-ops then, so inside the builder the
    /// two behaviors are indistinguishable, and invoking uniformly keeps
    /// side effects outside the builder predictable.
    pub fn apply(mut self, f: impl FnOnce(&mut Self)) -> Self {
        f(&mut self);
        self
    }
}

impl<B: Stage> Stage for Maybe<B> {
    type Staged = B::Staged;

    fn stage(&mut self, item: Self::Staged) {
        if self.gate_open() {
            self.inner.stage(item);
        }
    }
}

impl<B: Always> Always for Maybe<B> {
    type Root = B::Root;

    fn always(self) -> Self::Root {
        self.inner.always()
    }
}

impl<B: Build> Build for Maybe<B> {
    type Output = B::Output;

    fn build(&self) -> Result<Self::Output, BuildError> {
        self.inner.build()
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_shut_gate_discards_mutations() {
        let list = ListBuilder::new()
            .add(1)
            .maybe(false)
            .add(99)
            .always()
            .add(2);
        assert_eq!(list.build().expect("Failed to build"), vec![1, 2]);
    }

    #[test]
    fn test_open_gate_passes_mutations_through() {
        let list = ListBuilder::new().maybe(true).add(1).add(2).always();
        assert_eq!(list.build().expect("Failed to build"), vec![1, 2]);
    }

    #[test]
    fn test_nested_maybe_is_an_and() {
        // maybe(false).maybe(true) behaves exactly like maybe(false).
        let list = ListBuilder::new()
            .add(1)
            .maybe(false)
            .maybe(true)
            .add(99)
            .always();
        assert_eq!(list.build().expect("Failed to build"), vec![1]);
    }

    #[test]
    fn test_end_maybe_resumes_parent_level() {
        // Ending the inner (true) level resumes the outer (false) level, so
        // the trailing add is still discarded.
        let list = ListBuilder::new()
            .maybe(false)
            .maybe(true)
            .add(98)
            .end_maybe()
            .add(99)
            .end_maybe()
            .add(1);
        assert_eq!(list.build().expect("Failed to build"), vec![1]);
    }

    #[test]
    fn test_always_unwraps_every_level() {
        let list = ListBuilder::new()
            .maybe(false)
            .maybe(true)
            .maybe(false)
            .always()
            .add(1);
        assert_eq!(list.build().expect("Failed to build"), vec![1]);
    }

    #[test]
    fn test_build_through_shut_layer_delegates_to_root() {
        let wrapped = ListBuilder::new().add(1).add(2).maybe(false).add(99);
        assert_eq!(wrapped.build().expect("Failed to build"), vec![1, 2]);
    }

    #[test]
    fn test_predicate_evaluated_once_per_mutation() {
        let calls = Rc::new(Cell::new(0u32));
        let counter = calls.clone();
        let list = ListBuilder::new()
            .maybe_when(move || {
                counter.set(counter.get() + 1);
                counter.get() % 2 == 1
            })
            .add(1)
            .add(2)
            .add(3)
            .always();

        // Odd-numbered evaluations let the mutation through.
        assert_eq!(calls.get(), 3);
        assert_eq!(list.build().expect("Failed to build"), vec![1, 3]);
    }

    #[test]
    fn test_predicate_skipped_below_shut_level() {
        let evaluated = Rc::new(Cell::new(false));
        let flag = evaluated.clone();
        let list = ListBuilder::new()
            .maybe(false)
            .maybe_when(move || {
                flag.set(true);
                true
            })
            .add(99)
            .always();

        assert!(!evaluated.get());
        assert_eq!(list.build().expect("Failed to build"), Vec::<i32>::new());
    }

    #[test]
    fn test_predicate_not_consulted_when_nested_condition_false() {
        let evaluated = Rc::new(Cell::new(false));
        let flag = evaluated.clone();
        let list = ListBuilder::new()
            .maybe_when(move || {
                flag.set(true);
                true
            })
            .maybe(false)
            .add(99)
            .always();

        assert!(!evaluated.get());
        assert_eq!(list.build().expect("Failed to build"), Vec::<i32>::new());
    }

    #[test]
    fn test_apply_invoked_while_shut() {
        let invoked = Rc::new(Cell::new(false));
        let flag = invoked.clone();
        let list = ListBuilder::new()
            .add(1)
            .maybe(false)
            .apply(move |wrapped| {
                flag.set(true);
                wrapped.stage(Deferred::of(99));
            })
            .always();

        assert!(invoked.get());
        assert_eq!(list.build().expect("Failed to build"), vec![1]);
    }
}
