//! Builder for an ordered list of values.

use crate::build::{Build, BuildError};
use crate::deferred::Deferred;
use crate::maybe::{Always, Maybe, Stage};

/// A builder for a `Vec<T>`.
///
/// Append-only: elements are staged in call order and resolved in that same
/// order by `build`, which returns a fresh `Vec` each time. Duplicates are
/// fine, and with `T = Option<_>` so are explicitly absent entries. An empty
/// builder builds an empty list.
#[derive(Debug)]
pub struct ListBuilder<T> {
    elements: Vec<Deferred<T>>,
}

impl<T> ListBuilder<T> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    /// Number of staged elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether nothing has been staged yet.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
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

impl<T> Default for ListBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stage for ListBuilder<T> {
    type Staged = Deferred<T>;

    fn stage(&mut self, element: Deferred<T>) {
        self.elements.push(element);
    }
}

impl<T> Always for ListBuilder<T> {
    type Root = Self;

    fn always(self) -> Self {
        self
    }
}

impl<T: Clone> Build for ListBuilder<T> {
    type Output = Vec<T>;

    /// Resolve every staged element exactly once, left to right, into a fresh
    /// `Vec`. The first failing element aborts the build.
    fn build(&self) -> Result<Vec<T>, BuildError> {
        self.elements.iter().map(Deferred::resolve).collect()
    }
}

/// Fluent mutations of a [`ListBuilder`], available on the builder itself
/// and on any conditional layer over it.
pub trait AddElement<T>: Stage<Staged = Deferred<T>> + Sized {
    /// Append one element.
    fn add(mut self, element: T) -> Self {
        self.stage(Deferred::of(element));
        self
    }

    /// Append a child builder for the next element, invoked once per `build`
    /// call on this list.
    fn add_builder<B>(mut self, builder: B) -> Self
    where
        B: Build<Output = T> + 'static,
    {
        self.stage(Deferred::builder(builder));
        self
    }

    /// Append every element yielded by `elements`, in iteration order.
    fn add_all<I>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        for element in elements {
            self.stage(Deferred::of(element));
        }
        self
    }

    /// Append every builder yielded by `builders`, in iteration order, each
    /// as a child builder for one element.
    fn add_builders<I>(mut self, builders: I) -> Self
    where
        I: IntoIterator,
        I::Item: Build<Output = T> + 'static,
    {
        for builder in builders {
            self.stage(Deferred::builder(builder));
        }
        self
    }

    /// Append `element` iff `add` is true.
    fn maybe_add(self, element: T, add: bool) -> Self {
        if add { self.add(element) } else { self }
    }

    /// Append a child builder iff `add` is true.
    fn maybe_add_builder<B>(self, builder: B, add: bool) -> Self
    where
        B: Build<Output = T> + 'static,
    {
        if add { self.add_builder(builder) } else { self }
    }
}

impl<T> AddElement<T> for ListBuilder<T> {}
impl<T, B: AddElement<T>> AddElement<T> for Maybe<B> {}
