//! Builder for a key-value mapping.

use std::hash::Hash;

use indexmap::IndexMap;

use crate::build::{Build, BuildError};
use crate::deferred::Deferred;
use crate::maybe::{Always, Maybe, Stage};

/// The mapping type built by [`MapBuilder`]: insertion-ordered, hashed with
/// [`ahash`].
pub type Map<K, V> = IndexMap<K, V, ahash::RandomState>;

/// One staged key-value pair. The value stays deferred until `build`.
#[derive(Debug)]
pub struct MapEntry<K, V> {
    key: K,
    value: Deferred<V>,
}

impl<K, V> MapEntry<K, V> {
    /// Stage `key` with a deferred value.
    pub fn new(key: K, value: Deferred<V>) -> Self {
        Self { key, value }
    }
}

/// A builder for a [`Map<K, V>`].
///
/// Internally a staged *sequence* of entries, not a mapping: the same key may
/// be staged any number of times, and `build` replays the sequence in staging
/// order so that the last entry for a key wins while earlier entries for it
/// are still resolved (their side effects happen, their values are
/// overwritten). Key iteration order of the built map is first-occurrence
/// staging order. An empty builder builds an empty map.
#[derive(Debug)]
pub struct MapBuilder<K, V> {
    entries: Vec<MapEntry<K, V>>,
}

impl<K, V> MapBuilder<K, V> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of staged entries. Overriding entries for one key each count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been staged yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
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

impl<K, V> Default for MapBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Stage for MapBuilder<K, V> {
    type Staged = MapEntry<K, V>;

    fn stage(&mut self, entry: MapEntry<K, V>) {
        self.entries.push(entry);
    }
}

impl<K, V> Always for MapBuilder<K, V> {
    type Root = Self;

    fn always(self) -> Self {
        self
    }
}

impl<K, V> Build for MapBuilder<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    type Output = Map<K, V>;

    /// Resolve every staged entry exactly once, in staging order, into a
    /// fresh map. Later entries overwrite earlier values for an equal key
    /// without disturbing the key's original position. The first failing
    /// entry aborts the build.
    fn build(&self) -> Result<Map<K, V>, BuildError> {
        let mut map = Map::with_capacity_and_hasher(self.entries.len(), ahash::RandomState::new());
        for entry in &self.entries {
            map.insert(entry.key.clone(), entry.value.resolve()?);
        }
        Ok(map)
    }
}

/// Fluent mutations of a [`MapBuilder`], available on the builder itself
/// and on any conditional layer over it.
pub trait PutEntry<K, V>: Stage<Staged = MapEntry<K, V>> + Sized {
    /// Stage `key` with `value`. Staging an equal key again later overrides
    /// this value in the built map.
    fn put(mut self, key: K, value: V) -> Self {
        self.stage(MapEntry::new(key, Deferred::of(value)));
        self
    }

    /// Stage `key` with a child builder for its value, invoked once per
    /// `build` call on this map.
    fn put_builder<B>(mut self, key: K, builder: B) -> Self
    where
        B: Build<Output = V> + 'static,
    {
        self.stage(MapEntry::new(key, Deferred::builder(builder)));
        self
    }

    /// Stage the pair iff `put` is true.
    fn maybe_put(self, key: K, value: V, put: bool) -> Self {
        if put { self.put(key, value) } else { self }
    }

    /// Stage the pair with a child builder iff `put` is true.
    fn maybe_put_builder<B>(self, key: K, builder: B, put: bool) -> Self
    where
        B: Build<Output = V> + 'static,
    {
        if put { self.put_builder(key, builder) } else { self }
    }
}

impl<K, V> PutEntry<K, V> for MapBuilder<K, V> {}
impl<K, V, B: PutEntry<K, V>> PutEntry<K, V> for Maybe<B> {}
