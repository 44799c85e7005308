//! Shared helpers for the integration tests.

use std::cell::Cell;
use std::rc::Rc;

use stagecraft::{Build, BuildError};

/// A [`Build`] that counts how many times it has been invoked.
///
/// `new` hands back the counter alongside the builder so tests can stage the
/// builder inside a parent and still observe the invocation count.
pub struct CountingBuilder<T> {
    value: T,
    builds: Rc<Cell<usize>>,
}

impl<T: Clone> CountingBuilder<T> {
    pub fn new(value: T) -> (Self, Rc<Cell<usize>>) {
        let builds = Rc::new(Cell::new(0));
        (
            Self {
                value,
                builds: builds.clone(),
            },
            builds,
        )
    }
}

impl<T: Clone> Build for CountingBuilder<T> {
    type Output = T;

    fn build(&self) -> Result<T, BuildError> {
        self.builds.set(self.builds.get() + 1);
        Ok(self.value.clone())
    }
}

/// A [`Build`] that always fails with a custom error.
pub struct FailingBuilder;

impl Build for FailingBuilder {
    type Output = i32;

    fn build(&self) -> Result<i32, BuildError> {
        Err(BuildError::Custom("deliberate failure".into()))
    }
}
