//! The open backend set (spec.md §9: "per-target tables registered at
//! process start; no runtime extension required"), modeled as a trait-object
//! map rather than a closed enum so `statik_compiler`/`staticc` never needs
//! a match arm added when a new target crate lands.

use rustc_hash::FxHashMap;

use crate::backend::Backend;

#[derive(Default)]
pub struct BackendRegistry {
    backends: FxHashMap<&'static str, Box<dyn Backend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one backend under its own `Backend::name`. A later call
    /// with the same name replaces the earlier registration, so callers
    /// that assemble a registry from several crates' `register` functions
    /// never need to pre-check for collisions themselves.
    pub fn register(&mut self, backend: Box<dyn Backend>) {
        self.backends.insert(backend.name(), backend);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Backend> {
        self.backends.get(name).map(std::convert::AsRef::as_ref)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.backends.keys().copied()
    }
}
