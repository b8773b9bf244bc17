//! Assembles the open backend set (spec.md §9: "per-target tables
//! registered at process start") into one [`BackendRegistry`], the way
//! `oric`'s driver wires up every target crate it links against
//! (`compiler/oric/src/commands/targets.rs`) — but as a pure function
//! any embedder (CLI, WASM, test harness) can call, never a global.

use statik_backend::BackendRegistry;

/// Builds a registry holding every backend this workspace links: the
/// three contract-only targets (`c`, `go`, `ml`) plus the one
/// concretely-specified `ir` backend (spec.md §4.7).
pub fn default_registry() -> BackendRegistry {
    let mut registry = BackendRegistry::new();
    registry.register(Box::new(statik_target_c::CBackend::default()));
    registry.register(Box::new(statik_target_go::GoBackend::default()));
    registry.register(Box::new(statik_target_ml::MlBackend::default()));
    registry.register(Box::new(statik_lowir::LowIrBackend::default()));
    registry
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn registers_all_four_targets() {
        let registry = default_registry();
        let mut names: Vec<&str> = registry.names().collect();
        names.sort_unstable();
        assert_eq!(names, vec!["c", "go", "ir", "ml"]);
    }
}
