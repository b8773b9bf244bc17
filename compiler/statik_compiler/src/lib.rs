//! Pipeline orchestration: wires `statik_lexer` through `statik_lowir`
//! into the one pure function spec.md §5 describes — `(source text,
//! target, preferences) -> (artifact, diagnostics)` — and the open
//! backend registry every embedder (a CLI driver, a test harness, a
//! playground) selects a target from.
//!
//! Grounded on `ori_compiler`'s split between a portable, IO-free pipeline
//! crate and the Salsa-driven `oric` CLI built on top of it
//! (`compiler/ori_compiler/src/lib.rs`): this crate plays the same role
//! one layer further down a multi-target AOT translator instead of a
//! tree-walking interpreter for a single host language.

mod error;
mod output;
mod pipeline;
mod targets;

pub use error::CompileError;
pub use output::{Artifact, CompileOutput};
pub use pipeline::{compile, compile_with_registry, CompileConfig};
pub use targets::default_registry;
