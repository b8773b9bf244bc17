//! Errors specific to this target's textual IR, folded by `statik_compiler`
//! into its own `CompileError::IRParseError`/`InvalidOptimizationLevel`
//! variants (spec.md §7), grounded on
//! `original_source/tests/test_llvm_optimization.py`'s
//! `ValueError("Failed to parse LLVM IR")` and
//! `ValueError("Optimization level must be 0-3")`.

use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("failed to parse low-level IR: {0}")]
pub struct IrParseError(pub String);

#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
#[error("optimization level must be 0-3, got {0}")]
pub struct InvalidOptimizationLevel(pub i32);
