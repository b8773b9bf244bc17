//! The trait every target crate implements, modeled as a single object-safe
//! seam (spec.md §4.4) rather than a bundle of free functions — grounded on
//! `ori_codegen::CCodegen`'s "one struct owns the whole C lowering" shape
//! and `ori_llvm`'s analogous pipeline entry point, generalized from "one
//! hardcoded backend" to an open, registerable set.

use crate::builder::Builder;
use crate::container_system::ContainerSystem;
use crate::emitter::Emitter;
use crate::feature::Feature;
use crate::name_mapper::NameMapper;
use crate::runtime_abi::RuntimeAbi;

pub trait Backend {
    /// The registry key and the name surfaced in CLI `--target` selection.
    fn name(&self) -> &'static str;

    /// The produced source/IR file's extension, without the leading dot.
    fn file_extension(&self) -> &'static str;

    /// Whether this target's emitter can lower the given language
    /// capability at all, independent of any one program (spec.md §4.4:
    /// `functions, variables, arithmetic, control_flow, loops, classes,
    /// containers` at minimum).
    fn supports_feature(&self, feature: Feature) -> bool;

    /// The lowering pass from SIR to this target's surface text.
    fn emitter(&self) -> &dyn Emitter;

    /// The per-target container lowering table (spec.md §4.5).
    fn container_system(&self) -> &dyn ContainerSystem;

    /// The per-target identifier-spelling strategy (spec.md §4.4/§4.6).
    fn name_mapper(&self) -> &dyn NameMapper;

    /// The per-target rendering of the closed runtime-ABI vocabulary
    /// (spec.md §4.6).
    fn runtime_abi(&self) -> &dyn RuntimeAbi;

    /// The per-target build-artifact generator (spec.md §4.9).
    fn builder(&self) -> &dyn Builder;
}
