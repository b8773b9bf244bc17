//! The one concretely-specified backend (spec.md §4.7): scalar functions
//! lowered to a typed SSA IR of this crate's own design, with a four-level
//! optimizer and a textual parser standing in for a real LLVM binding
//! (DESIGN.md records the substitution — this workspace must build without
//! a system LLVM/clang toolchain). Grounded throughout on `ori_llvm`'s
//! codegen shape, one layer removed from `inkwell`.

pub mod builder;
pub mod container_system;
pub mod emitter;
pub mod error;
pub mod evaluator;
pub mod ir;
pub mod lower;
pub mod name_mapper;
pub mod optimizer;
pub mod parser;
pub mod runtime_abi;

use statik_backend::{Backend, Builder, ContainerSystem, Emitter, Feature, NameMapper, NamingConvention, RuntimeAbi};

use crate::builder::LowIrBuilder;
use crate::container_system::LowIrContainerSystem;
use crate::emitter::LowIrEmitter;
use crate::name_mapper::LowIrNameMapper;
use crate::runtime_abi::LowIrRuntimeAbi;

pub struct LowIrBackend {
    emitter: LowIrEmitter,
    containers: LowIrContainerSystem,
    mapper: LowIrNameMapper,
    abi: LowIrRuntimeAbi,
    builder: LowIrBuilder,
}

impl Default for LowIrBackend {
    fn default() -> Self {
        LowIrBackend {
            emitter: LowIrEmitter,
            containers: LowIrContainerSystem,
            mapper: LowIrNameMapper { convention: NamingConvention::SnakeCase },
            abi: LowIrRuntimeAbi,
            builder: LowIrBuilder,
        }
    }
}

impl Backend for LowIrBackend {
    fn name(&self) -> &'static str {
        "ir"
    }

    fn file_extension(&self) -> &'static str {
        "ll"
    }

    fn supports_feature(&self, feature: Feature) -> bool {
        matches!(feature, Feature::Functions | Feature::Variables | Feature::Arithmetic | Feature::ControlFlow | Feature::Loops)
    }

    fn emitter(&self) -> &dyn Emitter {
        &self.emitter
    }

    fn container_system(&self) -> &dyn ContainerSystem {
        &self.containers
    }

    fn name_mapper(&self) -> &dyn NameMapper {
        &self.mapper
    }

    fn runtime_abi(&self) -> &dyn RuntimeAbi {
        &self.abi
    }

    fn builder(&self) -> &dyn Builder {
        &self.builder
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn supports_only_scalar_features() {
        let backend = LowIrBackend::default();
        for feature in [Feature::Functions, Feature::Variables, Feature::Arithmetic, Feature::ControlFlow, Feature::Loops] {
            assert!(backend.supports_feature(feature));
        }
        assert!(!backend.supports_feature(Feature::Classes));
        assert!(!backend.supports_feature(Feature::Containers));
    }

    #[test]
    fn names_itself_ir_with_an_ll_extension() {
        let backend = LowIrBackend::default();
        assert_eq!(backend.name(), "ir");
        assert_eq!(backend.file_extension(), "ll");
    }
}
