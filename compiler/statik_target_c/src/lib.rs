//! The systems-language (manual memory) backend: a contract-level
//! implementation of every `statik_backend` seam, grounded throughout on
//! `ori_codegen`'s C backend (the only text-emitting backend among the
//! teacher's own crates).

mod builder;
mod container_system;
mod emitter;
mod name_mapper;
mod runtime_abi;
mod types;

use statik_backend::{Backend, Builder, ContainerSystem, Emitter, Feature, NameMapper, NamingConvention, RuntimeAbi};

use crate::builder::CBuilder;
use crate::container_system::CContainerSystem;
use crate::emitter::CEmitter;
use crate::name_mapper::CNameMapper;
use crate::runtime_abi::CRuntimeAbi;

pub struct CBackend {
    emitter: CEmitter,
    containers: CContainerSystem,
    mapper: CNameMapper,
    abi: CRuntimeAbi,
    builder: CBuilder,
}

impl Default for CBackend {
    fn default() -> Self {
        CBackend {
            emitter: CEmitter,
            containers: CContainerSystem,
            mapper: CNameMapper { convention: NamingConvention::SnakeCase },
            abi: CRuntimeAbi,
            builder: CBuilder,
        }
    }
}

impl Backend for CBackend {
    fn name(&self) -> &'static str {
        "c"
    }

    fn file_extension(&self) -> &'static str {
        "c"
    }

    fn supports_feature(&self, feature: Feature) -> bool {
        !matches!(feature, Feature::Classes)
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
    fn declares_the_feature_set_spec_requires() {
        let backend = CBackend::default();
        for feature in [Feature::Functions, Feature::Variables, Feature::Arithmetic, Feature::ControlFlow, Feature::Loops, Feature::Containers] {
            assert!(backend.supports_feature(feature));
        }
        assert!(!backend.supports_feature(Feature::Classes));
    }
}
