//! The functional-language backend: a contract-level implementation of
//! every `statik_backend` seam, grounded on the same emitter shape
//! `statik_target_c`/`statik_target_go` use, substituting an
//! expression-oriented `let`/`if`/`match` surface and persistent
//! containers for the other two targets' statement-oriented,
//! mutation-based ones.

mod builder;
mod container_system;
mod emitter;
mod name_mapper;
mod runtime_abi;
mod types;

use statik_backend::{Backend, Builder, ContainerSystem, Emitter, Feature, HashtableStrategy, NameMapper, NamingConvention, RuntimeAbi};

use crate::builder::MlBuilder;
use crate::container_system::MlContainerSystem;
use crate::emitter::MlEmitter;
use crate::name_mapper::MlNameMapper;
use crate::runtime_abi::MlRuntimeAbi;

pub struct MlBackend {
    emitter: MlEmitter,
    containers: MlContainerSystem,
    mapper: MlNameMapper,
    abi: MlRuntimeAbi,
    builder: MlBuilder,
}

impl Default for MlBackend {
    fn default() -> Self {
        MlBackend {
            emitter: MlEmitter,
            containers: MlContainerSystem { hashtables: HashtableStrategy::Stdlib },
            mapper: MlNameMapper { convention: NamingConvention::SnakeCase },
            abi: MlRuntimeAbi,
            builder: MlBuilder,
        }
    }
}

impl Backend for MlBackend {
    fn name(&self) -> &'static str {
        "ml"
    }

    fn file_extension(&self) -> &'static str {
        "ml"
    }

    fn supports_feature(&self, _feature: Feature) -> bool {
        true
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
    fn declares_every_feature_the_spec_requires() {
        let backend = MlBackend::default();
        for feature in [
            Feature::Functions,
            Feature::Variables,
            Feature::Arithmetic,
            Feature::ControlFlow,
            Feature::Loops,
            Feature::Classes,
            Feature::Containers,
        ] {
            assert!(backend.supports_feature(feature));
        }
    }

    #[test]
    fn heterogeneous_containers_are_supported() {
        let backend = MlBackend::default();
        assert!(backend.container_system().supports_heterogeneous());
    }
}
