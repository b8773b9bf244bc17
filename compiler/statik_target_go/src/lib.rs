//! The garbage-collected service-language backend: a contract-level
//! implementation of every `statik_backend` seam, grounded on the same
//! `ori_codegen`-derived emitter shape `statik_target_c` uses, substituting
//! Go's native slice/map/struct syntax for the manual-memory target's
//! generated runtime calls.

mod builder;
mod container_system;
mod emitter;
mod name_mapper;
mod runtime_abi;
mod types;

use statik_backend::{Backend, Builder, ContainerSystem, Emitter, Feature, NameMapper, NamingConvention, RuntimeAbi};

use crate::builder::GoBuilder;
use crate::container_system::GoContainerSystem;
use crate::emitter::GoEmitter;
use crate::name_mapper::GoNameMapper;
use crate::runtime_abi::GoRuntimeAbi;

pub struct GoBackend {
    emitter: GoEmitter,
    containers: GoContainerSystem,
    mapper: GoNameMapper,
    abi: GoRuntimeAbi,
    builder: GoBuilder,
}

impl Default for GoBackend {
    fn default() -> Self {
        GoBackend {
            emitter: GoEmitter,
            containers: GoContainerSystem,
            mapper: GoNameMapper { convention: NamingConvention::CamelCase },
            abi: GoRuntimeAbi,
            builder: GoBuilder,
        }
    }
}

impl Backend for GoBackend {
    fn name(&self) -> &'static str {
        "go"
    }

    fn file_extension(&self) -> &'static str {
        "go"
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
        let backend = GoBackend::default();
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
        let backend = GoBackend::default();
        assert!(backend.container_system().supports_heterogeneous());
    }
}
