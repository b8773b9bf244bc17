//! The lowering contract every target crate implements against: the
//! [`Backend`] trait object, the typed [`Preferences`] record, the
//! per-target [`ContainerSystem`]/[`NameMapper`]/[`RuntimeAbi`] tables, and
//! the [`BackendRegistry`] that holds the open backend set.
//!
//! Grounded on `ori_codegen`'s concrete C backend one layer further up the
//! pipeline: this crate names the *shape* every backend follows, the way
//! `ori_codegen::CCodegen`/`CodegenContext` fix that shape for exactly one
//! target.

mod backend;
mod builder;
mod container_system;
mod emit_error;
mod emitter;
mod feature;
mod name_mapper;
mod preferences;
mod registry;
mod runtime_abi;

pub use backend::Backend;
pub use builder::Builder;
pub use container_system::{ContainerSystem, EmittedExpr};
pub use emit_error::EmitError;
pub use emitter::Emitter;
pub use feature::Feature;
pub use name_mapper::{to_camel_case, to_snake_case, ConventionNameMapper, NameKind, NameMapper};
pub use preferences::{HashtableStrategy, NamingConvention, Preferences, UnknownPreferenceKey};
pub use registry::BackendRegistry;
pub use runtime_abi::RuntimeAbi;
