//! The fully-built SIR for one module: the arena plus the function/class
//! symbol tables every backend's emitter looks functions and field layouts
//! up through, grounded on `ori_codegen::CodegenContext`'s
//! (arena, signature table) split (`compiler/ori_codegen/src/context.rs`).

use rustc_hash::FxHashMap;

use statik_ir::{Name, Span};
use statik_types::TypeId;

use crate::arena::{SirArena, SirId, SirRange};

/// A function or method, fully typed. Parameters keep declaration order
/// (mirrors `statik_types::FunctionSignature`) so a call site's positional
/// arguments line up against them without a name lookup per argument.
#[derive(Clone, Debug)]
pub struct SirFunction {
    pub name: Name,
    pub params: Vec<(Name, TypeId)>,
    pub return_type: TypeId,
    pub body: SirRange,
    pub span: Span,
}

/// A class's field layout and method set. Single base class or none —
/// multiple inheritance is already rejected at parse time (spec.md §4.1),
/// so this never carries more than one.
#[derive(Clone, Debug)]
pub struct ClassRecord {
    pub name: Name,
    pub base: Option<Name>,
    pub fields: Vec<(Name, TypeId)>,
    pub constructor_params: Vec<(Name, TypeId)>,
    pub methods: Vec<Name>,
    pub span: Span,
}

/// Everything built from one source module: the node arena and the two
/// symbol tables every `statik_backend` emitter consumes. Built once by
/// [`crate::builder::build_module`] and never mutated afterward — an
/// emitter only ever holds a shared reference to one of these.
pub struct SirModule {
    pub arena: SirArena,
    pub functions: FxHashMap<Name, SirFunction>,
    pub classes: FxHashMap<Name, ClassRecord>,
    /// The single `SirNodeKind::Module` node at the root of the tree; its
    /// own `SirRange` payload is the top-level `FunctionDef`/`ClassDef`
    /// nodes in source order.
    pub root: SirId,
}

impl SirModule {
    pub fn function(&self, name: Name) -> Option<&SirFunction> {
        self.functions.get(&name)
    }

    pub fn class(&self, name: Name) -> Option<&ClassRecord> {
        self.classes.get(&name)
    }

    /// The top-level items, in source order, addressable without having
    /// to destructure `root`'s node kind first.
    pub fn items(&self) -> &[SirId] {
        let crate::node::SirNodeKind::Module(range) = self.arena.kind(self.root) else {
            unreachable!("SirModule::root always holds a Module node")
        };
        self.arena.children(*range)
    }
}
