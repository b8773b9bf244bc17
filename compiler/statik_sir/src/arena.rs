//! Index types and struct-of-arrays storage for the SIR, grounded directly
//! on `statik_ir::arena`'s flat-AST shape (`ExprId`/`ExprRange`) — the same
//! "no `Box`, index into an arena" design, one level further down the
//! pipeline.

use std::fmt;

use statik_ir::Span;
use statik_types::TypeId;

use crate::node::SirNodeKind;

#[cold]
#[inline(never)]
fn panic_capacity_exceeded(value: usize, context: &str) -> ! {
    panic!("SIR arena capacity exceeded: {context} has {value} elements, max is {}", u32::MAX)
}

#[cold]
#[inline(never)]
fn panic_range_exceeded(value: usize, context: &str) -> ! {
    panic!("SIR range length exceeded: {context} has {value} elements, max is {}", u16::MAX)
}

fn to_u32(value: usize, context: &str) -> u32 {
    u32::try_from(value).unwrap_or_else(|_| panic_capacity_exceeded(value, context))
}

fn to_u16(value: usize, context: &str) -> u16 {
    u16::try_from(value).unwrap_or_else(|_| panic_range_exceeded(value, context))
}

/// Index into a [`SirArena`]'s node storage.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct SirId(u32);

impl SirId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for SirId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SirId({})", self.0)
    }
}

/// A contiguous `(start, len)` range of sibling [`SirId`]s, mirroring
/// `statik_ir::StmtRange`/`ExprRange`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct SirRange {
    pub start: u32,
    pub len: u16,
}

impl SirRange {
    pub const EMPTY: SirRange = SirRange { start: 0, len: 0 };

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for SirRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SirRange({}..{})", self.start, self.start + u32::from(self.len))
    }
}

/// Owns every SIR node built for a module: a struct-of-arrays split of node
/// kind, resolved type and source span, addressed by [`SirId`] — the same
/// shape as `ori_ir::ExprArena`/`ori_codegen::CodegenContext::expr_types`
/// (a parallel type array keyed by the same index).
#[derive(Default)]
pub struct SirArena {
    kinds: Vec<SirNodeKind>,
    types: Vec<TypeId>,
    spans: Vec<Span>,
    children: Vec<SirId>,
}

impl SirArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, kind: SirNodeKind, type_id: TypeId, span: Span) -> SirId {
        let id = to_u32(self.kinds.len(), "SIR nodes");
        self.kinds.push(kind);
        self.types.push(type_id);
        self.spans.push(span);
        SirId(id)
    }

    pub fn kind(&self, id: SirId) -> &SirNodeKind {
        &self.kinds[id.index()]
    }

    pub fn type_of(&self, id: SirId) -> TypeId {
        self.types[id.index()]
    }

    pub fn span_of(&self, id: SirId) -> Span {
        self.spans[id.index()]
    }

    pub fn alloc_children(&mut self, items: impl IntoIterator<Item = SirId>) -> SirRange {
        let start = to_u32(self.children.len(), "SIR child lists");
        self.children.extend(items);
        let len = to_u16(self.children.len() - start as usize, "SIR child lists");
        SirRange { start, len }
    }

    pub fn children(&self, range: SirRange) -> &[SirId] {
        let start = range.start as usize;
        &self.children[start..start + range.len()]
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
