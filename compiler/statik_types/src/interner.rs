use rustc_hash::FxHashMap;

use crate::TypeTerm;

/// An interned index into a [`TypeInterner`]'s term pool. Two `TypeId`s are
/// equal iff the terms they reference are structurally equal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TypeId(u32);

impl TypeId {
    #[allow(clippy::expect_used, reason = "interner capacity invariant, not a user-facing error")]
    fn from_usize(index: usize) -> Self {
        TypeId(u32::try_from(index).expect("type interner exceeded u32::MAX entries"))
    }

    fn as_usize(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn raw(self) -> u32 {
        self.0
    }
}

/// Owns every [`TypeTerm`] ever built during a single compilation, deduped
/// by structural equality. Mirrors `ori_types`' arena-backed type table:
/// terms are looked up by value on intern, never mutated in place.
pub struct TypeInterner {
    terms: Vec<TypeTerm>,
    lookup: FxHashMap<TypeTerm, TypeId>,
    int: TypeId,
    float: TypeId,
    bool_: TypeId,
    str_: TypeId,
    none: TypeId,
    unknown: TypeId,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    pub fn new() -> Self {
        let mut terms = Vec::new();
        let mut lookup = FxHashMap::default();
        let mut push = |terms: &mut Vec<TypeTerm>, lookup: &mut FxHashMap<TypeTerm, TypeId>, term: TypeTerm| {
            let id = TypeId::from_usize(terms.len());
            terms.push(term.clone());
            lookup.insert(term, id);
            id
        };
        let int = push(&mut terms, &mut lookup, TypeTerm::Int);
        let float = push(&mut terms, &mut lookup, TypeTerm::Float);
        let bool_ = push(&mut terms, &mut lookup, TypeTerm::Bool);
        let str_ = push(&mut terms, &mut lookup, TypeTerm::Str);
        let none = push(&mut terms, &mut lookup, TypeTerm::NoneType);
        let unknown = push(&mut terms, &mut lookup, TypeTerm::Unknown);
        TypeInterner { terms, lookup, int, float, bool_, str_, none, unknown }
    }

    pub fn intern(&mut self, term: TypeTerm) -> TypeId {
        if let Some(id) = self.lookup.get(&term) {
            return *id;
        }
        let id = TypeId::from_usize(self.terms.len());
        self.terms.push(term.clone());
        self.lookup.insert(term, id);
        id
    }

    pub fn lookup(&self, id: TypeId) -> &TypeTerm {
        &self.terms[id.as_usize()]
    }

    pub fn int(&self) -> TypeId {
        self.int
    }

    pub fn float(&self) -> TypeId {
        self.float
    }

    pub fn bool(&self) -> TypeId {
        self.bool_
    }

    pub fn str(&self) -> TypeId {
        self.str_
    }

    pub fn none(&self) -> TypeId {
        self.none
    }

    pub fn unknown(&self) -> TypeId {
        self.unknown
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn primitive_ids_are_stable_across_interner_instances() {
        let a = TypeInterner::new();
        let b = TypeInterner::new();
        assert_eq!(a.int(), b.int());
    }

    #[test]
    fn distinct_terms_get_distinct_ids() {
        let mut interner = TypeInterner::new();
        let (int_id, str_id) = (interner.int(), interner.str());
        let list_int = interner.intern(TypeTerm::List(int_id));
        let list_str = interner.intern(TypeTerm::List(str_id));
        assert_ne!(list_int, list_str);
    }
}
