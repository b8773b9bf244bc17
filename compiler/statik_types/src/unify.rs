use crate::{TypeId, TypeInterner, TypeTerm};

/// Joins two type terms along the lattice spec.md §4.2 defines. Returns the
/// joined id and whether the join *widened* either input (used by the
/// caller to apply [`crate::Confidence::COERCION_PENALTY`]).
///
/// Rules, in the order they're checked:
/// 1. `T ⊔ T = T`
/// 2. `T ⊔ Unknown = T`
/// 3. `Bool ⊔ Int = Int`; `Int ⊔ Float = Float`; `Bool ⊔ Float = Float`
/// 4. `List[A] ⊔ List[B] = List[A ⊔ B]`, likewise `Dict`/`Set`/`Tuple` of
///    matching arity
/// 5. Otherwise `Union[A, B]`, flattening and deduping if either side is
///    already a `Union`
pub fn unify(interner: &mut TypeInterner, a: TypeId, b: TypeId) -> (TypeId, bool) {
    if a == b {
        return (a, false);
    }
    if a == interner.unknown() {
        return (b, false);
    }
    if b == interner.unknown() {
        return (a, false);
    }

    let term_a = interner.lookup(a).clone();
    let term_b = interner.lookup(b).clone();

    if let Some(numeric) = unify_numeric(interner, &term_a, &term_b) {
        return (numeric, true);
    }

    match (&term_a, &term_b) {
        (TypeTerm::List(ia), TypeTerm::List(ib)) => {
            let (joined, widened) = unify(interner, *ia, *ib);
            (interner.intern(TypeTerm::List(joined)), widened)
        }
        (TypeTerm::Set(ia), TypeTerm::Set(ib)) => {
            let (joined, widened) = unify(interner, *ia, *ib);
            (interner.intern(TypeTerm::Set(joined)), widened)
        }
        (TypeTerm::Dict(ka, va), TypeTerm::Dict(kb, vb)) => {
            let (key, key_widened) = unify(interner, *ka, *kb);
            let (value, value_widened) = unify(interner, *va, *vb);
            (interner.intern(TypeTerm::Dict(key, value)), key_widened || value_widened)
        }
        (TypeTerm::Tuple(items_a), TypeTerm::Tuple(items_b)) if items_a.len() == items_b.len() => {
            let mut widened = false;
            let mut joined = Vec::with_capacity(items_a.len());
            for (ia, ib) in items_a.iter().zip(items_b.iter()) {
                let (j, w) = unify(interner, *ia, *ib);
                widened |= w;
                joined.push(j);
            }
            (interner.intern(TypeTerm::Tuple(joined)), widened)
        }
        _ => (union_of(interner, a, b), true),
    }
}

fn unify_numeric(interner: &mut TypeInterner, a: &TypeTerm, b: &TypeTerm) -> Option<TypeId> {
    use TypeTerm::{Bool, Float, Int};
    match (a, b) {
        (Bool, Int) | (Int, Bool) => Some(interner.int()),
        (Int, Float) | (Float, Int) => Some(interner.float()),
        (Bool, Float) | (Float, Bool) => Some(interner.float()),
        _ => None,
    }
}

/// Builds `Union[A, B]`, flattening any `Union` member of either side and
/// deduplicating the resulting alternative list (rule 5). A one-element
/// result collapses back to that element rather than a degenerate
/// single-member `Union`.
fn union_of(interner: &mut TypeInterner, a: TypeId, b: TypeId) -> TypeId {
    let mut members = Vec::new();
    flatten_into(interner, a, &mut members);
    flatten_into(interner, b, &mut members);
    members.sort_unstable_by_key(|id: &TypeId| id.raw());
    members.dedup();
    if members.len() == 1 {
        return members[0];
    }
    interner.intern(TypeTerm::Union(members))
}

fn flatten_into(interner: &TypeInterner, id: TypeId, out: &mut Vec<TypeId>) {
    match interner.lookup(id) {
        TypeTerm::Union(members) => out.extend(members.iter().copied()),
        _ => out.push(id),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn identical_terms_join_to_themselves() {
        let mut interner = TypeInterner::new();
        let (joined, widened) = unify(&mut interner, interner.int(), interner.int());
        assert_eq!(joined, interner.int());
        assert!(!widened);
    }

    #[test]
    fn unknown_is_the_join_identity() {
        let mut interner = TypeInterner::new();
        let (joined, widened) = unify(&mut interner, interner.str(), interner.unknown());
        assert_eq!(joined, interner.str());
        assert!(!widened);
    }

    #[test]
    fn numeric_widening_follows_bool_int_float_ladder() {
        let mut interner = TypeInterner::new();
        let (joined, widened) = unify(&mut interner, interner.bool(), interner.int());
        assert_eq!(joined, interner.int());
        assert!(widened);

        let (joined, _) = unify(&mut interner, interner.int(), interner.float());
        assert_eq!(joined, interner.float());

        let (joined, _) = unify(&mut interner, interner.bool(), interner.float());
        assert_eq!(joined, interner.float());
    }

    #[test]
    fn lists_join_elementwise() {
        let mut interner = TypeInterner::new();
        let list_bool = interner.intern(TypeTerm::List(interner.bool()));
        let list_int = interner.intern(TypeTerm::List(interner.int()));
        let (joined, widened) = unify(&mut interner, list_bool, list_int);
        assert_eq!(interner.lookup(joined), &TypeTerm::List(interner.int()));
        assert!(widened);
    }

    #[test]
    fn unrelated_terms_join_to_a_flattened_deduped_union() {
        let mut interner = TypeInterner::new();
        let (ab, _) = unify(&mut interner, interner.str(), interner.none());
        let (abc, _) = unify(&mut interner, ab, interner.str());
        match interner.lookup(abc) {
            TypeTerm::Union(members) => assert_eq!(members.len(), 2),
            other => panic!("expected a 2-member union, got {other:?}"),
        }
    }
}
